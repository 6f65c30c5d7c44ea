use crate::palette::Color;
use crate::types::Icon;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Beer mug glyph filled with `color`: white badge, tapered glass, foam head,
/// and two rising bubbles.
pub fn beer_mug_svg(color: &Color, size: u32) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="{size}" height="{size}">
    <defs>
        <filter id="shadow" x="-20%" y="-20%" width="140%" height="140%">
            <feGaussianBlur in="SourceAlpha" stdDeviation="3"/>
            <feOffset dx="0" dy="0" result="offsetblur"/>
            <feFlood flood-color="#000000" flood-opacity="0.5"/>
            <feComposite in2="offsetblur" operator="in"/>
            <feMerge>
                <feMergeNode/>
                <feMergeNode in="SourceGraphic"/>
            </feMerge>
        </filter>
        <linearGradient id="foam" x1="0%" y1="0%" x2="0%" y2="100%">
            <stop offset="0%" style="stop-color:white;stop-opacity:1"/>
            <stop offset="100%" style="stop-color:#f0f0f0;stop-opacity:1"/>
        </linearGradient>
    </defs>
    <circle cx="50" cy="50" r="48" fill="white" stroke="#333" stroke-width="2"/>
    <g transform="translate(15,15) scale(0.7)" filter="url(#shadow)">
        <path d="M20,30 L80,30 L70,90 L30,90 Z" fill="{color}" stroke="#444" stroke-width="4">
            <animate attributeName="d" dur="5s" repeatCount="indefinite"
                values="M20,30 L80,30 L70,90 L30,90 Z;M22,30 L78,30 L68,90 L32,90 Z;M20,30 L80,30 L70,90 L30,90 Z"/>
        </path>
        <path d="M30,25 Q50,5 70,25" fill="url(#foam)" stroke="#ddd" stroke-width="4">
            <animate attributeName="d" dur="3s" repeatCount="indefinite"
                values="M30,25 Q50,5 70,25;M30,23 Q50,3 70,23;M30,25 Q50,5 70,25"/>
        </path>
        <circle cx="40" cy="50" r="5" fill="white" opacity="0.8">
            <animate attributeName="cy" dur="2s" repeatCount="indefinite" values="50;45;50"/>
        </circle>
        <circle cx="60" cy="60" r="4" fill="white" opacity="0.6">
            <animate attributeName="cy" dur="2.5s" repeatCount="indefinite" values="60;55;60"/>
        </circle>
    </g>
</svg>"##
    )
}

impl Icon {
    /// Marker icon for `color`, `size` pixels square
    pub fn beer_mug(color: &Color, size: u32) -> Self {
        let svg = beer_mug_svg(color, size);
        let data_uri = format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()));
        Self {
            svg,
            data_uri,
            size: [size, size],
        }
    }
}
