use crate::error::{MapError, Result};
use crate::palette::{Color, Palette};
use crate::types::{LatLng, SizeHint};
use serde::{Deserialize, Serialize};

/// Settings for one map build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Initial map center
    pub center: LatLng,

    /// Initial zoom level
    pub zoom: u8,

    /// Show the distance scale control
    pub control_scale: bool,

    /// Pixel size hint for embedding
    pub size: SizeHint,

    /// Brand colors in assignment order
    pub palette: Vec<Color>,

    /// Color for stores without a palette entry
    pub fallback_color: Color,

    /// Marker icon edge length in pixels
    pub icon_size: u32,

    /// Tooltip content width in pixels
    pub tooltip_width: u32,

    /// Popup content width in pixels
    pub popup_width: u32,

    /// Upper bound on the rendered popup width
    pub popup_max_width: u32,

    /// Heading of the legend overlay
    pub legend_title: String,

    /// Cards per row in the brand catalogue
    pub catalogue_columns: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            // Central Tokyo
            center: LatLng::new(35.68, 139.70),
            zoom: 12,
            control_scale: true,
            size: SizeHint::new(1000, 600),
            palette: (0..palette.len()).map(|i| palette.color_at(i).clone()).collect(),
            fallback_color: palette.fallback().clone(),
            icon_size: 40,
            tooltip_width: 150,
            popup_width: 200,
            popup_max_width: 300,
            legend_title: "Brand legend".to_string(),
            catalogue_columns: 3,
        }
    }
}

impl MapConfig {
    /// Palette built from the configured colors
    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.clone(), self.fallback_color.clone())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::invalid_config(format!(
                "center ({}, {}) is not a valid coordinate",
                self.center.lat, self.center.lng
            )));
        }

        if self.zoom > 20 {
            return Err(MapError::invalid_config(format!(
                "zoom ({}) must be between 0 and 20",
                self.zoom
            )));
        }

        if self.size.width == 0 || self.size.height == 0 {
            return Err(MapError::invalid_config("size must be non-zero"));
        }

        if self.palette.is_empty() {
            return Err(MapError::invalid_config("palette must contain at least one color"));
        }

        if self.icon_size == 0 {
            return Err(MapError::invalid_config("icon_size must be > 0"));
        }

        if self.popup_width > self.popup_max_width {
            return Err(MapError::invalid_config(format!(
                "popup_width ({}) cannot exceed popup_max_width ({})",
                self.popup_width, self.popup_max_width
            )));
        }

        if self.catalogue_columns == 0 {
            return Err(MapError::invalid_config("catalogue_columns must be > 0"));
        }

        Ok(())
    }
}
