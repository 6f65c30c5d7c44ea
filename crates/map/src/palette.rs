use crate::error::{MapError, Result};
use beerlog_catalog::{Brand, BrandId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Colors handed out to brands, in assignment order
pub const DEFAULT_PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FF9A3C", "#A1C181"];

/// Color for stores whose brand has no palette entry
pub const NEUTRAL_COLOR: &str = "#CCCCCC";

/// CSS hex color (`#RGB` or `#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(raw: &str) -> Result<Self> {
        let hex = raw
            .strip_prefix('#')
            .ok_or_else(|| MapError::InvalidColor(raw.to_string()))?;
        let valid_len = matches!(hex.len(), 3 | 6);
        if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidColor(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Ordered palette plus the fallback color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    fallback: Color,
}

impl Palette {
    pub fn new(colors: Vec<Color>, fallback: Color) -> Result<Self> {
        if colors.is_empty() {
            return Err(MapError::invalid_config("palette must contain at least one color"));
        }
        Ok(Self { colors, fallback })
    }

    /// Color for the brand at position `index`; wraps around past the end
    pub fn color_at(&self, index: usize) -> &Color {
        &self.colors[index % self.colors.len()]
    }

    pub fn fallback(&self) -> &Color {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .map(|hex| Color((*hex).to_string()))
                .collect(),
            fallback: Color(NEUTRAL_COLOR.to_string()),
        }
    }
}

/// Brand id -> color for one render.
///
/// Built from the brand list order, never from the id value, so reordering
/// brands changes their colors. Lookups for ids outside the map (including
/// stores with no brand) return the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandColorMap {
    colors: HashMap<BrandId, Color>,
    fallback: Color,
}

impl BrandColorMap {
    /// Assign `palette[i mod n]` to the i-th brand
    pub fn assign(brands: &[Brand], palette: &Palette) -> Self {
        let mut colors = HashMap::with_capacity(brands.len());
        for (i, brand) in brands.iter().enumerate() {
            // First occurrence wins if a brand is listed twice
            colors
                .entry(brand.id)
                .or_insert_with(|| palette.color_at(i).clone());
        }

        if brands.len() > palette.len() {
            log::debug!(
                "{} brands share a {}-color palette; colors repeat",
                brands.len(),
                palette.len()
            );
        }

        Self {
            colors,
            fallback: palette.fallback().clone(),
        }
    }

    /// Color for a store's brand reference
    pub fn color_for(&self, brand: Option<BrandId>) -> &Color {
        brand
            .and_then(|id| self.colors.get(&id))
            .unwrap_or(&self.fallback)
    }

    pub fn get(&self, brand: BrandId) -> Option<&Color> {
        self.colors.get(&brand)
    }

    pub fn fallback(&self) -> &Color {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
