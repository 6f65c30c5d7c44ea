//! # Beerlog Map
//!
//! Turns the store and brand catalogue into a single clustered map document.
//!
//! ## Features
//!
//! - **Deterministic brand colors** - palette position follows brand order
//! - **Store markers** - colored beer-mug icon, hover tooltip, click popup
//! - **Clustering** - markers are grouped into one cluster layer
//! - **Legend overlay** - one swatch per brand, fixed above the map
//! - **Brand catalogue** - thumbnail cards for browsing brands
//!
//! ## Architecture
//!
//! ```text
//! Brand[] ──> BrandColorMap (palette[i mod n], fallback for unknown)
//!                │
//! StoreView[] ───┼──> compose_marker (icon + tooltip + popup)
//!                │       └─ invalid coordinates → store excluded, logged
//!                │
//!                └──> MapAssembler
//!                       ├─ MarkerCluster
//!                       ├─ Legend
//!                       └─ MapDocument → to_html() / legend_html() / size()
//! ```

mod assembler;
mod catalogue;
mod config;
mod error;
mod icon;
mod legend;
mod marker;
mod palette;
mod render;
mod types;

pub use assembler::{render_map, MapAssembler};
pub use catalogue::{BrandCard, BrandCatalogue};
pub use config::MapConfig;
pub use error::{CoordinateError, MapError, Result};
pub use icon::beer_mug_svg;
pub use legend::{Legend, LegendEntry};
pub use marker::compose_marker;
pub use palette::{BrandColorMap, Color, Palette, DEFAULT_PALETTE, NEUTRAL_COLOR};
pub use types::{
    ExcludedStore, Icon, LatLng, MapDocument, MapSummary, Marker, MarkerCluster, Popup, SizeHint,
    Tooltip,
};
