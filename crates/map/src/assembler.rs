use crate::config::MapConfig;
use crate::error::{CoordinateError, Result};
use crate::legend::Legend;
use crate::marker::compose_marker;
use crate::palette::{BrandColorMap, Palette};
use crate::types::{ExcludedStore, MapDocument, MarkerCluster};
use beerlog_catalog::{Brand, Catalog, StoreView};

/// Builds map documents from store and brand listings.
///
/// Holds only configuration: every call to [`MapAssembler::assemble`] derives
/// colors, markers and legend from its inputs alone.
#[derive(Debug, Clone)]
pub struct MapAssembler {
    config: MapConfig,
    palette: Palette,
}

impl MapAssembler {
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Compose the clustered map and legend for `stores`.
    ///
    /// Stores with unusable coordinates are left off the map, logged, and
    /// listed in [`MapDocument::excluded`].
    pub fn assemble(&self, stores: &[StoreView], brands: &[Brand]) -> MapDocument {
        let colors = BrandColorMap::assign(brands, &self.palette);

        let mut cluster = MarkerCluster::new();
        let mut excluded = Vec::new();

        for store in stores {
            let color = colors.color_for(store.brand_id());
            match compose_marker(store, color, &self.config) {
                Ok(marker) => cluster.add(marker),
                Err(CoordinateError { store_id, reason }) => {
                    log::warn!(
                        "Skipping store {} ({}): {}",
                        store_id,
                        store.store_name(),
                        reason
                    );
                    excluded.push(ExcludedStore {
                        store_id,
                        store_name: store.store_name().to_string(),
                        reason,
                    });
                }
            }
        }

        let legend = Legend::build(brands, &colors, self.config.legend_title.clone());

        log::info!(
            "Assembled map: {} markers, {} legend rows, {} stores excluded",
            cluster.len(),
            legend.len(),
            excluded.len()
        );

        MapDocument {
            center: self.config.center,
            zoom: self.config.zoom,
            control_scale: self.config.control_scale,
            size: self.config.size,
            cluster,
            legend,
            excluded,
        }
    }
}

/// One render cycle: read stores and brands, then assemble.
///
/// A failed read aborts the render; no partial document is returned.
pub fn render_map<C: Catalog + ?Sized>(catalog: &C, assembler: &MapAssembler) -> Result<MapDocument> {
    let stores = catalog.list_stores_with_brand()?;
    let brands = catalog.list_brands()?;
    Ok(assembler.assemble(&stores, &brands))
}
