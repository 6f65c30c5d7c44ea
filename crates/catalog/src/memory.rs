use crate::error::Result;
use crate::repository::{BrandRepository, StoreRepository};
use crate::types::{Brand, BrandId, Store, StoreView};
use std::collections::HashMap;

/// Catalogue held in memory, for fixtures and tests.
///
/// Both listings keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    brands: Vec<Brand>,
    stores: Vec<Store>,
}

impl InMemoryCatalog {
    pub fn new(brands: Vec<Brand>, stores: Vec<Store>) -> Self {
        Self { brands, stores }
    }

    /// Builder: append a brand
    #[must_use]
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brands.push(brand);
        self
    }

    /// Builder: append a store
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.stores.push(store);
        self
    }
}

impl StoreRepository for InMemoryCatalog {
    fn list_stores_with_brand(&self) -> Result<Vec<StoreView>> {
        let by_id: HashMap<BrandId, &Brand> =
            self.brands.iter().map(|brand| (brand.id, brand)).collect();

        Ok(self
            .stores
            .iter()
            .map(|store| {
                let brand = store.brand_id.and_then(|id| by_id.get(&id).copied());
                StoreView::new(store.clone(), brand)
            })
            .collect())
    }
}

impl BrandRepository for InMemoryCatalog {
    fn list_brands(&self) -> Result<Vec<Brand>> {
        Ok(self.brands.clone())
    }
}
