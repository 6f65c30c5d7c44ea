use crate::error::Result;
use crate::types::{Brand, StoreView};

/// Read access to stores joined with their brand
pub trait StoreRepository {
    /// List every store with brand fields flattened alongside.
    ///
    /// Stores without a resolvable brand carry the unknown-brand defaults.
    fn list_stores_with_brand(&self) -> Result<Vec<StoreView>>;
}

/// Read access to the brand catalogue
pub trait BrandRepository {
    /// List all brands. The order drives color assignment and must be stable.
    fn list_brands(&self) -> Result<Vec<Brand>>;
}

/// Both read contracts needed for one map render
pub trait Catalog: StoreRepository + BrandRepository {}

impl<T: StoreRepository + BrandRepository + ?Sized> Catalog for T {}

impl<T: StoreRepository + ?Sized> StoreRepository for &T {
    fn list_stores_with_brand(&self) -> Result<Vec<StoreView>> {
        (**self).list_stores_with_brand()
    }
}

impl<T: BrandRepository + ?Sized> BrandRepository for &T {
    fn list_brands(&self) -> Result<Vec<Brand>> {
        (**self).list_brands()
    }
}
