//! # Beerlog Catalog
//!
//! Read-only access to the store and brand tables behind the store map.
//!
//! ## Features
//!
//! - **Store listing** - every store joined with its brand in one query
//! - **Brand listing** - the brand catalogue in stable id order
//! - **Typed projection** - [`StoreView`] enforces the unknown-brand defaults
//! - **Scoped sessions** - one read-only SQLite connection per repository call
//!
//! ## Architecture
//!
//! ```text
//! SqliteDataSource (path + config)
//!     │
//!     ├──> session() → read-only Connection (dropped after each call)
//!     │
//!     └──> SqliteCatalog
//!            ├─ StoreRepository::list_stores_with_brand → StoreView[]
//!            └─ BrandRepository::list_brands           → Brand[]
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use beerlog_catalog::{BrandRepository, SqliteCatalog, SqliteDataSource, StoreRepository};
//!
//! fn main() -> beerlog_catalog::Result<()> {
//!     let catalog = SqliteCatalog::new(SqliteDataSource::new("beerlog.db"));
//!
//!     for brand in catalog.list_brands()? {
//!         println!("{}: {}", brand.id, brand.name);
//!     }
//!     for store in catalog.list_stores_with_brand()? {
//!         println!("{} ({})", store.store_name(), store.brand_name());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod memory;
mod repository;
mod sqlite;
mod types;

pub use error::{CatalogError, Result};
pub use memory::InMemoryCatalog;
pub use repository::{BrandRepository, Catalog, StoreRepository};
pub use sqlite::{SqliteCatalog, SqliteConfig, SqliteDataSource};
pub use types::{
    Brand, BrandId, CoordinateValue, EncodedImage, ImageKind, Store, StoreId, StoreView,
    UNKNOWN_BRAND,
};
