use crate::error::{CatalogError, Result};
use crate::repository::{BrandRepository, StoreRepository};
use crate::types::{
    Brand, BrandId, CoordinateValue, EncodedImage, Store, StoreId, StoreView, UNKNOWN_BRAND,
};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const STORES_WITH_BRAND_SQL: &str = "
    SELECT s.store_id, s.store_name, s.store_address, s.store_contact, s.lat, s.lng, s.brand_id,
           b.brand_id, b.brand_name, b.brand_picture
    FROM stores s
    LEFT JOIN brands b ON b.brand_id = s.brand_id
    ORDER BY s.store_id";

const BRANDS_SQL: &str = "
    SELECT brand_id, brand_name, brand_picture
    FROM brands
    ORDER BY brand_id";

/// Connection settings for the catalogue database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqliteConfig {
    /// How long a read waits on a locked database
    pub busy_timeout_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
        }
    }
}

/// Handle to the catalogue database.
///
/// Holds no open connection: each repository call acquires its own read-only
/// session and drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    path: PathBuf,
    config: SqliteConfig,
}

impl SqliteDataSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(path, SqliteConfig::default())
    }

    pub fn with_config(path: impl AsRef<Path>, config: SqliteConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only session
    pub fn session(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| CatalogError::Unavailable {
            path: self.path.display().to_string(),
            source,
        })?;
        conn.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA query_only=ON;")?;
        Ok(conn)
    }

    /// Run `f` inside a session that is released when `f` returns
    pub fn with_session<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.session()?;
        f(&conn)
    }
}

/// Store and brand repositories backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    source: SqliteDataSource,
}

impl SqliteCatalog {
    pub fn new(source: SqliteDataSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &SqliteDataSource {
        &self.source
    }
}

impl StoreRepository for SqliteCatalog {
    fn list_stores_with_brand(&self) -> Result<Vec<StoreView>> {
        let stores = self.source.with_session(|conn| {
            let mut stmt = conn.prepare(STORES_WITH_BRAND_SQL)?;
            let rows = stmt
                .query_map([], store_view_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        log::debug!(
            "Loaded {} stores from {}",
            stores.len(),
            self.source.path().display()
        );
        Ok(stores)
    }
}

impl BrandRepository for SqliteCatalog {
    fn list_brands(&self) -> Result<Vec<Brand>> {
        let brands = self.source.with_session(|conn| {
            let mut stmt = conn.prepare(BRANDS_SQL)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Brand {
                        id: BrandId(row.get(0)?),
                        name: row.get(1)?,
                        image: EncodedImage::from_blob(blob_column(row, 2)?),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        log::debug!(
            "Loaded {} brands from {}",
            brands.len(),
            self.source.path().display()
        );
        Ok(brands)
    }
}

fn store_view_from_row(row: &Row<'_>) -> rusqlite::Result<StoreView> {
    let store = Store {
        id: StoreId(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        contact: row.get(3)?,
        lat: coordinate_column(row, 4)?,
        lng: coordinate_column(row, 5)?,
        brand_id: brand_reference_column(row, 6)?,
    };

    let brand = match row.get::<_, Option<i64>>(7)? {
        Some(id) => Some(Brand {
            id: BrandId(id),
            name: row
                .get::<_, Option<String>>(8)?
                .unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            image: EncodedImage::from_blob(blob_column(row, 9)?),
        }),
        None => None,
    };

    Ok(StoreView::new(store, brand.as_ref()))
}

fn coordinate_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<CoordinateValue>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(v) => Some(CoordinateValue::Number(v as f64)),
        ValueRef::Real(v) => Some(CoordinateValue::Number(v)),
        ValueRef::Text(raw) | ValueRef::Blob(raw) => Some(CoordinateValue::Text(
            String::from_utf8_lossy(raw).into_owned(),
        )),
    })
}

// The reference schema declares `stores.brand_id` as a string column, so
// integer-looking text is accepted alongside integers.
fn brand_reference_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<BrandId>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(v) => Some(BrandId(v)),
        ValueRef::Real(v) if v.fract() == 0.0 && v.is_finite() => Some(BrandId(v as i64)),
        ValueRef::Text(raw) => std::str::from_utf8(raw)
            .ok()
            .and_then(BrandId::parse_reference),
        _ => None,
    })
}

fn blob_column<'r>(row: &'r Row<'_>, idx: usize) -> rusqlite::Result<Option<&'r [u8]>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Some(bytes),
        _ => None,
    })
}
