use beerlog_catalog::{CatalogError, StoreId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MapError>;

/// A store whose coordinates cannot be placed on the map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid coordinate for store {store_id}: {reason}")]
pub struct CoordinateError {
    pub store_id: StoreId,
    pub reason: String,
}

impl CoordinateError {
    pub fn new(store_id: StoreId, reason: impl Into<String>) -> Self {
        Self {
            store_id,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}

impl MapError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
