use thiserror::Error;

/// Result type for catalogue reads
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failures while reading the catalogue database.
///
/// Every variant is a data-access failure: callers abort the current render
/// instead of producing a partial map.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The database file could not be opened
    #[error("Cannot open catalog database {path}: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Tables or columns do not have the expected shape
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Query execution failed
    #[error("Data access error: {0}")]
    Query(#[source] rusqlite::Error),
}

impl CatalogError {
    /// Create a schema mismatch error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::InvalidColumnType(idx, name, ty) => {
                Self::SchemaMismatch(format!("column {idx} ({name}) has unexpected type {ty}"))
            }
            rusqlite::Error::InvalidColumnIndex(idx) => {
                Self::SchemaMismatch(format!("column index {idx} out of range"))
            }
            rusqlite::Error::SqliteFailure(_, Some(msg))
                if msg.starts_with("no such table") || msg.starts_with("no such column") =>
            {
                Self::SchemaMismatch(msg.clone())
            }
            _ => Self::Query(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_is_schema_mismatch() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELECT * FROM stores").unwrap_err();
        let err = CatalogError::from(err);
        assert!(matches!(err, CatalogError::SchemaMismatch(ref msg) if msg.contains("stores")));
    }

    #[test]
    fn test_other_failures_stay_query_errors() {
        let err = CatalogError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, CatalogError::Query(_)));
        assert!(err.to_string().starts_with("Data access error"));
    }
}
