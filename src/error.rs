//! Error handling for the catalog core
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling.

use thiserror::Error;

/// Main error type for catalog loading and lookup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while loading catalog data from bundled assets,
/// a directory, or the remote sheet export
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Catalog source '{source_name}' is empty")]
    EmptySource { source_name: String },

    #[error("Fetch failed for sheet '{sheet_id}': {message}")]
    Fetch { sheet_id: String, message: String },

    #[error("No sheet id configured; set {env_var} or pass one explicitly")]
    MissingSheetId { env_var: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_messages_name_the_source() {
        let err = LoadError::EmptySource {
            source_name: "instruments.json".into(),
        };
        assert!(err.to_string().contains("instruments.json"));

        let err = CatalogError::from(LoadError::Fetch {
            sheet_id: "abc123".into(),
            message: "connection refused".into(),
        });
        assert!(err.to_string().contains("abc123"));
    }
}
