use std::path::PathBuf;

use thiserror::Error;

/// Main library error type covering every fatal failure of a catalog run
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parsing error: {path} - {details}")]
    XmlParse { path: PathBuf, details: String },

    #[error("File system traversal error: {path} - {reason}")]
    FileSystemTraversal { path: PathBuf, reason: String },

    #[error("Failed to write catalog {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Directory does not exist or is not a directory: {path}")]
    InvalidDirectory { path: PathBuf },
}

impl From<crate::config::ConfigError> for CatalogError {
    fn from(err: crate::config::ConfigError) -> Self {
        CatalogError::Config(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_error_display() {
        let parse_error = CatalogError::XmlParse {
            path: PathBuf::from("/schemas/broken.xsd"),
            details: "unexpected end of stream".to_string(),
        };
        assert!(parse_error.to_string().contains("XML parsing error"));
        assert!(parse_error.to_string().contains("broken.xsd"));
        assert!(parse_error.to_string().contains("unexpected end of stream"));

        let invalid_dir = CatalogError::InvalidDirectory {
            path: PathBuf::from("/nonexistent"),
        };
        assert!(invalid_dir.to_string().contains("Directory does not exist"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let catalog_error: CatalogError = io_error.into();

        match catalog_error {
            CatalogError::Io(_) => (),
            _ => panic!("Expected CatalogError::Io"),
        }
    }

    #[test]
    fn test_config_error_conversion() {
        let config_error = ConfigError::Validation("xsd_extension must not be empty".to_string());
        let catalog_error: CatalogError = config_error.into();

        match catalog_error {
            CatalogError::Config(message) => assert!(message.contains("xsd_extension")),
            _ => panic!("Expected CatalogError::Config"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let error = CatalogError::Write {
            path: PathBuf::from("out-catalog.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "read-only");
    }
}
