//! Error types for the clusterlint core library
//!
//! These are operational failures: reading manifests, parsing catalogs,
//! resolving machine types. Rule violations found in a configuration are not
//! errors in this sense; they are collected into a
//! [`ErrorList`](crate::validation::ErrorList) and returned.

use thiserror::Error;

/// Main error type for clusterlint operations
#[derive(Error, Debug)]
pub enum Error {
    /// Machine type lookup failed
    #[error("Unknown machine type: {name}")]
    UnknownMachineType {
        name: String,
    },

    /// Machine type catalog could not be loaded or extended
    #[error("Catalog error: {message}")]
    Catalog {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Manifest document could not be interpreted
    #[error("Manifest error{}: {message}", .document.map(|d| format!(" in document {}", d)).unwrap_or_default())]
    Manifest {
        message: String,
        document: Option<usize>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing and serialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a catalog error without an underlying cause
    pub fn catalog(message: impl Into<String>) -> Self {
        Error::Catalog {
            message: message.into(),
            source: None,
        }
    }

    /// Create a manifest error, optionally pointing at a document index
    pub fn manifest(message: impl Into<String>, document: Option<usize>) -> Self {
        Error::Manifest {
            message: message.into(),
            document,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownMachineType {
            name: "bogus.type".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown machine type: bogus.type");
    }

    #[test]
    fn test_manifest_error_display() {
        let err = Error::manifest("unsupported kind \"Pod\"", Some(2));
        assert_eq!(err.to_string(), "Manifest error in document 2: unsupported kind \"Pod\"");

        let err = Error::manifest("empty manifest", None);
        assert_eq!(err.to_string(), "Manifest error: empty manifest");
    }

    #[test]
    fn test_io_conversion_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
