//! Error types for the class select system.
//!
//! Declaration scanning, parsing and option assembly never fail. Errors only
//! come from the edges: loading configuration and talking to a cache backend.

use std::path::PathBuf;

/// Result type alias for class select operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the edges of the class select system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be decoded.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A registry could not be encoded for the cache.
    #[error("Failed to encode cached registry: {0}")]
    CacheEncode(#[source] serde_json::Error),

    /// A cached payload could not be decoded back into a registry.
    #[error("Failed to decode cached registry '{name}': {source}")]
    CacheDecode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The cache backend refused an operation.
    #[error("Cache backend '{name}' unavailable: {message}")]
    CacheBackend { name: String, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a cache decode error.
    pub fn cache_decode(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CacheDecode {
            name: name.into(),
            source,
        }
    }

    /// Create a cache backend error.
    pub fn cache_backend(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CacheBackend {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
