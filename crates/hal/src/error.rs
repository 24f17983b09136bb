//! Error types for HAL transformation and rendering.

use thiserror::Error;

/// Errors raised while building, transforming or rendering a HAL document.
#[derive(Error, Debug)]
pub enum HalError {
    /// The mapping registry holds no user mappings at all.
    ///
    /// This is a setup error raised before any node is visited. A nested type
    /// that simply lacks a mapping is not an error; it is rendered in place.
    #[error("no mappings were provided to the transformer")]
    NoMappings,

    /// A mapping definition is unusable.
    #[error("invalid mapping for `{class}`: {reason}")]
    InvalidMapping { class: String, reason: String },

    /// The object-graph producer could not represent a value.
    #[error("cannot build a tree from this value: {0}")]
    Producer(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML writing failed.
    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while writing rendered output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl From<String> for HalError {
    fn from(msg: String) -> Self {
        HalError::Custom(msg)
    }
}

impl From<&str> for HalError {
    fn from(msg: &str) -> Self {
        HalError::Custom(msg.to_string())
    }
}

// The producer is a serde serializer and reports through this hook.
impl serde::ser::Error for HalError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        HalError::Producer(msg.to_string())
    }
}

/// Result type alias for HAL operations.
pub type Result<T> = std::result::Result<T, HalError>;
