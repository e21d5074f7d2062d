//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding form validation, serialization, and token-file failures.
#[derive(Debug)]
pub enum InventoryError {
    /// An error from the underlying API client.
    Api(inventory_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation. Raised before any request is sent.
    InvalidInput(String),
    /// Reading or writing the local token file failed.
    Io(std::io::Error),
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => match e.server_message() {
                Some(msg) => write!(f, "API error: {} ({})", e, msg),
                None => write!(f, "API error: {}", e),
            },
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<inventory_api::Error> for InventoryError {
    fn from(e: inventory_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for InventoryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
