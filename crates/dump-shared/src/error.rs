//! Error types for the dump engine.
//!
//! Normalization itself never hands a `DumpError` to its caller: failures are
//! folded into a diagnostic string. The type is still public because config
//! loading and the RPC envelope return it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("{0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid JSON encoding: {0}")]
    InvalidJson(String),

    #[error("maximum dump depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DumpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            DumpError::Encode(_) => -32700,
            DumpError::InvalidJson(_) => -32700,
            DumpError::DepthExceeded { .. } => -32001,
            DumpError::Config(_) => -32002,
            DumpError::Toml(_) => -32007,
        }
    }
}
