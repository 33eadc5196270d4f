//! JSON-RPC 2.0 responses carrying dumped values.
//!
//! Document results are embedded as raw JSON, never re-encoded.

use serde::Serialize;

use crate::error::DumpError;
use crate::normalize::Normalizer;
use crate::shape::Dumpable;
use crate::value::Dump;

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Dump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: String,
}

impl RpcResponse {
    pub fn success(id: impl Into<String>, result: Dump) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: id.into(),
        }
    }

    /// Dump `value` and wrap it as a successful response.
    pub fn dumped(id: impl Into<String>, normalizer: &Normalizer, value: &dyn Dumpable) -> Self {
        Self::success(id, normalizer.dump(value))
    }

    pub fn error(id: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
            id: id.into(),
        }
    }

    pub fn from_error(id: impl Into<String>, err: &DumpError) -> Self {
        Self::error(id, err.code(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn to_json(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DumpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}
