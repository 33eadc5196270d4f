//! Shared dump engine for oracle tooling.
//!
//! Turns arbitrary domain values (price records, peer statistics, errors)
//! into a canonical [`Dump`] for logs, terminal output and JSON-RPC
//! responses, without every type having to define its own wire format.

pub mod config;
pub mod error;
mod impls;
pub mod normalize;
pub mod rpc;
pub mod shape;
pub mod value;

pub use config::{DumpConfig, LogSettings, NormalizerConfig, OutputSettings};
pub use error::DumpError;
pub use normalize::{dump, Normalizer};
pub use rpc::{RpcError, RpcResponse};
pub use shape::{Capabilities, Dumpable, JsonEncodable, Shape};
pub use value::{Document, Dump, Float, Int};
