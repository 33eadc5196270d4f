//! Command execution.
//!
//! Each command returns the text to print so tests can check it directly.

use anyhow::Result;
use dump_shared::{DumpConfig, Dumpable, Normalizer, RpcResponse};
use tracing::{debug, warn};

/// Dump `input`, bare or wrapped in a JSON-RPC response.
pub fn dump(config: &DumpConfig, input: &dyn Dumpable, rpc_id: Option<&str>) -> Result<String> {
    let normalizer = Normalizer::new(&config.normalizer);
    debug!(max_depth = ?normalizer.max_depth(), rpc = rpc_id.is_some(), "dumping input");

    let Some(id) = rpc_id else {
        return Ok(normalizer.dump(input).to_string());
    };

    let resp = RpcResponse::dumped(id, &normalizer, input);
    match render(&resp, config.output.rpc_pretty) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(error = %err, "result could not be encoded, sending error response");
            Ok(render(&RpcResponse::from_error(id, &err), config.output.rpc_pretty)?)
        }
    }
}

fn render(resp: &RpcResponse, pretty: bool) -> Result<String, dump_shared::DumpError> {
    if pretty {
        resp.to_json_pretty()
    } else {
        resp.to_json()
    }
}

/// Render the effective configuration.
pub fn config(config: &DumpConfig) -> Result<String> {
    Ok(config.to_toml()?)
}
