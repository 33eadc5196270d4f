//! Loading the document to dump.

use anyhow::{Context, Result};
use dump_shared::{Dumpable, Shape};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::cli::InputFormat;

/// A loaded input document
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Json(serde_json::Value),
    Toml(toml::Value),
    Raw(Vec<u8>),
}

impl Input {
    /// Read `path` (`-` for stdin) in the given format.
    pub fn read(path: &Path, format: InputFormat) -> Result<Self> {
        let bytes = if path == Path::new("-") {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        } else {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        };
        tracing::debug!(bytes = bytes.len(), ?format, "input loaded");
        Self::parse(bytes, format)
    }

    pub fn parse(bytes: Vec<u8>, format: InputFormat) -> Result<Self> {
        match format {
            InputFormat::Json => {
                let value = serde_json::from_slice(&bytes).context("input is not valid JSON")?;
                Ok(Input::Json(value))
            }
            InputFormat::Toml => {
                let text = String::from_utf8(bytes).context("TOML input is not UTF-8")?;
                let value = toml::from_str(&text).context("input is not valid TOML")?;
                Ok(Input::Toml(value))
            }
            InputFormat::Raw => Ok(Input::Raw(bytes)),
        }
    }
}

impl Dumpable for Input {
    fn shape(&self) -> Shape<'_> {
        match self {
            Input::Json(value) => value.shape(),
            Input::Toml(value) => value.shape(),
            Input::Raw(bytes) => bytes.shape(),
        }
    }
}
