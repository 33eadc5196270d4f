//! tracing setup for dumpctl.
//!
//! Logs go to stderr so stdout carries only the dump.

use dump_shared::LogSettings;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter precedence: `--verbose`, then RUST_LOG, then `log.level`.
pub fn filter(settings: &LogSettings, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

pub fn init(settings: &LogSettings, verbose: bool) {
    // A subscriber may already be installed, e.g. under test.
    let _ = fmt()
        .with_env_filter(filter(settings, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
