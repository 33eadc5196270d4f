//! dumpctl - print canonical dumps of JSON, TOML or raw input.

use anyhow::{Context, Result};
use clap::Parser;
use dump_shared::DumpConfig;

use dumpctl::cli::{Cli, Commands};
use dumpctl::input::Input;
use dumpctl::{commands, logging};

fn load_config(cli: &Cli) -> Result<DumpConfig> {
    let config = match &cli.config {
        Some(path) => DumpConfig::load_from(path),
        None => DumpConfig::load(),
    };
    config.context("failed to load configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    logging::init(&config.log, cli.verbose);

    let output = match cli.command {
        Commands::Dump {
            path,
            format,
            rpc,
            max_depth,
        } => {
            if max_depth.is_some() {
                config.normalizer.max_depth = max_depth;
            }
            let input = Input::read(&path, format)?;
            commands::dump(&config, &input, rpc.as_deref())?
        }
        Commands::Config => commands::config(&config)?,
    };

    println!("{}", output);
    Ok(())
}
