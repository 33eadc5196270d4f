//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dumpctl CLI
#[derive(Parser, Debug)]
#[command(name = "dumpctl")]
#[command(about = "Normalize documents into canonical dumps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (overrides $DUMPCTL_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG and log.level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a document and print the dump
    Dump {
        /// Input file, `-` reads stdin
        #[arg(default_value = "-")]
        path: PathBuf,

        /// How to read the input
        #[arg(long, value_enum, default_value_t = InputFormat::Json)]
        format: InputFormat,

        /// Print a JSON-RPC response with this id instead of the bare dump
        #[arg(long, value_name = "ID")]
        rpc: Option<String>,

        /// Deepest nesting level to descend into (overrides normalizer.max_depth)
        #[arg(long, value_parser = parse_max_depth)]
        max_depth: Option<usize>,
    },

    /// Print the effective configuration
    Config,
}

/// Input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// A JSON document
    Json,
    /// A TOML document
    Toml,
    /// Raw bytes, dumped as hex
    Raw,
}

/// Same bound as `normalizer.max_depth` in the config file.
fn parse_max_depth(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(depth) => Ok(depth),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_defaults() {
        let cli = Cli::try_parse_from(["dumpctl", "dump"]).unwrap();
        match cli.command {
            Commands::Dump {
                path,
                format,
                rpc,
                max_depth,
            } => {
                assert_eq!(path, PathBuf::from("-"));
                assert_eq!(format, InputFormat::Json);
                assert!(rpc.is_none());
                assert!(max_depth.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dumpctl", "dump", "feed.toml", "--format", "toml", "--rpc", "7", "-v",
            "--config", "/tmp/c.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(
            cli.command,
            Commands::Dump { format: InputFormat::Toml, rpc: Some(ref id), .. } if id == "7"
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["dumpctl", "dump", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_max_depth_must_be_positive() {
        assert!(Cli::try_parse_from(["dumpctl", "dump", "--max-depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["dumpctl", "dump", "--max-depth", "-1"]).is_err());
        let cli = Cli::try_parse_from(["dumpctl", "dump", "--max-depth", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Dump { max_depth: Some(3), .. }));
    }
}
