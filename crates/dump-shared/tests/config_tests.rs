//! Tests for config.rs

use dump_shared::{DumpConfig, DumpError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[normalizer]\nmax_depth = 32\n\n[log]\nlevel = \"debug\"\n\n[output]\nrpc_pretty = true"
    )
    .unwrap();

    let config = DumpConfig::load_from(file.path()).unwrap();
    assert_eq!(config.normalizer.max_depth, Some(32));
    assert_eq!(config.log.level, "debug");
    assert!(config.output.rpc_pretty);
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = DumpConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, DumpError::Config(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_load_rejects_bad_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[normalizer\nmax_depth = ").unwrap();
    let err = DumpConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, DumpError::Toml(_)));
}

#[test]
fn test_load_rejects_wrong_type() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[normalizer]\nmax_depth = \"deep\"").unwrap();
    assert!(DumpConfig::load_from(file.path()).is_err());
}

#[test]
fn test_rendered_config_lists_sections() {
    let text = DumpConfig::default().to_toml().unwrap();
    assert!(text.contains("[log]"));
    assert!(text.contains("level = \"info\""));
    assert!(text.contains("rpc_pretty = false"));
}
