//! Integration tests for configuration loading and management.
//!
//! Tests config file parsing, defaults, and environment layering.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use zeta_core::config::CONFIG_FILE_NAME;
use zeta_core::{EnvOverrides, ZetaConfig, ZetaError};

#[test]
fn test_config_load_defaults_when_missing() {
    let temp_dir = TempDir::new().unwrap();

    // Load config when file doesn't exist
    let config = ZetaConfig::load(temp_dir.path()).unwrap();

    // Verify defaults
    assert_eq!(config.network, "testnet");
    assert_eq!(config.cli.timeout_secs, 120);
    assert_eq!(config.cli.probe_timeout_secs, 5);
    assert!(config.cli.path.is_none());
    assert!(!config.environment.test_mode);
}

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();

    let config_content = r#"
network = "mainnet"
templates_dir = "/etc/zeta-mcp/templates"

[networks.mainnet]
rpc_url = "https://rpc.mainnet.example"

[networks.testnet]
faucet_url = "https://faucet.example/drip"

[cli]
path = "/usr/local/bin/zeta"
timeout_secs = 30

[http]
timeout_ms = 2500
"#;

    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

    let config = ZetaConfig::load(temp_dir.path()).unwrap();

    assert_eq!(config.network, "mainnet");
    assert_eq!(config.networks["mainnet"].rpc_url, "https://rpc.mainnet.example");
    // Untouched fields of an overridden network keep their defaults
    assert_eq!(config.networks["mainnet"].chain_id, 7000);
    assert_eq!(
        config.networks["testnet"].faucet_url.as_deref(),
        Some("https://faucet.example/drip")
    );
    assert_eq!(config.cli.path, Some(PathBuf::from("/usr/local/bin/zeta")));
    assert_eq!(config.cli.timeout_secs, 30);
    assert_eq!(config.cli.program, "zetachain");
    assert_eq!(config.http.timeout_ms, 2500);
    assert_eq!(
        config.templates_dir,
        Some(PathBuf::from("/etc/zeta-mcp/templates"))
    );
}

#[test]
fn test_config_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid { toml").unwrap();

    let result = ZetaConfig::load(temp_dir.path());
    assert!(matches!(result, Err(ZetaError::ConfigParseError(_))));
}

#[test]
fn test_config_unknown_keys_rejected() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "[cli]\ntimeout = 10\n",
    )
    .unwrap();

    assert!(ZetaConfig::load(temp_dir.path()).is_err());
}

#[test]
fn test_config_zero_timeout_rejected() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "[http]\ntimeout_ms = 0\n",
    )
    .unwrap();

    assert!(matches!(
        ZetaConfig::load(temp_dir.path()),
        Err(ZetaError::InvalidConfig(_))
    ));
}

#[test]
fn test_config_explicit_file_must_exist() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");

    assert!(matches!(
        ZetaConfig::load_file(&path),
        Err(ZetaError::ConfigNotFound(_))
    ));
}

#[test]
fn test_env_overrides_apply_after_file() {
    let temp_dir = TempDir::new().unwrap();

    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "network = \"mainnet\"\n[environment]\nremote = true\n",
    )
    .unwrap();

    let mut config = ZetaConfig::load(temp_dir.path()).unwrap();
    let env = EnvOverrides::from_pairs([
        ("ZETACHAIN_NETWORK", "athens"),
        ("ZETACHAIN_TIMEOUT", "900"),
        ("ZETACHAIN_REMOTE", "0"),
    ]);
    config.apply_env(&env).unwrap();

    assert_eq!(config.network, "testnet");
    assert_eq!(config.http.timeout_ms, 900);
    // A falsy variable never clears a value from the file
    assert!(config.environment.remote);
}
