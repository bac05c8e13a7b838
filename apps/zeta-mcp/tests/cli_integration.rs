//! Integration tests for the zeta-mcp binary.
//!
//! Every command runs in test mode from an empty temporary directory, so no
//! CLI is probed and no stray config file is picked up.

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn zeta_mcp(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zeta-mcp"));
    cmd.current_dir(dir.path())
        .env("ZETACHAIN_TEST_MODE", "1")
        .env_remove("ZETACHAIN_NETWORK")
        .env_remove("ZETACHAIN_RPC_URL")
        .env_remove("ZETACHAIN_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Result<Output> {
    let dir = TempDir::new()?;
    Ok(zeta_mcp(&dir).args(args).output()?)
}

#[test]
fn test_cli_version() -> Result<()> {
    let output = run(&["--version"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("zeta-mcp"));

    Ok(())
}

#[test]
fn test_cli_help() -> Result<()> {
    let output = run(&["--help"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("tools"));
    assert!(stdout.contains("call"));
    assert!(stdout.contains("env"));

    Ok(())
}

#[test]
fn test_tools_lists_catalog() -> Result<()> {
    let output = run(&["tools"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("get_balances"));
    assert!(stdout.contains("localnet_start"));

    Ok(())
}

#[test]
fn test_tools_json_is_mcp_descriptors() -> Result<()> {
    let output = run(&["tools", "--json"])?;

    assert!(output.status.success());
    let tools: Vec<Value> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(tools.len(), 32);
    assert!(
        tools
            .iter()
            .all(|t| t["inputSchema"]["type"] == "object" && t["name"].is_string())
    );

    Ok(())
}

#[test]
fn test_call_unknown_tool_fails() -> Result<()> {
    let output = run(&["call", "frobnicate"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unknown tool: frobnicate"));

    Ok(())
}

#[test]
fn test_call_missing_argument_fails() -> Result<()> {
    let output = run(&["call", "get_balances"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("missing required argument"));

    Ok(())
}

#[test]
fn test_call_cli_only_operation_fails_remotely() -> Result<()> {
    let output = run(&["call", "get_balances", "--arg", "name=alice"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("not available through the network API"));

    Ok(())
}

#[test]
fn test_call_bad_arg_syntax_fails() -> Result<()> {
    let output = run(&["call", "get_fees", "--arg", "gas_limit"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("KEY=VALUE"));

    Ok(())
}

#[test]
fn test_list_chains_falls_back_when_api_unreachable() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("zeta-mcp.toml"),
        "[networks.testnet]\napi_url = \"http://127.0.0.1:9\"\n",
    )?;

    let output = zeta_mcp(&dir)
        .args(["--timeout", "2000", "call", "list_chains"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("static list"), "{stdout}");

    Ok(())
}

#[test]
fn test_env_reports_test_mode() -> Result<()> {
    let output = run(&["env", "--network", "athens"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("remote (test mode)"));
    assert!(stdout.contains("network:  testnet"));

    Ok(())
}

#[test]
fn test_missing_config_file_fails() -> Result<()> {
    let output = run(&["--config", "/nonexistent/zeta-mcp.toml", "env"])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("config file not found"));

    Ok(())
}

#[test]
fn test_serve_session() -> Result<()> {
    let dir = TempDir::new()?;
    let mut child = zeta_mcp(&dir)
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        let session = [
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18"}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"frobnicate","arguments":{}}}"#,
            "this is not json",
        ];
        for line in session {
            writeln!(stdin, "{line}")?;
        }
    }

    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut by_id = HashMap::new();
    let mut parse_errors = 0;
    for line in stdout.lines() {
        let message: Value = serde_json::from_str(line)?;
        match message["id"].as_i64() {
            Some(id) => {
                by_id.insert(id, message);
            }
            None => {
                assert_eq!(message["error"]["code"], -32700);
                parse_errors += 1;
            }
        }
    }

    assert_eq!(by_id.len(), 3);
    assert_eq!(parse_errors, 1);
    assert_eq!(by_id[&1]["result"]["protocolVersion"], "2025-06-18");
    assert_eq!(
        by_id[&2]["result"]["tools"].as_array().map(Vec::len),
        Some(32)
    );
    assert_eq!(by_id[&3]["result"]["isError"], true);

    Ok(())
}
