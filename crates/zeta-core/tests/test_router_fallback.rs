//! Integration tests for API-first routing.
//!
//! Uses the real API adapter over a mock transport together with a spy CLI
//! adapter, so both halves of the routing decision are observable.

use serde_json::json;
use std::sync::Arc;
use zeta_core::adapters::api_impl::RpcApiAdapter;
use zeta_core::adapters::cli::ResolvedExecutor;
use zeta_core::adapters::cli_mock::MockCliAdapter;
use zeta_core::adapters::transport_mock::MockTransport;
use zeta_core::router::Via;
use zeta_core::{
    AbstractCommand, AdapterRegistry, Catalog, CommandRouter, EnvOverrides, ExecutionContext,
    RemoteReason, ToolDispatcher, ZetaConfig, ZetaError,
};
use zeta_fmt::ResultFormatter;

fn router(context: ExecutionContext, transport: &MockTransport, cli: &MockCliAdapter) -> CommandRouter {
    let api = RpcApiAdapter::new(ZetaConfig::default(), Arc::new(transport.clone()));
    CommandRouter::new(
        context,
        AdapterRegistry::new(Arc::new(api), Arc::new(cli.clone())),
    )
}

fn local() -> ExecutionContext {
    ExecutionContext::Local(ResolvedExecutor::Global("zetachain".into()))
}

#[tokio::test]
async fn test_api_answer_skips_cli() {
    let transport = MockTransport::new();
    transport.respond_rpc("eth_gasPrice", json!("0x3b9aca00"));
    let cli = MockCliAdapter::with_success();

    let out = router(local(), &transport, &cli)
        .route(&AbstractCommand::new("query fees"))
        .await
        .unwrap();

    assert_eq!(out.via, Via::Api);
    assert!(out.payload.contains("\"gasPriceGwei\": \"1.000000\""));
    assert_eq!(cli.total_calls(), 0);
}

#[tokio::test]
async fn test_unsupported_verb_runs_cli_once_locally() {
    let transport = MockTransport::new();
    let cli = MockCliAdapter::new();
    cli.set_stdout("accounts list", "alice 0x1111");

    let command = AbstractCommand::new("accounts list").arg("--json");
    let out = router(local(), &transport, &cli).route(&command).await.unwrap();

    assert_eq!(out.payload, "alice 0x1111");
    assert_eq!(out.via, Via::Cli);
    let history = cli.get_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], command);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_unsupported_verb_fails_fast_remotely() {
    let transport = MockTransport::new();
    let cli = MockCliAdapter::with_success();
    let context = ExecutionContext::Remote(RemoteReason::Hosted("VERCEL".into()));

    let err = router(context, &transport, &cli)
        .route(&AbstractCommand::new("evm deposit").flag("--amount", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ZetaError::UnsupportedOperation(_)));
    assert_eq!(cli.total_calls(), 0);
}

#[tokio::test]
async fn test_balance_by_name_goes_to_cli_locally() {
    let transport = MockTransport::new();
    let cli = MockCliAdapter::new();
    cli.set_stdout("query balances", "alice: 2 ZETA");

    let command = AbstractCommand::new("query balances").flag("--name", "alice");
    let out = router(local(), &transport, &cli).route(&command).await.unwrap();

    assert_eq!(out.payload, "alice: 2 ZETA");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_rpc_failure_falls_back_locally() {
    let transport = MockTransport::new();
    transport.fail("eth_chainId", "connection refused");
    transport.respond_rpc("eth_blockNumber", json!("0x1"));
    let cli = MockCliAdapter::new();
    cli.set_stdout("query status", "testnet ok");

    let out = router(local(), &transport, &cli)
        .route(&AbstractCommand::new("query status"))
        .await
        .unwrap();

    assert_eq!(out.payload, "testnet ok");
    assert_eq!(cli.call_count("query status"), 1);
}

#[tokio::test]
async fn test_list_fallback_never_reaches_cli() {
    let transport = MockTransport::offline();
    let cli = MockCliAdapter::with_success();

    let out = router(local(), &transport, &cli)
        .route(&AbstractCommand::new("query tokens list"))
        .await
        .unwrap();

    assert_eq!(out.via, Via::Api);
    assert!(out.payload.contains("\"source\": \"fallback\""));
    assert_eq!(cli.total_calls(), 0);
}

#[tokio::test]
async fn test_fallback_keeps_configured_network() {
    let mut config = ZetaConfig::default();
    config
        .apply_env(&EnvOverrides::from_pairs([("ZETACHAIN_NETWORK", "mainnet")]))
        .unwrap();
    let mainnet_rpc = config.networks["mainnet"].rpc_url.clone();

    let transport = MockTransport::new();
    transport.fail("eth_getBalance", "connection refused");
    let cli = MockCliAdapter::new();
    cli.set_stdout("query balances", "1 ZETA");

    let api = RpcApiAdapter::new(config.clone(), Arc::new(transport.clone()));
    let router = CommandRouter::new(
        local(),
        AdapterRegistry::new(Arc::new(api), Arc::new(cli.clone())),
    );
    let dispatcher = ToolDispatcher::new(Catalog::builtin(), router, ResultFormatter::builtin())
        .with_default_network(config.network.clone());

    let result = dispatcher
        .dispatch(
            "get_balances",
            &json!({ "address": "0x1111111111111111111111111111111111111111" }),
        )
        .await;

    assert_eq!(result.text, "1 ZETA");
    assert_eq!(transport.requests()[0].url, mainnet_rpc);
    let history = cli.get_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].flag_value("--network"), Some("mainnet"));
}
