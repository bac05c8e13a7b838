//! Direct network implementation of [`ApiAdapter`].
//!
//! Queries go to the ZetaChain EVM JSON-RPC endpoint or the Cosmos REST API
//! of the selected network. The chain and token lists degrade to a static
//! snapshot when the REST API cannot be reached; every other verb surfaces
//! the failure.

use crate::adapters::api::ApiAdapter;
use crate::adapters::transport::{HttpTransport, rpc_request};
use crate::command::{AbstractCommand, verbs};
use crate::config::{NetworkConfig, ZetaConfig};
use crate::error::{Result, ZetaError};
use crate::fallback::{self, ChainInfo, TokenInfo};
use crate::units::{
    DISPLAY_PRECISION, GWEI_DECIMALS, format_native, format_units, parse_hex_quantity,
};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

const SOURCE_LIVE: &str = "live";
const SOURCE_FALLBACK: &str = "fallback";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChainList {
    network: String,
    source: &'static str,
    count: usize,
    chains: Vec<ChainInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenList {
    network: String,
    source: &'static str,
    count: usize,
    tokens: Vec<TokenInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Balance {
    address: String,
    network: String,
    chain_id: u64,
    symbol: String,
    balance: String,
    balance_wei: String,
    source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Fees {
    network: String,
    chain_id: u64,
    symbol: String,
    gas_price_wei: String,
    gas_price_gwei: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_fee: Option<String>,
    source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaucetDrip {
    address: String,
    network: String,
    status: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkStatus {
    network: String,
    chain_id: u64,
    block_number: u64,
    rpc_url: String,
    healthy: bool,
    checked_at: String,
    source: &'static str,
}

/// API adapter talking to the configured network endpoints.
pub struct RpcApiAdapter {
    config: ZetaConfig,
    transport: Arc<dyn HttpTransport>,
}

impl RpcApiAdapter {
    /// Creates an adapter using `config` for endpoints and `transport` for I/O.
    pub fn new(config: ZetaConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    fn network(&self, command: &AbstractCommand) -> Result<(String, &NetworkConfig)> {
        self.config.network_config(command.flag_value("--network"))
    }

    async fn rpc(&self, url: &str, method: &str, params: Value) -> Result<Value> {
        let resp = self
            .transport
            .post_json(url, &rpc_request(method, params))
            .await?;

        if let Some(error) = resp.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string);
            return Err(ZetaError::Rpc(format!("{method}: {message}")));
        }

        resp.get("result")
            .cloned()
            .ok_or_else(|| ZetaError::MalformedResponse(format!("{method}: response has no result")))
    }

    async fn rpc_quantity(&self, url: &str, method: &str, params: Value) -> Result<u128> {
        let result = self.rpc(url, method, params).await?;
        let hex = result.as_str().ok_or_else(|| {
            ZetaError::MalformedResponse(format!("{method}: expected hex string, got {result}"))
        })?;
        parse_hex_quantity(hex)
    }

    async fn list_chains(&self, command: &AbstractCommand) -> Result<String> {
        let (name, network) = self.network(command)?;
        let url = rest_url(network, "zeta-chain/observer/supportedChains");

        let (chains, source) = match self.fetch_chains(&url).await {
            Ok(chains) => (chains, SOURCE_LIVE),
            Err(e) if e.is_transport_failure() => {
                warn!(network = %name, error = %e, "chain list unavailable, serving static snapshot");
                (fallback::chains(&name), SOURCE_FALLBACK)
            }
            Err(e) => return Err(e),
        };

        to_payload(&ChainList {
            network: name,
            source,
            count: chains.len(),
            chains,
        })
    }

    async fn fetch_chains(&self, url: &str) -> Result<Vec<ChainInfo>> {
        let resp = self.transport.get_json(url).await?;
        let rows = resp
            .get("chains")
            .and_then(Value::as_array)
            .ok_or_else(|| ZetaError::MalformedResponse("supportedChains: missing 'chains'".into()))?;
        rows.iter().map(parse_chain).collect()
    }

    async fn list_tokens(&self, command: &AbstractCommand) -> Result<String> {
        let (name, network) = self.network(command)?;
        let url = rest_url(network, "zeta-chain/fungible/foreign_coins");

        let (tokens, source) = match self.fetch_tokens(&url).await {
            Ok(tokens) => (tokens, SOURCE_LIVE),
            Err(e) if e.is_transport_failure() => {
                warn!(network = %name, error = %e, "token list unavailable, serving static snapshot");
                (fallback::tokens(&name), SOURCE_FALLBACK)
            }
            Err(e) => return Err(e),
        };

        to_payload(&TokenList {
            network: name,
            source,
            count: tokens.len(),
            tokens,
        })
    }

    async fn fetch_tokens(&self, url: &str) -> Result<Vec<TokenInfo>> {
        let resp = self.transport.get_json(url).await?;
        let rows = resp
            .get("foreignCoins")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ZetaError::MalformedResponse("foreign_coins: missing 'foreignCoins'".into())
            })?;
        rows.iter().map(parse_token).collect()
    }

    async fn balances(&self, command: &AbstractCommand) -> Result<String> {
        // Account names live in the CLI's local keystore.
        let address = command.flag_value("--address").ok_or_else(|| {
            ZetaError::UnsupportedOperation(format!("{} by account name", verbs::BALANCES))
        })?;
        validate_evm_address(address)?;
        let (name, network) = self.network(command)?;

        let wei = self
            .rpc_quantity(&network.rpc_url, "eth_getBalance", json!([address, "latest"]))
            .await?;
        debug!(%address, network = %name, %wei, "fetched balance");

        to_payload(&Balance {
            address: address.to_string(),
            network: name,
            chain_id: network.chain_id,
            symbol: network.symbol.clone(),
            balance: format_native(wei),
            balance_wei: wei.to_string(),
            source: SOURCE_LIVE,
        })
    }

    async fn fees(&self, command: &AbstractCommand) -> Result<String> {
        let gas_limit = command
            .flag_value("--gas-limit")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| ZetaError::invalid_argument("gas_limit", "expected a positive integer"))
            })
            .transpose()?;
        let (name, network) = self.network(command)?;

        let gas_price = self
            .rpc_quantity(&network.rpc_url, "eth_gasPrice", json!([]))
            .await?;

        let estimated_fee = gas_limit
            .map(|limit| {
                gas_price
                    .checked_mul(u128::from(limit))
                    .map(format_native)
                    .ok_or_else(|| ZetaError::invalid_argument("gas_limit", "fee estimate overflows"))
            })
            .transpose()?;

        to_payload(&Fees {
            network: name,
            chain_id: network.chain_id,
            symbol: network.symbol.clone(),
            gas_price_wei: gas_price.to_string(),
            gas_price_gwei: format_units(gas_price, GWEI_DECIMALS, DISPLAY_PRECISION),
            gas_limit,
            estimated_fee,
            source: SOURCE_LIVE,
        })
    }

    async fn faucet(&self, command: &AbstractCommand) -> Result<String> {
        let address = command.flag_value("--address").ok_or_else(|| {
            ZetaError::UnsupportedOperation(format!("{} by account name", verbs::FAUCET))
        })?;
        let (name, network) = self.network(command)?;
        if name != "testnet" {
            return Err(ZetaError::UnsupportedOperation(format!(
                "{} on {name}",
                verbs::FAUCET
            )));
        }
        let faucet_url = network.faucet_url.as_deref().ok_or_else(|| {
            ZetaError::UnsupportedOperation(format!("{} without a configured faucet_url", verbs::FAUCET))
        })?;

        let resp = self
            .transport
            .post_json(faucet_url, &json!({ "address": address }))
            .await?;
        let message = resp
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| resp.to_string(), str::to_string);

        to_payload(&FaucetDrip {
            address: address.to_string(),
            network: name,
            status: "submitted",
            message,
        })
    }

    async fn status(&self, command: &AbstractCommand) -> Result<String> {
        let (name, network) = self.network(command)?;
        let url = network.rpc_url.as_str();

        let (chain_id, block_number) = tokio::try_join!(
            self.rpc_quantity(url, "eth_chainId", json!([])),
            self.rpc_quantity(url, "eth_blockNumber", json!([])),
        )?;

        let chain_id = u64::try_from(chain_id)
            .map_err(|_| ZetaError::MalformedResponse(format!("chain id {chain_id} out of range")))?;
        let block_number = u64::try_from(block_number).map_err(|_| {
            ZetaError::MalformedResponse(format!("block number {block_number} out of range"))
        })?;

        let healthy = chain_id == network.chain_id;
        if !healthy {
            warn!(
                network = %name,
                expected = network.chain_id,
                actual = chain_id,
                "rpc endpoint reports an unexpected chain id"
            );
        }

        to_payload(&NetworkStatus {
            network: name,
            chain_id,
            block_number,
            rpc_url: network.rpc_url.clone(),
            healthy,
            checked_at: chrono::Utc::now().to_rfc3339(),
            source: SOURCE_LIVE,
        })
    }
}

impl std::fmt::Debug for RpcApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcApiAdapter")
            .field("network", &self.config.network)
            .field("transport", &"Arc<dyn HttpTransport>")
            .finish()
    }
}

#[async_trait]
impl ApiAdapter for RpcApiAdapter {
    async fn execute(&self, command: &AbstractCommand) -> Result<String> {
        match command.verb.as_str() {
            verbs::LIST_CHAINS => self.list_chains(command).await,
            verbs::LIST_TOKENS => self.list_tokens(command).await,
            verbs::BALANCES => self.balances(command).await,
            verbs::FEES => self.fees(command).await,
            verbs::FAUCET => self.faucet(command).await,
            verbs::STATUS => self.status(command).await,
            other => Err(ZetaError::UnsupportedOperation(other.to_string())),
        }
    }
}

fn rest_url(network: &NetworkConfig, path: &str) -> String {
    format!("{}/{path}", network.api_url.trim_end_matches('/'))
}

fn to_payload<T: Serialize>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

fn validate_evm_address(address: &str) -> Result<()> {
    let valid = address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ZetaError::invalid_argument(
            "address",
            "expected a 0x-prefixed 20-byte hex address",
        ))
    }
}

/// Reads an integer that the REST API may encode as a number or a string.
fn int_field(row: &Value, key: &str) -> Option<u64> {
    match row.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn str_field<'a>(row: &'a Value, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn parse_chain(row: &Value) -> Result<ChainInfo> {
    let chain_id = int_field(row, "chain_id")
        .ok_or_else(|| ZetaError::MalformedResponse(format!("chain without chain_id: {row}")))?;
    let name = str_field(row, "name")
        .or_else(|| str_field(row, "chain_name"))
        .unwrap_or_default();
    Ok(ChainInfo {
        chain_id,
        name: name.to_string(),
        network: str_field(row, "network_type").unwrap_or_default().to_string(),
        vm: str_field(row, "vm").unwrap_or_default().to_string(),
        is_external: row
            .get("is_external")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    })
}

fn parse_token(row: &Value) -> Result<TokenInfo> {
    let symbol = str_field(row, "symbol")
        .ok_or_else(|| ZetaError::MalformedResponse(format!("token without symbol: {row}")))?;
    Ok(TokenInfo {
        symbol: symbol.to_string(),
        name: str_field(row, "name").unwrap_or_default().to_string(),
        zrc20: str_field(row, "zrc20_contract_address")
            .unwrap_or_default()
            .to_string(),
        foreign_chain_id: int_field(row, "foreign_chain_id").unwrap_or_default(),
        decimals: int_field(row, "decimals")
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or_default(),
        coin_type: str_field(row, "coin_type").unwrap_or_default().to_string(),
        paused: row.get("paused").and_then(Value::as_bool).unwrap_or(false),
    })
}
