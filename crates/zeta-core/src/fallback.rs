//! Static catalogs served when the network API cannot be reached.
//!
//! Only the read-only list queries have a fallback. The data is a snapshot
//! and may be stale; payloads built from it are marked `"source": "fallback"`.

use serde::Serialize;

/// A connected chain as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    /// Chain id (EVM chain id or ZetaChain's id for non-EVM chains).
    pub chain_id: u64,
    /// Human-readable name.
    pub name: String,
    /// `mainnet` or `testnet` as reported by the observer module.
    pub network: String,
    /// Virtual machine family, e.g. `evm`, `svm`, `no_vm`.
    pub vm: String,
    /// `false` only for ZetaChain itself.
    pub is_external: bool,
}

/// A ZRC-20 token registered on ZetaChain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Token symbol.
    pub symbol: String,
    /// Token name.
    pub name: String,
    /// ZRC-20 contract address on ZetaChain.
    pub zrc20: String,
    /// Chain the asset originates from.
    pub foreign_chain_id: u64,
    /// Decimals of the asset.
    pub decimals: u32,
    /// `Gas`, `ERC20` or another coin type.
    pub coin_type: String,
    /// Whether deposits/withdrawals are paused.
    pub paused: bool,
}

type ChainRow = (u64, &'static str, &'static str);

const TESTNET_CHAINS: &[ChainRow] = &[
    (7001, "zeta_testnet", "zevm"),
    (11155111, "sepolia_testnet", "evm"),
    (97, "bsc_testnet", "evm"),
    (80002, "amoy_testnet", "evm"),
    (84532, "base_sepolia", "evm"),
    (421614, "arbitrum_sepolia", "evm"),
    (43113, "avalanche_testnet", "evm"),
    (18333, "bitcoin_signet_testnet", "no_vm"),
    (901, "solana_devnet", "svm"),
    (103, "sui_testnet", "mvm_sui"),
    (2015141, "ton_testnet", "tvm"),
];

const MAINNET_CHAINS: &[ChainRow] = &[
    (7000, "zeta_mainnet", "zevm"),
    (1, "eth_mainnet", "evm"),
    (56, "bsc_mainnet", "evm"),
    (137, "polygon_mainnet", "evm"),
    (8453, "base_mainnet", "evm"),
    (42161, "arbitrum_mainnet", "evm"),
    (43114, "avalanche_mainnet", "evm"),
    (8332, "btc_mainnet", "no_vm"),
    (900, "solana_mainnet", "svm"),
    (105, "sui_mainnet", "mvm_sui"),
    (2015140, "ton_mainnet", "tvm"),
];

type TokenRow = (&'static str, &'static str, &'static str, u64, u32, &'static str);

const TESTNET_TOKENS: &[TokenRow] = &[
    ("ETH.ETHSEP", "ZetaChain ZRC20 ETH on Sepolia", "0x05BA149A7bd6dC1F937fA9046A9e05C05f3b18b0", 11155111, 18, "Gas"),
    ("USDC.ETHSEP", "ZetaChain ZRC20 USDC on Sepolia", "0xcC683A782f4B30c138787CB5576a86AF66fdc31d", 11155111, 6, "ERC20"),
    ("BNB.BSC", "ZetaChain ZRC20 BNB on BSC Testnet", "0xd97B1de3619ed2c6BEb3860147E30cA8A7dC9891", 97, 18, "Gas"),
    ("POL.AMOY", "ZetaChain ZRC20 POL on Amoy", "0x777915D031d1e8144c90D025C594b3b8Bf07a08d", 80002, 18, "Gas"),
    ("ETH.BASESEP", "ZetaChain ZRC20 ETH on Base Sepolia", "0x236b0DE675cC8F46AE186897fCCeFe3370C9eDeD", 84532, 18, "Gas"),
    ("ETH.ARBSEP", "ZetaChain ZRC20 ETH on Arbitrum Sepolia", "0x1de70f3e971B62A0707dA18100392af14f7fB677", 421614, 18, "Gas"),
    ("sBTC.BTC", "ZetaChain ZRC20 BTC on Signet", "0xdbfF6471a79E5374d771922F2194eccc42210B9F", 18333, 8, "Gas"),
    ("SOL.SOL", "ZetaChain ZRC20 SOL on Solana Devnet", "0xADF73ebA3Ebaa7254E859549A44c74eF7cff7501", 901, 9, "Gas"),
    ("SUI.SUI", "ZetaChain ZRC20 SUI on Sui Testnet", "0x3e128c169564DD527C8e9bd85124BF6A890E5a5f", 103, 9, "Gas"),
    ("TON.TON", "ZetaChain ZRC20 TON on TON Testnet", "0x54Bf2B1E91FCb56853097BD2545750d218E245e1", 2015141, 9, "Gas"),
];

const MAINNET_TOKENS: &[TokenRow] = &[
    ("ETH.ETH", "ZetaChain ZRC20 ETH on Ethereum", "0xd97B1de3619ed2c6BEb3860147E30cA8A7dC9891", 1, 18, "Gas"),
    ("USDC.ETH", "ZetaChain ZRC20 USDC on Ethereum", "0x0cbe0dF132a6c6B4a2974Fa1b7Fb953CF0Cc798a", 1, 6, "ERC20"),
    ("USDT.ETH", "ZetaChain ZRC20 USDT on Ethereum", "0x7c8dDa80bbBE1254a7aACf3219EBe1481c6E01d7", 1, 6, "ERC20"),
    ("BNB.BSC", "ZetaChain ZRC20 BNB on BSC", "0x48f80608B672DC30DC7e3dbBd0343c5F02C738Eb", 56, 18, "Gas"),
    ("POL.POLYGON", "ZetaChain ZRC20 POL on Polygon", "0xADF73ebA3Ebaa7254E859549A44c74eF7cff7501", 137, 18, "Gas"),
    ("ETH.BASE", "ZetaChain ZRC20 ETH on Base", "0x1de70f3e971B62A0707dA18100392af14f7fB677", 8453, 18, "Gas"),
    ("BTC.BTC", "ZetaChain ZRC20 BTC on Bitcoin", "0x13A0c5930C028511Dc02665E7285134B6d11A5f4", 8332, 8, "Gas"),
    ("SOL.SOL", "ZetaChain ZRC20 SOL on Solana", "0x4bC32034caCcc9B7e02536945eDbC286bACbA073", 900, 9, "Gas"),
];

/// Static chain list for `network`; unknown networks get the testnet list.
pub fn chains(network: &str) -> Vec<ChainInfo> {
    let (rows, label) = if network == "mainnet" {
        (MAINNET_CHAINS, "mainnet")
    } else {
        (TESTNET_CHAINS, "testnet")
    };
    rows.iter()
        .map(|&(chain_id, name, vm)| ChainInfo {
            chain_id,
            name: name.to_string(),
            network: label.to_string(),
            vm: vm.to_string(),
            is_external: vm != "zevm",
        })
        .collect()
}

/// Static ZRC-20 token list for `network`; unknown networks get testnet.
pub fn tokens(network: &str) -> Vec<TokenInfo> {
    let rows = if network == "mainnet" {
        MAINNET_TOKENS
    } else {
        TESTNET_TOKENS
    };
    rows.iter()
        .map(
            |&(symbol, name, zrc20, foreign_chain_id, decimals, coin_type)| TokenInfo {
                symbol: symbol.to_string(),
                name: name.to_string(),
                zrc20: zrc20.to_string(),
                foreign_chain_id,
                decimals,
                coin_type: coin_type.to_string(),
                paused: false,
            },
        )
        .collect()
}
