//! Declarative tool catalog.
//!
//! Every tool is a [`ToolSpec`]: the CLI verb it maps to and an ordered
//! parameter table. Argument validation, command construction and the MCP
//! `inputSchema` are all derived from this table.

use crate::command::verbs;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use ParamKind::{Choice, List, Number, Switch, Text};

/// Value type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form string.
    Text,
    /// Numeric value; strings holding a number are accepted too.
    Number,
    /// Boolean flag without a value.
    Switch,
    /// List of strings.
    List,
    /// String restricted to a fixed set.
    Choice(&'static [&'static str]),
}

/// Where a parameter lands on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Bare token after the verb.
    Positional,
    /// `--flag value` (or just `--flag` for switches).
    Flag(&'static str),
}

/// One parameter of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Argument name in the tool call.
    pub name: &'static str,
    /// Accepted value type.
    pub kind: ParamKind,
    /// Whether the argument must be present.
    pub required: bool,
    /// Human-readable description for the schema.
    pub description: &'static str,
    /// Command line placement.
    pub placement: Placement,
}

impl Param {
    /// A `--flag value` parameter.
    pub const fn flag(
        name: &'static str,
        flag: &'static str,
        kind: ParamKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
            placement: Placement::Flag(flag),
        }
    }

    /// A positional parameter.
    pub const fn positional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
            placement: Placement::Positional,
        }
    }

    /// Marks the parameter as required.
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    fn schema(&self) -> Value {
        let mut schema = match self.kind {
            ParamKind::Text => json!({ "type": "string" }),
            ParamKind::Number => json!({ "type": ["number", "string"] }),
            ParamKind::Switch => json!({ "type": "boolean" }),
            ParamKind::List => json!({ "type": "array", "items": { "type": "string" } }),
            ParamKind::Choice(choices) => json!({ "type": "string", "enum": choices }),
        };
        schema["description"] = json!(self.description);
        schema
    }
}

/// A tool exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// External tool name.
    pub name: &'static str,
    /// Description shown in `tools/list`.
    pub description: &'static str,
    /// CLI verb the tool maps to.
    pub verb: &'static str,
    /// Parameters in command line order.
    pub params: &'static [Param],
    /// Groups of which at least one member must be present.
    pub any_of: &'static [&'static [&'static str]],
}

impl ToolSpec {
    /// Looks up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": false,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        // Only one group is expressible as a top-level anyOf.
        if let Some(group) = self.any_of.first() {
            schema["anyOf"] = group
                .iter()
                .map(|name| json!({ "required": [name] }))
                .collect();
        }
        schema
    }

    /// MCP `tools/list` entry.
    pub fn to_mcp(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Tool name to spec lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: &'static [ToolSpec],
    index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The built-in ZetaChain tool catalog.
    pub fn builtin() -> Self {
        Self::from_specs(TOOLS)
    }

    /// Builds a catalog over an arbitrary tool table.
    pub fn from_specs(tools: &'static [ToolSpec]) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name, i))
            .collect();
        Self { tools, index }
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<&'static ToolSpec> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All tools in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'static, ToolSpec> {
        self.tools.iter()
    }

    /// Number of tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if the catalog has no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const NETWORKS: &[&str] = &["mainnet", "testnet"];
const ACCOUNT_TYPES: &[&str] = &["evm", "solana", "sui", "bitcoin", "ton"];

const NETWORK: Param = Param::flag("network", "--network", Choice(NETWORKS), "Network to use (mainnet or testnet)");
const JSON: Param = Param::flag("json", "--json", Switch, "Emit machine-readable JSON");
const ACCOUNT_TYPE: Param = Param::flag("type", "--type", Choice(ACCOUNT_TYPES), "Account type");
const ACCOUNT_NAME: Param = Param::flag("name", "--name", Text, "Account name").required();
const SIGNER: Param = Param::flag("name", "--name", Text, "Local account used to sign");
const AMOUNT: Param = Param::flag("amount", "--amount", Number, "Amount to send").required();
const RECEIVER: Param = Param::flag("receiver", "--receiver", Text, "Receiver address").required();
const CHAIN_ID: Param = Param::flag("chain_id", "--chain-id", Number, "Source chain id");
const ERC20: Param = Param::flag("erc20", "--erc20", Text, "ERC-20 token address (native asset when omitted)");
const TYPES: Param = Param::flag("types", "--types", List, "ABI types of the call arguments").required();
const VALUES: Param = Param::flag("values", "--values", List, "Call argument values").required();
const ZRC20: Param = Param::flag("zrc20", "--zrc20", Text, "ZRC-20 token address").required();
const FUNCTION: Param = Param::flag("function", "--function", Text, "Function signature on the destination contract").required();
const RECIPIENT: Param = Param::flag("recipient", "--recipient", Text, "Recipient address").required();
const MINT: Param = Param::flag("mint", "--mint", Text, "SPL token mint (SOL when omitted)");
const COIN_TYPE: Param = Param::flag("coin_type", "--coin-type", Text, "Sui coin type (SUI when omitted)");

const PRIVATE_KEY: Param = Param::flag("private_key", "--private-key", Text, "Private key to import");
const MNEMONIC: Param = Param::flag("mnemonic", "--mnemonic", Text, "Mnemonic phrase to import");
const SYMBOL: Param = Param::flag("symbol", "--symbol", Text, "Token symbol, e.g. ETH.ETHSEP").required();
const ADDRESS: Param = Param::flag("address", "--address", Text, "Address to query");
const LOCAL_ACCOUNT: Param = Param::flag("name", "--name", Text, "Local account name");
const GAS_LIMIT: Param = Param::flag("gas_limit", "--gas-limit", Number, "Gas limit used for the fee estimate");
const HASH: Param = Param::flag("hash", "--hash", Text, "Inbound transaction hash").required();
const PROJECT_NAME: Param = Param::positional("name", Text, "Project directory name").required();
const TEMPLATE: Param = Param::flag("template", "--template", Text, "Template to start from");
const LOCALNET_CHAINS: Param = Param::flag(
    "chains",
    "--chains",
    List,
    "Additional chains to start (ethereum, solana, sui, ton)",
);
const PORT: Param = Param::flag("port", "--port", Number, "Anvil port");
const FORCE_KILL: Param = Param::flag("force_kill", "--force-kill", Switch, "Kill processes holding required ports");

const ADDRESS_OR_NAME: &[&[&str]] = &[&["address", "name"]];
const KEY_OR_MNEMONIC: &[&[&str]] = &[&["private_key", "mnemonic"]];

const fn tool(
    name: &'static str,
    description: &'static str,
    verb: &'static str,
    params: &'static [Param],
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        verb,
        params,
        any_of: &[],
    }
}

const fn tool_any_of(
    name: &'static str,
    description: &'static str,
    verb: &'static str,
    params: &'static [Param],
    any_of: &'static [&'static [&'static str]],
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        verb,
        params,
        any_of,
    }
}

/// The built-in tool table.
pub static TOOLS: &[ToolSpec] = &[
    // accounts
    tool(
        "create_account",
        "Create a new local account",
        "accounts create",
        &[ACCOUNT_TYPE, ACCOUNT_NAME],
    ),
    tool_any_of(
        "import_account",
        "Import an account from a private key or mnemonic",
        "accounts import",
        &[
            ACCOUNT_TYPE,
            ACCOUNT_NAME,
            PRIVATE_KEY,
            MNEMONIC,
        ],
        KEY_OR_MNEMONIC,
    ),
    tool("list_accounts", "List local accounts", "accounts list", &[JSON]),
    tool(
        "show_account",
        "Show the addresses of a local account",
        "accounts show",
        &[ACCOUNT_TYPE, ACCOUNT_NAME],
    ),
    tool(
        "delete_account",
        "Delete a local account",
        "accounts delete",
        &[ACCOUNT_TYPE, ACCOUNT_NAME],
    ),
    // queries
    tool(
        "list_chains",
        "List chains connected to ZetaChain",
        verbs::LIST_CHAINS,
        &[NETWORK],
    ),
    tool(
        "list_tokens",
        "List ZRC-20 tokens registered on ZetaChain",
        verbs::LIST_TOKENS,
        &[NETWORK],
    ),
    tool(
        "show_token",
        "Show details of a ZRC-20 token",
        "query tokens show",
        &[
            SYMBOL,
            NETWORK,
        ],
    ),
    tool_any_of(
        "get_balances",
        "Get the native ZETA balance of an address or local account",
        verbs::BALANCES,
        &[
            ADDRESS,
            LOCAL_ACCOUNT,
            NETWORK,
        ],
        ADDRESS_OR_NAME,
    ),
    tool(
        "get_fees",
        "Get the current gas price and an optional fee estimate",
        verbs::FEES,
        &[
            NETWORK,
            GAS_LIMIT,
        ],
    ),
    tool(
        "get_network_status",
        "Check RPC reachability, chain id and latest block",
        verbs::STATUS,
        &[NETWORK],
    ),
    tool(
        "get_cctx",
        "Track a cross-chain transaction by inbound hash",
        "query cctx",
        &[
            HASH,
            NETWORK,
        ],
    ),
    tool(
        "list_contracts",
        "List protocol contract addresses",
        "query contracts list",
        &[NETWORK, JSON],
    ),
    // faucet and projects
    tool_any_of(
        "request_faucet",
        "Request testnet ZETA from the faucet",
        verbs::FAUCET,
        &[
            ADDRESS,
            LOCAL_ACCOUNT,
            NETWORK,
        ],
        ADDRESS_OR_NAME,
    ),
    tool(
        "create_project",
        "Create a new universal app project from a template",
        "new",
        &[
            PROJECT_NAME,
            TEMPLATE,
        ],
    ),
    // EVM gateway
    tool(
        "evm_deposit",
        "Deposit tokens from an EVM chain to ZetaChain",
        "evm deposit",
        &[AMOUNT, RECEIVER, CHAIN_ID, ERC20, SIGNER],
    ),
    tool(
        "evm_deposit_and_call",
        "Deposit tokens from an EVM chain and call a universal contract",
        "evm deposit-and-call",
        &[AMOUNT, RECEIVER, CHAIN_ID, ERC20, TYPES, VALUES, SIGNER],
    ),
    tool(
        "evm_call",
        "Call a universal contract from an EVM chain",
        "evm call",
        &[RECEIVER, CHAIN_ID, TYPES, VALUES, SIGNER],
    ),
    // ZetaChain gateway
    tool(
        "zetachain_withdraw",
        "Withdraw ZRC-20 tokens from ZetaChain to a connected chain",
        "zetachain withdraw",
        &[AMOUNT, RECEIVER, ZRC20, SIGNER],
    ),
    tool(
        "zetachain_withdraw_and_call",
        "Withdraw ZRC-20 tokens and call a contract on a connected chain",
        "zetachain withdraw-and-call",
        &[AMOUNT, RECEIVER, ZRC20, FUNCTION, TYPES, VALUES, SIGNER],
    ),
    tool(
        "zetachain_call",
        "Call a contract on a connected chain from ZetaChain",
        "zetachain call",
        &[RECEIVER, ZRC20, FUNCTION, TYPES, VALUES, SIGNER],
    ),
    // Solana gateway
    tool(
        "solana_deposit",
        "Deposit SOL or SPL tokens from Solana to ZetaChain",
        "solana deposit",
        &[AMOUNT, RECIPIENT, MINT, SIGNER],
    ),
    tool(
        "solana_deposit_and_call",
        "Deposit from Solana and call a universal contract",
        "solana deposit-and-call",
        &[AMOUNT, RECIPIENT, MINT, TYPES, VALUES, SIGNER],
    ),
    // Sui gateway
    tool(
        "sui_deposit",
        "Deposit coins from Sui to ZetaChain",
        "sui deposit",
        &[AMOUNT, RECEIVER, COIN_TYPE, SIGNER],
    ),
    tool(
        "sui_deposit_and_call",
        "Deposit from Sui and call a universal contract",
        "sui deposit-and-call",
        &[AMOUNT, RECEIVER, COIN_TYPE, TYPES, VALUES, SIGNER],
    ),
    // Bitcoin gateway
    tool(
        "bitcoin_deposit",
        "Deposit BTC to ZetaChain",
        "bitcoin deposit",
        &[AMOUNT, RECEIVER, SIGNER],
    ),
    tool(
        "bitcoin_deposit_and_call",
        "Deposit BTC and call a universal contract",
        "bitcoin deposit-and-call",
        &[AMOUNT, RECEIVER, TYPES, VALUES, SIGNER],
    ),
    // TON gateway
    tool(
        "ton_deposit",
        "Deposit TON to ZetaChain",
        "ton deposit",
        &[AMOUNT, RECEIVER, SIGNER],
    ),
    tool(
        "ton_deposit_and_call",
        "Deposit TON and call a universal contract",
        "ton deposit-and-call",
        &[AMOUNT, RECEIVER, TYPES, VALUES, SIGNER],
    ),
    // localnet
    tool(
        "localnet_start",
        "Start a local development network",
        "localnet start",
        &[LOCALNET_CHAINS, PORT, FORCE_KILL],
    ),
    tool("localnet_stop", "Stop the local development network", "localnet stop", &[]),
    tool("localnet_check", "Check whether localnet is running", "localnet check", &[]),
];
