//! Configuration types for the ZetaChain tool router.
//!
//! Configuration is layered: built-in defaults, then an optional
//! `zeta-mcp.toml` file, then environment overrides captured once at startup
//! in [`EnvOverrides`]. Nothing below this module reads the process
//! environment directly.

use crate::error::{Result, ZetaError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "zeta-mcp.toml";

/// Environment variable forcing test/CI mode (always remote).
pub const ENV_TEST_MODE: &str = "ZETACHAIN_TEST_MODE";
/// Generic CI marker honoured like [`ENV_TEST_MODE`].
pub const ENV_CI: &str = "CI";
/// Environment variable declaring a remote/cloud deployment.
pub const ENV_REMOTE: &str = "ZETACHAIN_REMOTE";
/// Explicit path to the CLI executable.
pub const ENV_CLI_PATH: &str = "ZETACHAIN_CLI_PATH";
/// Default network override.
pub const ENV_NETWORK: &str = "ZETACHAIN_NETWORK";
/// RPC URL override for the default network.
pub const ENV_RPC_URL: &str = "ZETACHAIN_RPC_URL";
/// HTTP timeout override in milliseconds.
pub const ENV_TIMEOUT: &str = "ZETACHAIN_TIMEOUT";

/// Variables set by hosting platforms; any of them means "remote".
pub const HOSTING_MARKERS: &[&str] = &[
    "VERCEL",
    "RENDER",
    "FLY_APP_NAME",
    "RAILWAY_ENVIRONMENT",
    "K_SERVICE",
];

/// Main router configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ZetaConfig {
    /// Network used when a tool call does not name one.
    pub network: String,

    /// Known networks keyed by name (`mainnet`, `testnet`).
    pub networks: BTreeMap<String, NetworkConfig>,

    /// CLI invocation settings.
    pub cli: CliConfig,

    /// HTTP client settings.
    pub http: HttpConfig,

    /// Environment classification inputs.
    pub environment: EnvironmentConfig,

    /// Directory of result template overrides.
    pub templates_dir: Option<PathBuf>,
}

impl Default for ZetaConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            "mainnet".to_string(),
            NetworkConfig {
                rpc_url: "https://zetachain-evm.blockpi.network/v1/rpc/public".to_string(),
                api_url: "https://zetachain.blockpi.network/lcd/v1/public".to_string(),
                chain_id: 7000,
                symbol: "ZETA".to_string(),
                faucet_url: None,
            },
        );
        networks.insert(
            "testnet".to_string(),
            NetworkConfig {
                rpc_url: "https://zetachain-athens-evm.blockpi.network/v1/rpc/public".to_string(),
                api_url: "https://zetachain-athens.blockpi.network/lcd/v1/public".to_string(),
                chain_id: 7001,
                symbol: "ZETA".to_string(),
                faucet_url: None,
            },
        );

        Self {
            network: "testnet".to_string(),
            networks,
            cli: CliConfig::default(),
            http: HttpConfig::default(),
            environment: EnvironmentConfig::default(),
            templates_dir: None,
        }
    }
}

/// Endpoints and metadata for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// EVM JSON-RPC endpoint.
    pub rpc_url: String,

    /// Cosmos REST (LCD) endpoint.
    pub api_url: String,

    /// EVM chain id.
    pub chain_id: u64,

    /// Native currency symbol.
    pub symbol: String,

    /// Faucet drip endpoint; `None` disables the API faucet path.
    pub faucet_url: Option<String>,
}

/// How the external CLI is located and run.
#[derive(Debug, Clone, Serialize)]
pub struct CliConfig {
    /// Executable name of a global installation.
    pub program: String,

    /// Package name passed to the package runner.
    pub package: String,

    /// Package runner used when no global installation exists.
    pub runner: String,

    /// Explicit executable path; skips all probing when set.
    pub path: Option<PathBuf>,

    /// Upper bound for a CLI invocation.
    pub timeout_secs: u64,

    /// Upper bound for each environment probe.
    pub probe_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: "zetachain".to_string(),
            package: "zetachain".to_string(),
            runner: "npx".to_string(),
            path: None,
            timeout_secs: 120,
            probe_timeout_secs: 5,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: 15_000 }
    }
}

/// Inputs to the remote/local decision that come from outside the process.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentConfig {
    /// Test or CI mode: never touch a local CLI.
    pub test_mode: bool,

    /// Explicitly declared remote deployment.
    pub remote: bool,

    /// Hosting platform marker that was found, if any.
    pub deployment: Option<String>,
}

/// On-disk configuration; every field is optional and overrides the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    network: Option<String>,
    #[serde(default)]
    networks: BTreeMap<String, NetworkFile>,
    cli: Option<CliFile>,
    http: Option<HttpFile>,
    environment: Option<EnvironmentFile>,
    templates_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkFile {
    rpc_url: Option<String>,
    api_url: Option<String>,
    chain_id: Option<u64>,
    symbol: Option<String>,
    faucet_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CliFile {
    program: Option<String>,
    package: Option<String>,
    runner: Option<String>,
    path: Option<PathBuf>,
    timeout_secs: Option<u64>,
    probe_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpFile {
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnvironmentFile {
    test_mode: Option<bool>,
    remote: Option<bool>,
}

impl ZetaConfig {
    /// Loads `zeta-mcp.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::ConfigParseError` for malformed TOML and
    /// `ZetaError::InvalidConfig` if the merged result fails validation.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Loads an explicit configuration file on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::ConfigNotFound` if `path` does not exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ZetaError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| ZetaError::ConfigParseError(format!("{}: {e}", path.display())))?;

        let mut config = Self::default();
        config.merge(file);
        config.validate()?;
        Ok(config)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(network) = file.network {
            self.network = normalize_network(&network);
        }

        for (name, overrides) in file.networks {
            let name = normalize_network(&name);
            let entry = self
                .networks
                .entry(name)
                .or_insert_with(|| NetworkConfig {
                    rpc_url: String::new(),
                    api_url: String::new(),
                    chain_id: 0,
                    symbol: "ZETA".to_string(),
                    faucet_url: None,
                });
            if let Some(v) = overrides.rpc_url {
                entry.rpc_url = v;
            }
            if let Some(v) = overrides.api_url {
                entry.api_url = v;
            }
            if let Some(v) = overrides.chain_id {
                entry.chain_id = v;
            }
            if let Some(v) = overrides.symbol {
                entry.symbol = v;
            }
            if overrides.faucet_url.is_some() {
                entry.faucet_url = overrides.faucet_url;
            }
        }

        if let Some(cli) = file.cli {
            if let Some(v) = cli.program {
                self.cli.program = v;
            }
            if let Some(v) = cli.package {
                self.cli.package = v;
            }
            if let Some(v) = cli.runner {
                self.cli.runner = v;
            }
            if cli.path.is_some() {
                self.cli.path = cli.path;
            }
            if let Some(v) = cli.timeout_secs {
                self.cli.timeout_secs = v;
            }
            if let Some(v) = cli.probe_timeout_secs {
                self.cli.probe_timeout_secs = v;
            }
        }

        if let Some(http) = file.http
            && let Some(v) = http.timeout_ms
        {
            self.http.timeout_ms = v;
        }

        if let Some(env) = file.environment {
            if let Some(v) = env.test_mode {
                self.environment.test_mode = v;
            }
            if let Some(v) = env.remote {
                self.environment.remote = v;
            }
        }

        if file.templates_dir.is_some() {
            self.templates_dir = file.templates_dir;
        }
    }

    /// Applies environment overrides captured at startup.
    ///
    /// Flags only ever switch remote mode on; an unset variable never clears
    /// a value that came from the configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::InvalidConfig` if `ZETACHAIN_TIMEOUT` is not a
    /// positive integer or the resulting configuration is invalid.
    pub fn apply_env(&mut self, env: &EnvOverrides) -> Result<()> {
        if let Some(network) = env.get(ENV_NETWORK) {
            self.network = normalize_network(network);
        }

        if let Some(rpc_url) = env.get(ENV_RPC_URL) {
            let network = self.network.clone();
            self.network_mut(&network)?.rpc_url = rpc_url.to_string();
        }

        if let Some(timeout) = env.get(ENV_TIMEOUT) {
            self.http.timeout_ms = timeout.parse().map_err(|_| {
                ZetaError::InvalidConfig(format!("{ENV_TIMEOUT} must be milliseconds, got '{timeout}'"))
            })?;
        }

        if let Some(path) = env.get(ENV_CLI_PATH) {
            self.cli.path = Some(PathBuf::from(path));
        }

        if env.is_truthy(ENV_TEST_MODE) || env.is_truthy(ENV_CI) {
            self.environment.test_mode = true;
        }

        if env.is_truthy(ENV_REMOTE) {
            self.environment.remote = true;
        }

        if let Some(marker) = HOSTING_MARKERS.iter().find(|m| env.get(m).is_some()) {
            self.environment.deployment = Some((*marker).to_string());
        }

        self.validate()
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.networks.contains_key(&self.network) {
            return Err(ZetaError::InvalidConfig(format!(
                "default network '{}' is not configured",
                self.network
            )));
        }
        for (name, network) in &self.networks {
            if network.rpc_url.trim().is_empty() {
                return Err(ZetaError::InvalidConfig(format!(
                    "network '{name}' has no rpc_url"
                )));
            }
        }
        if self.cli.timeout_secs == 0 || self.cli.probe_timeout_secs == 0 {
            return Err(ZetaError::InvalidConfig(
                "cli timeouts must be greater than zero".to_string(),
            ));
        }
        if self.http.timeout_ms == 0 {
            return Err(ZetaError::InvalidConfig(
                "http.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves a network by name, or the default network for `None`.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::UnknownNetwork` if the name is not configured.
    pub fn network_config(&self, name: Option<&str>) -> Result<(String, &NetworkConfig)> {
        let name = name.map_or_else(|| self.network.clone(), normalize_network);
        let network = self
            .networks
            .get(&name)
            .ok_or_else(|| ZetaError::UnknownNetwork(name.clone()))?;
        Ok((name, network))
    }

    fn network_mut(&mut self, name: &str) -> Result<&mut NetworkConfig> {
        self.networks
            .get_mut(name)
            .ok_or_else(|| ZetaError::UnknownNetwork(name.to_string()))
    }
}

/// Maps user spellings onto configured network names.
pub fn normalize_network(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "athens" | "zeta_testnet" => "testnet".to_string(),
        "zeta_mainnet" => "mainnet".to_string(),
        _ => name,
    }
}

/// Snapshot of the environment variables the router cares about.
///
/// Captured once at process start so detection never depends on the
/// environment changing mid-process, and so tests can supply their own.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    vars: HashMap<String, String>,
}

impl EnvOverrides {
    /// Reads the relevant variables from the process environment.
    pub fn from_env() -> Self {
        let names = [
            ENV_TEST_MODE,
            ENV_CI,
            ENV_REMOTE,
            ENV_CLI_PATH,
            ENV_NETWORK,
            ENV_RPC_URL,
            ENV_TIMEOUT,
        ];
        Self::from_pairs(
            names
                .iter()
                .chain(HOSTING_MARKERS.iter())
                .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v))),
        )
    }

    /// Builds a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Sets `name`, replacing any captured value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Returns a non-empty value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns `true` if `name` holds `1`, `true`, `yes` or `on`.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}
