//! zeta-mcp - ZetaChain tools over the Model Context Protocol
//!
//! Serves the tool catalog on stdio by default. The `tools`, `call` and `env`
//! subcommands expose the same machinery for scripting and troubleshooting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use zeta_core::config::{ENV_NETWORK, ENV_RPC_URL, ENV_TIMEOUT};
use zeta_core::{Catalog, EnvOverrides, ZetaConfig, ZetaRuntime};

mod server;

/// zeta-mcp - ZetaChain MCP server
///
/// Answers queries over JSON-RPC and REST where it can, and hands
/// everything else to a local zetachain CLI.
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./zeta-mcp.toml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Default network (testnet or mainnet)
    #[arg(long, global = true)]
    network: Option<String>,

    /// RPC endpoint for the default network
    #[arg(long, global = true, value_name = "URL")]
    rpc_url: Option<String>,

    /// HTTP timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP on stdin/stdout
    Serve,

    /// List the available tools
    Tools {
        /// Print the MCP tool descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Invoke one tool and print its result
    Call {
        /// Tool name, e.g. get_balances
        tool: String,

        /// Tool argument, repeatable. Values that parse as JSON are passed
        /// as JSON, anything else as a string.
        #[arg(short, long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,

        /// All arguments as a single JSON object
        #[arg(long, value_name = "JSON")]
        json_args: Option<String>,
    },

    /// Show the detected execution context
    Env,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli).await {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing on stderr; stdout carries protocol traffic.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("zeta_mcp=debug,zeta_core=debug,zeta_fmt=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("zeta_mcp=info,zeta_core=info,zeta_fmt=info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

async fn run_command(mut cli: Cli) -> Result<()> {
    let command = cli.command.take().unwrap_or(Commands::Serve);

    if let Commands::Tools { json } = command {
        return run_tools(json);
    }

    let config = load_config(&cli).context("Failed to load configuration")?;
    let runtime = ZetaRuntime::new(config)
        .await
        .context("Failed to create runtime")?;

    match command {
        Commands::Serve => {
            info!(context = %runtime.context, network = %runtime.config.network, "starting zeta-mcp");
            server::serve(Arc::new(runtime)).await
        }
        Commands::Call {
            tool,
            args,
            json_args,
        } => run_call(&runtime, &tool, &args, json_args.as_deref()).await,
        Commands::Env => {
            run_env(&runtime);
            Ok(())
        }
        Commands::Tools { .. } => Ok(()),
    }
}

fn run_tools(json: bool) -> Result<()> {
    let catalog = Catalog::builtin();

    if json {
        let tools: Vec<Value> = catalog.iter().map(|spec| spec.to_mcp()).collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    let width = catalog.iter().map(|spec| spec.name.len()).max().unwrap_or(0);
    for spec in catalog.iter() {
        println!("{:width$}  {}", spec.name, spec.description);
    }
    Ok(())
}

async fn run_call(
    runtime: &ZetaRuntime,
    tool: &str,
    args: &[String],
    json_args: Option<&str>,
) -> Result<()> {
    let arguments = build_arguments(args, json_args)?;
    let result = runtime.dispatch(tool, &arguments).await;

    if result.is_error {
        // Already prefixed with "Error: "
        eprintln!("{}", result.text);
        std::process::exit(1);
    }

    println!("{}", result.text);
    Ok(())
}

fn run_env(runtime: &ZetaRuntime) {
    let config = &runtime.config;

    println!("context:  {}", runtime.context);
    println!("network:  {}", config.network);
    if let Ok((_, network)) = config.network_config(None) {
        println!("rpc:      {}", network.rpc_url);
        println!("api:      {}", network.api_url);
        println!("chain id: {}", network.chain_id);
    }
    println!("timeout:  {} ms", config.http.timeout_ms);
}

/// Loads the file layer, then the environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<ZetaConfig> {
    let mut config = match &cli.config {
        Some(path) => ZetaConfig::load_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            ZetaConfig::load(&cwd)?
        }
    };

    config.apply_env(&with_flags(EnvOverrides::from_env(), cli))?;
    Ok(config)
}

/// Flags replace the matching variables, so both layers are applied in one
/// pass and the RPC override lands on the finally selected network.
fn with_flags(mut env: EnvOverrides, cli: &Cli) -> EnvOverrides {
    if let Some(network) = &cli.network {
        env.set(ENV_NETWORK, network.as_str());
    }
    if let Some(rpc_url) = &cli.rpc_url {
        env.set(ENV_RPC_URL, rpc_url.as_str());
    }
    if let Some(ms) = cli.timeout {
        env.set(ENV_TIMEOUT, ms.to_string());
    }
    env
}

fn build_arguments(args: &[String], json_args: Option<&str>) -> Result<Value> {
    let mut arguments = match json_args {
        Some(raw) => match serde_json::from_str(raw).context("--json-args is not valid JSON")? {
            Value::Object(map) => map,
            _ => anyhow::bail!("--json-args must be a JSON object"),
        },
        None => Map::new(),
    };

    for pair in args {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("--arg expects KEY=VALUE, got '{pair}'"))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        arguments.insert(key.trim().to_string(), value);
    }

    Ok(Value::Object(arguments))
}
