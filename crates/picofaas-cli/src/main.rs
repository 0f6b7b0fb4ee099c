//! # picofaas CLI Entry Point
//!
//! Command-line interface for picofaas: start an executor server, or run,
//! deploy and invoke functions against one.
//!
//! ## Usage
//!
//! ```bash
//! # Start a server
//! picofaas serve -b 127.0.0.1:8000
//!
//! # Run a module against a server (outputs raw JSON)
//! picofaas run hello.js --args '["world", 3]'
//!
//! # Deploy a module under a name, then invoke it
//! picofaas deploy greet hello.js
//! picofaas invoke greet --args '["ada"]'
//! ```
//!
//! The server address comes from `--base-url`, the `BASE_URL` environment
//! variable, or the default `http://localhost:8000`, in that order. Module
//! files must contain a single JavaScript function expression.

use anyhow::Result;
use argh::FromArgs;
use picofaas_client::FaasClient;
use picofaas_common::config;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main CLI structure parsed from command-line arguments.
#[derive(FromArgs)]
/// picofaas - a tiny FaaS platform
struct Cli {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Commands {
    Serve(ServeArgs),
    Run(RunArgs),
    Deploy(DeployArgs),
    Invoke(InvokeArgs),
}

/// Arguments for starting the executor server.
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
/// start a picofaas server
struct ServeArgs {
    /// address to bind the HTTP server to
    ///
    /// Defaults to "127.0.0.1:8000", matching the default client base URL.
    #[argh(option, short = 'b', default = "\"127.0.0.1:8000\".into()")]
    bind: String,
}

/// Arguments for running a module once.
///
/// Reads the module file and POSTs its source to the server's `/run`
/// endpoint. The result is printed as raw JSON on stdout so it can be
/// piped into `jq` and friends.
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// run a function module on a server
struct RunArgs {
    /// path to the module to run; must contain a single function expression
    #[argh(positional)]
    module: String,

    /// JSON array of arguments for the function
    ///
    /// Must be valid JSON. Defaults to `[]`.
    #[argh(option, short = 'a', long = "args", default = "\"[]\".into()")]
    args: String,

    /// base URL of the server
    ///
    /// Falls back to the BASE_URL environment variable, then
    /// http://localhost:8000.
    #[argh(option, long = "base-url")]
    base_url: Option<String>,
}

/// Arguments for deploying a module under a name.
#[derive(FromArgs)]
#[argh(subcommand, name = "deploy")]
/// deploy a function module to a server
struct DeployArgs {
    /// name to deploy the function under; redeploys overwrite
    #[argh(positional)]
    name: String,

    /// path to the module to deploy; must contain a single function expression
    #[argh(positional)]
    module: String,

    /// base URL of the server
    ///
    /// Falls back to the BASE_URL environment variable, then
    /// http://localhost:8000.
    #[argh(option, long = "base-url")]
    base_url: Option<String>,
}

/// Arguments for invoking a deployed function by name.
#[derive(FromArgs)]
#[argh(subcommand, name = "invoke")]
/// invoke a deployed function on a server
struct InvokeArgs {
    /// name of the deployed function
    #[argh(positional)]
    name: String,

    /// JSON array of arguments for the function
    ///
    /// Must be valid JSON. Defaults to `[]`.
    #[argh(option, short = 'a', long = "args", default = "\"[]\".into()")]
    args: String,

    /// base URL of the server
    ///
    /// Falls back to the BASE_URL environment variable, then
    /// http://localhost:8000.
    #[argh(option, long = "base-url")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    // Initialize tracing only for serve: the client commands print raw
    // JSON on stdout for unix tool usage (piping to jq, etc.).
    if matches!(cli.command, Commands::Serve(_)) {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::Run(args) => run_run(args).await,
        Commands::Deploy(args) => run_deploy(args).await,
        Commands::Invoke(args) => run_invoke(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let addr: SocketAddr = args
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address {}: {}", args.bind, e))?;

    let registry = Arc::new(picofaas_server::Registry::new());
    let server = picofaas_server::HttpServer::new(registry);
    server.run(addr).await?;

    Ok(())
}

async fn run_run(args: RunArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.module)
        .map_err(|e| anyhow::anyhow!("failed to read module {}: {}", args.module, e))?;
    let call_args = parse_args_json(&args.args)?;

    let client = client_for(args.base_url)?;
    let result = client.run(source, call_args).await?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn run_deploy(args: DeployArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.module)
        .map_err(|e| anyhow::anyhow!("failed to read module {}: {}", args.module, e))?;

    let client = client_for(args.base_url)?;
    let result = client.deploy(&args.name, source).await?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

async fn run_invoke(args: InvokeArgs) -> Result<()> {
    let call_args = parse_args_json(&args.args)?;

    let client = client_for(args.base_url)?;
    let result = client.invoke(&args.name, call_args).await?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn client_for(base_url: Option<String>) -> Result<FaasClient> {
    let base_url = config::resolve_base_url(base_url);
    Ok(FaasClient::new(base_url)?)
}

fn parse_args_json(raw: &str) -> Result<Vec<Value>> {
    serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("invalid JSON in --args (expected an array): {}", e))
}
