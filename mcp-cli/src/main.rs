use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mcp_client::{call_many, BatchSummary, JsonObject, McpClient, ServersConfig};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod format;

#[derive(Parser)]
#[command(name = "mcp")]
#[command(about = "Talk to MCP servers over HTTP")]
#[command(version)]
pub struct Cli {
    /// Path to the mcpServers configuration file
    #[arg(short, long, global = true, default_value = "mcp-config.json")]
    pub config: PathBuf,

    /// Server to talk to (defaults to the first one in the file)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the servers named in the configuration file
    Servers,
    #[command(flatten)]
    Server(ServerCommand),
}

/// Commands that talk to a server.
#[derive(Subcommand)]
pub enum ServerCommand {
    /// Initialize and show the server's identity and capabilities
    Info,
    /// List the server's tools
    Tools,
    /// List the server's resources
    Resources,
    /// List the server's prompt templates
    Prompts,
    /// Read a resource
    Read {
        /// URI of the resource
        uri: String,
    },
    /// Call a tool
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long)]
        args: Option<String>,
    },
    /// Call a tool once per argument set, in parallel
    Batch {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object; repeat for each call
        #[arg(short, long = "args", required = true)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ServersConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let command = match cli.command {
        Commands::Servers => {
            for name in config.names() {
                println!("{name}");
            }
            return Ok(());
        }
        Commands::Server(command) => command,
    };

    let name = select_server(&config, cli.server.as_deref())?;
    let profile = config.resolve(&name)?.clone();
    debug!("Using server '{}' at {}", name, profile.url);
    let client = McpClient::new(profile)?;

    let outcome = run(&client, command).await;
    client.close().await;
    outcome
}

async fn run(client: &McpClient, command: ServerCommand) -> Result<()> {
    match command {
        ServerCommand::Info => {
            let info = client.initialize().await.context("initialization failed")?;
            print!("{}", format::server(&info));
        }
        ServerCommand::Tools => {
            let tools = client.list_tools().await.context("failed to list tools")?;
            println!("Available tools: {}", tools.tools.len());
            for tool in &tools.tools {
                println!();
                print!("{}", format::tool(tool));
            }
        }
        ServerCommand::Resources => match client.list_resources().await {
            Ok(resources) => {
                println!("Available resources: {}", resources.resources.len());
                for resource in &resources.resources {
                    println!("  {}", format::resource(resource));
                }
            }
            Err(err) => eprintln!("Could not list resources: {err}"),
        },
        ServerCommand::Prompts => match client.list_prompts().await {
            Ok(prompts) => {
                println!("Available prompts: {}", prompts.prompts.len());
                for prompt in &prompts.prompts {
                    println!("  {}", format::prompt(prompt));
                }
            }
            Err(err) => eprintln!("Could not list prompts: {err}"),
        },
        ServerCommand::Read { uri } => {
            let resource = client
                .read_resource(&uri)
                .await
                .with_context(|| format!("failed to read {uri}"))?;
            for content in &resource.contents {
                match (&content.text, &content.blob) {
                    (Some(text), _) => println!("{text}"),
                    (None, Some(blob)) => println!(
                        "<binary {} ({} base64 bytes)>",
                        content.mime_type.as_deref().unwrap_or("unknown"),
                        blob.len()
                    ),
                    (None, None) => println!("<empty {}>", content.uri),
                }
            }
        }
        ServerCommand::Call { tool, args } => {
            let arguments = args.as_deref().map(parse_args).transpose()?;
            let result = client
                .call_tool(&tool, arguments)
                .await
                .with_context(|| format!("failed to call {tool}"))?;
            print!("{}", format::tool_result(&result));
        }
        ServerCommand::Batch { tool, args } => {
            let calls = args
                .iter()
                .map(|text| Ok((tool.clone(), Some(parse_args(text)?))))
                .collect::<Result<Vec<_>>>()?;

            println!("Calling {} {} time(s) in parallel...", tool, calls.len());
            let outcomes = call_many(client, calls).await;

            for (index, (text, outcome)) in args.iter().zip(&outcomes).enumerate() {
                println!("\n#{} {}", index + 1, text);
                match outcome {
                    Ok(result) if result.is_error() => println!("  ✗ Tool error: {}", result.text()),
                    Ok(result) => println!("  ✓ {}", mcp_client::codec::preview(&result.text())),
                    Err(err) => println!("  ✗ Failed: {err}"),
                }
            }
            println!("\n{}", BatchSummary::from_outcomes(&outcomes));
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn select_server(config: &ServersConfig, requested: Option<&str>) -> Result<String> {
    match requested {
        Some(name) => Ok(name.to_string()),
        None => match config.names().first() {
            Some(name) => Ok(name.to_string()),
            None => bail!("the configuration file names no servers"),
        },
    }
}

fn parse_args(text: &str) -> Result<JsonObject> {
    let value: Value =
        serde_json::from_str(text).with_context(|| format!("invalid JSON arguments: {text}"))?;
    match value {
        Value::Object(object) => Ok(object),
        other => bail!("tool arguments must be a JSON object, got {other}"),
    }
}
