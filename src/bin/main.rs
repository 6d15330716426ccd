use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use mcp_trial::{DEFAULT_BIND, DEFAULT_PATH, ServerConfig, create_registry};

#[derive(Parser)]
#[command(name = "mcp-trial")]
#[command(about = "Minimal MCP server exposing hello, ping and now tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP Streamable HTTP server
    Http {
        /// Bind address, e.g. 0.0.0.0:8080
        #[arg(long, env = "MCP_TRIAL_BIND", default_value = DEFAULT_BIND)]
        bind: String,
        /// Path the MCP endpoint is mounted at
        #[arg(long, default_value = DEFAULT_PATH)]
        path: String,
        /// Keep server-side sessions instead of the default stateless mode
        #[arg(long, default_value_t = false)]
        stateful: bool,
    },
    /// Run as an MCP stdio server (for use in mcp.json)
    Stdio,
    /// Print the registered tools and exit
    ListTools,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdio mode keeps stdout for the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("mcp_trial=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Duplicate tool names abort startup here.
    let tool_registry = create_registry()?;
    info!("Registered {} tools", tool_registry.len());

    match cli.command {
        Commands::Http {
            bind,
            path,
            stateful,
        } => {
            let config = ServerConfig::new(bind, path).with_stateful(stateful);
            info!(
                "Starting MCP HTTP server (rmcp) on {}{}",
                config.bind, config.path
            );
            mcp_trial::server::start_mcp_http(tool_registry, &config).await?;
        }
        Commands::Stdio => {
            info!("Starting MCP stdio server (rmcp)");
            mcp_trial::server::start_mcp_stdio(tool_registry).await?;
        }
        Commands::ListTools => {
            for descriptor in tool_registry.list() {
                println!("{}: {}", descriptor.name(), descriptor.description());
                for param in descriptor.parameters() {
                    let required = if param.required { "required" } else { "optional" };
                    println!("    {} ({}): {}", param.name, required, param.description);
                }
            }
        }
    }

    Ok(())
}
