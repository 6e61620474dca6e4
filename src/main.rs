//! Lumen server binary: HTTP server and one-shot research CLI.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use lumen::agents::AgentRegistry;
use lumen::types::{Domain, ResearchRequest};
use lumen::{api, cli, export, AppState, LumenConfig};

#[derive(Parser)]
#[command(name = "lumen-server", version, about = "Multi-agent research server")]
struct Cli {
    /// Path to lumen.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use deterministic offline mock agents instead of live APIs
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one research pass and print the report
    Research {
        /// The research question
        query: String,

        /// Research domain: stocks, medical, academic, technology, general
        #[arg(long, default_value = "general")]
        domain: String,

        /// Comma-separated agent names (default: all registered)
        #[arg(long, value_delimiter = ',')]
        agents: Option<Vec<String>>,

        /// Per-agent source budget
        #[arg(long)]
        max_sources: Option<usize>,

        /// Output format: text, json, or markdown
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let mut config = LumenConfig::load_or_default(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let registry = if args.mock {
        tracing::info!("mock mode: registering offline agents");
        AgentRegistry::mock()
    } else {
        AgentRegistry::from_config(&config.agents)
    };

    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(config, registry);

            let app = api::routes::create_router()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .with_state(state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!(%addr, "lumen server listening");
            axum::serve(listener, app).await.context("server error")?;
        }
        Command::Research {
            query,
            domain,
            agents,
            max_sources,
            format,
        } => {
            let state = AppState::new(config, registry);
            let request = ResearchRequest {
                query,
                domain: Domain::from_str_loose(&domain),
                agents,
                max_sources,
            };

            let result = state.coordinator.execute(&request).await?;
            let entry = state.history.record(result);

            match format.as_str() {
                "json" => println!("{}", export::to_json(&entry)?),
                "markdown" | "md" => println!("{}", export::to_markdown(&entry)),
                _ => cli::output::print_report(&entry.result),
            }
        }
    }

    Ok(())
}
