use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::request::Verb;

#[derive(Parser)]
#[command(name = "social-api")]
#[command(author, version, about = "Query and stream social media APIs")]
struct Cli {
    /// Path to the config file (default: ~/.config/social-api/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get {
        /// facebook, instagram, tumblr, twitter or github
        provider: String,
        endpoint: String,
        /// Request parameter as key=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Send a POST request
    Post {
        provider: String,
        endpoint: String,
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Send a DELETE request
    Delete {
        provider: String,
        endpoint: String,
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Poll an endpoint and print new items as JSON lines
    Stream {
        /// facebook, instagram or tumblr
        provider: String,
        endpoint: String,
        /// Poll interval in milliseconds (default depends on provider)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Initial Instagram min_tag_id cursor
        #[arg(long)]
        min_tag_id: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Get {
            provider,
            endpoint,
            params,
        } => {
            init_logging();
            cli::request::run(config, Verb::Get, &provider, &endpoint, &params).await
        }
        Commands::Post {
            provider,
            endpoint,
            params,
        } => {
            init_logging();
            cli::request::run(config, Verb::Post, &provider, &endpoint, &params).await
        }
        Commands::Delete {
            provider,
            endpoint,
            params,
        } => {
            init_logging();
            cli::request::run(config, Verb::Delete, &provider, &endpoint, &params).await
        }
        Commands::Stream {
            provider,
            endpoint,
            interval_ms,
            min_tag_id,
        } => {
            init_logging();
            cli::stream::run(config, &provider, &endpoint, interval_ms, min_tag_id).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
