//! Crawlboard CLI
//!
//! Command-line dashboard for the Crawlboard server.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "crawlboard")]
#[command(about = "Crawl job dashboard CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "CRAWLBOARD_URL", default_value = "http://localhost:8080")]
    server_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "CRAWLBOARD_TOKEN", default_value = "dev-token")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
