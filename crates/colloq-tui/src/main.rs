//! Colloq TUI entry point.

use std::path::PathBuf;

use clap::Parser;
use colloq_client::ApiClient;
use colloq_proto::Role;
use colloq_tui::{AuthContext, Runtime, TerminalDriver};
use tracing_subscriber::EnvFilter;

/// Colloq terminal UI client
#[derive(Parser, Debug)]
#[command(name = "colloq")]
#[command(about = "Terminal chat for the paper-review platform")]
#[command(version)]
struct Args {
    /// Base URL of the review-platform API
    #[arg(short, long, default_value = "http://localhost:5000")]
    api_url: String,

    /// Role to browse chats as (user or reviewer)
    ///
    /// If not provided, runs signed out with an empty chat list.
    #[arg(short, long)]
    role: Option<Role>,

    /// Log file (the terminal itself is taken over by the UI)
    #[arg(long, default_value = "colloq.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_file = std::fs::File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    tracing::info!(api_url = %args.api_url, role = ?args.role, "starting");

    let api = ApiClient::new(args.api_url)?;
    let driver = TerminalDriver::new(api)?;
    let runtime = Runtime::new(driver, AuthContext { role: args.role });

    Ok(runtime.run().await?)
}
