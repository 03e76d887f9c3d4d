//! Feedbell CLI — entry point.
//!
//! # Commands
//!
//! - `feedbell notify --item item.json [--channel ID]` — send one feed item
//!   to the configured Telegram channel
//! - `feedbell notify --title T --enclosure-url URL [--description HTML]` —
//!   same, with inline item fields
//! - `feedbell status` — show configuration state

mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use feedbell_core::config::load_config;
use feedbell_core::FeedItem;
use feedbell_telegram::{Notifier, TelegramClient};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🔔 Feedbell — podcast feed → Telegram channel notifier
#[derive(Parser)]
#[command(name = "feedbell", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a feed item notification to a Telegram channel
    Notify {
        /// Path to a feed item JSON file
        #[arg(short, long, conflicts_with_all = ["title", "enclosure_url"])]
        item: Option<PathBuf>,

        /// Item title (inline alternative to --item)
        #[arg(long)]
        title: Option<String>,

        /// Item description (HTML fragment)
        #[arg(long, default_value = "")]
        description: String,

        /// Enclosure (media) URL
        #[arg(long)]
        enclosure_url: Option<String>,

        /// Destination channel; overrides the configured one
        #[arg(short, long)]
        channel: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Notify {
            item,
            title,
            description,
            enclosure_url,
            channel,
            logs,
        } => {
            init_logging(logs);
            run_notify(item, title, description, enclosure_url, channel).await
        }
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Notify command
// ─────────────────────────────────────────────

async fn run_notify(
    item_path: Option<PathBuf>,
    title: Option<String>,
    description: String,
    enclosure_url: Option<String>,
    channel: Option<String>,
) -> Result<()> {
    let config = load_config(None);

    let item = load_item(item_path, title, description, enclosure_url)?;
    let channel = channel.unwrap_or_else(|| config.telegram.channel.clone());

    let client = TelegramClient::new(&config.telegram.token, config.telegram.timeout)
        .context("failed to construct telegram client")?;

    if !client.is_enabled() {
        info!("telegram token not configured, nothing will be sent");
    } else if channel.is_empty() {
        info!("no destination channel configured, nothing will be sent");
    }

    let notifier: &dyn Notifier = &client;
    notifier
        .send(&channel, &item)
        .await
        .context("telegram send failed")?;

    Ok(())
}

/// Build the feed item from either a JSON file or inline flags.
fn load_item(
    item_path: Option<PathBuf>,
    title: Option<String>,
    description: String,
    enclosure_url: Option<String>,
) -> Result<FeedItem> {
    match item_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read item file: {}", path.display()))?;
            serde_json::from_str(&content).context("failed to parse item JSON")
        }
        None => {
            let title = title.context("either --item or --title/--enclosure-url is required")?;
            let enclosure_url =
                enclosure_url.context("--enclosure-url is required with --title")?;
            Ok(FeedItem::new(title, description, enclosure_url))
        }
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("feedbell=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
