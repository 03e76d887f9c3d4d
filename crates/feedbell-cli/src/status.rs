//! `feedbell status` — show configuration state.
//!
//! Shows config path, token/channel presence, and the effective timeout.

use anyhow::Result;
use colored::Colorize;

use feedbell_core::config::{get_config_path, load_config};
use feedbell_telegram::client::DEFAULT_TIMEOUT_SECS;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🔔 Feedbell Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<12} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Token
    let token_status = if config.telegram.is_configured() {
        format!("{} (token set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<12} {}", "Telegram:".bold(), token_status);

    // Channel
    let channel = if config.telegram.channel.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        config.telegram.channel.clone()
    };
    println!("  {:<12} {}", "Channel:".bold(), channel);

    // Timeout
    let timeout = if config.telegram.timeout == 0 {
        format!("{DEFAULT_TIMEOUT_SECS}s (default)")
    } else {
        format!("{}s", config.telegram.timeout)
    };
    println!("  {:<12} {}", "Timeout:".bold(), timeout);

    println!();

    Ok(())
}
