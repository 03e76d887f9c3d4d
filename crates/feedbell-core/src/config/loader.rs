//! Config loader — reads `~/.feedbell/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.feedbell/config.json`
//! 3. Environment variables `FEEDBELL_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `FEEDBELL_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `FEEDBELL_TELEGRAM__TOKEN` → `telegram.token`
/// - `FEEDBELL_TELEGRAM__CHANNEL` → `telegram.channel`
/// - `FEEDBELL_TELEGRAM__TIMEOUT` → `telegram.timeout`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("FEEDBELL_TELEGRAM__TOKEN") {
        config.telegram.token = val;
    }
    if let Ok(val) = std::env::var("FEEDBELL_TELEGRAM__CHANNEL") {
        config.telegram.channel = val;
    }
    if let Ok(val) = std::env::var("FEEDBELL_TELEGRAM__TIMEOUT") {
        if let Ok(t) = val.parse::<u64>() {
            config.telegram.timeout = t;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Tests that read or mutate FEEDBELL_* env vars share a lock so the
    // parallel runner can't interleave them.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert!(!config.telegram.is_configured());
        assert_eq!(config.telegram.timeout, 0);
    }

    #[test]
    fn test_load_valid_json() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json(
            r#"{
            "telegram": {
                "token": "bot123:ABC",
                "channel": "mypodcast"
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.telegram.token, "bot123:ABC");
        assert_eq!(config.telegram.channel, "mypodcast");
        // Default preserved
        assert_eq!(config.telegram.timeout, 0);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert!(!config.telegram.is_configured());
    }

    #[test]
    fn test_load_empty_json() {
        let _guard = ENV_LOCK.lock().unwrap();
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert!(config.telegram.channel.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.telegram.token = "bot123:ABC".to_string();
        config.telegram.channel = "@mypodcast".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.telegram.token, "bot123:ABC");
        assert_eq!(reloaded.telegram.channel, "@mypodcast");
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("FEEDBELL_TELEGRAM__TOKEN", "bot999:XYZ");
        std::env::set_var("FEEDBELL_TELEGRAM__CHANNEL", "envchannel");
        std::env::set_var("FEEDBELL_TELEGRAM__TIMEOUT", "300");

        let config = apply_env_overrides(Config::default());
        assert_eq!(config.telegram.token, "bot999:XYZ");
        assert_eq!(config.telegram.channel, "envchannel");
        assert_eq!(config.telegram.timeout, 300);

        // unparseable timeout is ignored
        std::env::set_var("FEEDBELL_TELEGRAM__TIMEOUT", "not-a-number");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.telegram.timeout, 0);

        std::env::remove_var("FEEDBELL_TELEGRAM__TOKEN");
        std::env::remove_var("FEEDBELL_TELEGRAM__CHANNEL");
        std::env::remove_var("FEEDBELL_TELEGRAM__TIMEOUT");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["telegram"].get("token").is_some());
        assert!(raw["telegram"].get("channel").is_some());
        assert!(raw["telegram"].get("timeout").is_some());
    }
}
