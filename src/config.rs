//! Bot configuration module
//!
//! Loads configuration from an optional `config.json` and environment
//! variables (with `.env` support).

use crate::error::BotError;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use twilight_gateway::Intents;

/// File checked for the bot token before the environment.
pub const CONFIG_FILE: &str = "config.json";

/// Bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token
    pub discord_token: String,

    /// Prefix for text commands
    pub command_prefix: String,

    /// Number of gateway shards to run in this process
    pub total_shards: u64,

    /// How far back to look for an open roster message
    pub recruitment_window: Duration,

    /// Health/metrics HTTP port
    pub http_port: u16,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Shape of `config.json`
#[derive(Debug, Deserialize)]
struct FileConfig {
    token: String,
}

impl BotConfig {
    /// Load configuration from `config.json` and environment variables
    pub fn from_env() -> Result<Self, BotError> {
        dotenvy::dotenv().ok();

        let discord_token = match token_from_file(Path::new(CONFIG_FILE))? {
            Some(token) => token,
            None => env::var("DISCORD_TOKEN")
                .or_else(|_| env::var("TOKEN"))
                .map_err(|_| {
                    BotError::Config(format!(
                        "{CONFIG_FILE}, DISCORD_TOKEN or TOKEN must provide the bot token"
                    ))
                })?,
        };

        let command_prefix = env::var("COMMAND_PREFIX").unwrap_or_else(|_| "!".to_string());
        if command_prefix.trim().is_empty() {
            return Err(BotError::Config("COMMAND_PREFIX must not be blank".to_string()));
        }

        let total_shards: u64 = env::var("TOTAL_SHARDS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|e| BotError::Config(format!("TOTAL_SHARDS must be a valid number: {e}")))?;
        if total_shards == 0 {
            return Err(BotError::Config("TOTAL_SHARDS must be at least 1".to_string()));
        }

        let window_secs: u64 = env::var("RECRUITMENT_WINDOW_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|e| {
                BotError::Config(format!("RECRUITMENT_WINDOW_SECS must be a valid number: {e}"))
            })?;

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "9090".to_string())
            .parse()
            .map_err(|e| BotError::Config(format!("HTTP_PORT must be a valid port number: {e}")))?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            discord_token,
            command_prefix,
            total_shards,
            recruitment_window: Duration::from_secs(window_secs),
            http_port,
            log_level,
        })
    }

    /// Get configured Discord intents
    ///
    /// - GUILDS: guild lifecycle, needed for interactions in guild channels
    /// - GUILD_MESSAGES: prefix commands
    /// - MESSAGE_CONTENT: reading the command text (privileged)
    pub fn intents() -> Intents {
        Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT
    }
}

/// Read the token from `path` if the file exists.
fn token_from_file(path: &Path) -> Result<Option<String>, BotError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(BotError::Config(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    parse_file_config(&content)
        .map(Some)
        .map_err(|e| BotError::Config(format!("{} is invalid: {e}", path.display())))
}

fn parse_file_config(content: &str) -> Result<String, serde_json::Error> {
    serde_json::from_str::<FileConfig>(content).map(|file| file.token)
}
