//! # Bot Configuration
//!
//! Static configuration read once at startup from a YAML (or JSON) file.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Accept JSON config files and string guild ids
//! - 1.0.0: Initial implementation

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the config file
pub const CONFIG_PATH_ENV_VAR: &str = "BOT_CONFIG";
/// Environment variable overriding the token from the config file
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";
/// Config file used when `BOT_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("no bot token configured (set `token` in the config file or DISCORD_TOKEN)")]
    MissingToken,
}

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Bot authentication token
    #[serde(default)]
    pub token: String,

    /// Directory of declarative command files
    #[serde(default)]
    pub commands_dir: Option<PathBuf>,

    /// Presence shown once the bot is ready
    #[serde(default)]
    pub presence: PresenceConfig,

    /// Guilds per guild group, keyed by group name
    #[serde(default)]
    pub guild_groups: BTreeMap<String, Vec<GuildEntry>>,
}

/// A guild that receives a group's commands in production
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuildEntry {
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub id: u64,

    /// Display name, used only for logging
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresenceConfig {
    /// "Playing ..." activity text, none when unset
    #[serde(default)]
    pub activity: Option<String>,

    #[serde(default)]
    pub status: PresenceStatus,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            activity: None,
            status: PresenceStatus::Online,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    #[default]
    Online,
    Idle,
    Dnd,
    Invisible,
}

impl BotConfig {
    /// Load configuration from the path in `BOT_CONFIG` (or `config.yaml`),
    /// applying the `DISCORD_TOKEN` override
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = Self::load(&path)?;

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                config.token = token;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file without validating it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse config contents, as JSON when the file extension is `.json`
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(contents).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Check the token is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }

    /// Guilds configured for a group, empty when the group is absent
    pub fn guilds_for(&self, group: &str) -> &[GuildEntry] {
        self.guild_groups
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Warn about configured groups that no command group uses
    pub fn warn_unknown_groups(&self, known: &[&str]) {
        for name in self.guild_groups.keys() {
            if !known.contains(&name.as_str()) {
                warn!("Config lists guilds for unknown guild group '{name}', they will not receive commands");
            }
        }
    }
}

/// Discord ids are strings in JSON payloads but plain numbers read better in YAML
fn deserialize_snowflake<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Number(u64),
        Text(String),
    }

    match Snowflake::deserialize(deserializer)? {
        Snowflake::Number(id) => Ok(id),
        Snowflake::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid guild id '{text}'"))),
    }
}
