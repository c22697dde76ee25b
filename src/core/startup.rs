//! Startup failures and their process exit statuses
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::info;

use crate::commands::loader::LoadError;
use crate::core::config::ConfigError;
use crate::core::mode::{ModeError, RunMode};

/// Exit status when `BOT_ENV` is missing or invalid
pub const EXIT_INVALID_MODE: u8 = 2;
/// Exit status when the command registry cannot be built
pub const EXIT_LOAD_FAILED: u8 = 3;
/// Exit status when the config file is missing or malformed
pub const EXIT_CONFIG: u8 = 4;
/// Exit status when the gateway client fails
pub const EXIT_GATEWAY: u8 = 5;

/// A failure that stops the bot before or while connecting
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load slash commands: {0}")]
    Load(#[from] LoadError),
    #[error("gateway client failed: {0}")]
    Gateway(String),
}

impl StartupError {
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Mode(_) => EXIT_INVALID_MODE,
            StartupError::Config(_) => EXIT_CONFIG,
            StartupError::Load(_) => EXIT_LOAD_FAILED,
            StartupError::Gateway(_) => EXIT_GATEWAY,
        }
    }
}

/// Log the startup banner
pub fn log_banner(bot_name: &str, version: &str, mode: RunMode) {
    let rule = "-".repeat(54);
    info!("{rule}");
    info!("|{:^52}|", bot_name);
    info!("{rule}");
    info!("Starting {bot_name} v{version} in {mode} mode.");
}
