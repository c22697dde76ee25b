//! # Core Module
//!
//! Configuration, run mode, startup errors and Discord response helpers.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;
pub mod embeds;
pub mod mode;
pub mod response;
pub mod startup;

// Re-export commonly used items
pub use config::{BotConfig, ConfigError, GuildEntry, PresenceConfig, PresenceStatus};
pub use embeds::{error_notice, Embed};
pub use mode::{ModeError, RunMode};
pub use response::{truncate_for_embed, truncate_for_message, EMBED_LIMIT, MESSAGE_LIMIT};
pub use startup::StartupError;
