// Core layer - configuration, run mode, startup errors
pub mod core;

// Application layer - command registry, registration and dispatch
pub mod commands;

// Infrastructure - serenity adapters
pub mod discord;

// Re-export core config for convenience
pub use self::core::{BotConfig, RunMode};

pub use commands::{CommandRegistry, InteractionRouter, SlashCommand};
