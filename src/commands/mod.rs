//! # Command System
//!
//! Slash command schemas, registry, loading, registration and dispatch.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod builtin;
pub mod canned;
pub mod context;
pub mod handler;
pub mod loader;
pub mod registration;
pub mod registry;
pub mod router;
pub mod schema;

// Re-export handler infrastructure
pub use context::{InteractionContext, InteractionEvent, InteractionResponder, Reply};
pub use handler::SlashCommand;
pub use loader::{load_commands, LoadError};
pub use registration::{register_commands, CommandRegistrar, GuildGroup, GUILD_GROUPS};
pub use registry::CommandRegistry;
pub use router::{InteractionRouter, RouteOutcome};
pub use schema::{CommandSchema, OptionKind, OptionSchema};
