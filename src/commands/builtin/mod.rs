//! Compiled-in slash commands
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod ping;
pub mod server;
pub mod user;

use std::sync::Arc;

use super::handler::SlashCommand;

/// Create all compiled-in commands
///
/// Returns the startup list handed to the loader.
pub fn all() -> Vec<Arc<dyn SlashCommand>> {
    vec![
        Arc::new(ping::PingCommand),
        Arc::new(server::ServerCommand),
        Arc::new(user::UserCommand),
    ]
}
