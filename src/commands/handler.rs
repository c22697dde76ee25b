//! Slash command trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Commands declare their own schema, one command per implementation
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;

use super::context::InteractionContext;
use super::schema::CommandSchema;

/// A slash command: its registration schema plus the code that runs it
///
/// Commands are listed explicitly at startup (see `builtin::all`) or declared
/// in command files, then stored in a `CommandRegistry` keyed by schema name.
///
/// # Example
///
/// ```ignore
/// pub struct PingCommand;
///
/// #[async_trait]
/// impl SlashCommand for PingCommand {
///     fn schema(&self) -> CommandSchema {
///         CommandSchema::new("ping", "Replies with Pong!")
///     }
///
///     async fn execute(&self, ctx: &InteractionContext) -> Result<()> {
///         ctx.reply(Reply::text("Pong!")).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Schema submitted to the registration endpoints
    fn schema(&self) -> CommandSchema;

    /// Run the command
    ///
    /// An `Err` is reported to the invoking user by the router; the handler
    /// does not need to reply on failure.
    async fn execute(&self, ctx: &InteractionContext) -> Result<()>;
}
