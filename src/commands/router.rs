//! Interaction router
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::anyhow;
use log::{error, warn};
use std::sync::Arc;

use super::context::{InteractionContext, InteractionKind, Reply};
use super::registry::CommandRegistry;
use crate::core::embeds::error_notice;

/// What happened to a routed interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Not a slash command
    Ignored,
    /// No command registered under that name
    UnknownCommand,
    Completed,
    /// The handler failed and the user was notified (or notifying failed)
    Failed,
}

/// Dispatches slash command interactions to registered handlers
#[derive(Clone)]
pub struct InteractionRouter {
    registry: Arc<CommandRegistry>,
}

impl InteractionRouter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Route one interaction
    ///
    /// Never returns an error: handler failures and panics are logged and
    /// reported to the invoking user.
    pub async fn route(&self, ctx: Arc<InteractionContext>) -> RouteOutcome {
        if ctx.event().kind != InteractionKind::ChatInput {
            return RouteOutcome::Ignored;
        }

        let Some(command) = self.registry.get(ctx.command_name()) else {
            return RouteOutcome::UnknownCommand;
        };

        // Own task so a panicking handler is contained like an error
        let handler = Arc::clone(&command.handler);
        let task_ctx = Arc::clone(&ctx);
        let result = tokio::spawn(async move { handler.execute(&task_ctx).await })
            .await
            .unwrap_or_else(|join_error| {
                if join_error.is_panic() {
                    Err(anyhow!("command handler panicked"))
                } else {
                    Err(anyhow!("command handler was cancelled"))
                }
            });

        match result {
            Ok(()) => RouteOutcome::Completed,
            Err(e) => {
                report_failure(&ctx, &e).await;
                RouteOutcome::Failed
            }
        }
    }
}

async fn report_failure(ctx: &InteractionContext, err: &anyhow::Error) {
    let event = ctx.event();
    error!("[⚠️] Error executing command '{}': {err:#}", event.command_name);
    match serde_json::to_string(event) {
        Ok(details) => error!("Interaction details: {details}"),
        Err(e) => error!("Interaction details unavailable: {e}"),
    }

    let notice = Reply::embed(error_notice(&event.command_name)).ephemeral();
    let sent = if ctx.reply_state().is_acknowledged() {
        ctx.edit_reply(notice).await
    } else {
        ctx.reply(notice).await
    };

    if let Err(e) = sent {
        warn!(
            "Failed to send error notice for interaction {}: {e}",
            event.interaction_id
        );
    }
}
