//! /ping

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::{InteractionContext, Reply};
use crate::commands::handler::SlashCommand;
use crate::commands::schema::CommandSchema;

pub struct PingCommand;

#[async_trait]
impl SlashCommand for PingCommand {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("ping", "Replies with Pong!")
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<()> {
        ctx.reply(Reply::text("🏓 Pong!")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::testing::*;

    #[tokio::test]
    async fn test_ping_replies_pong() {
        let (ctx, responder) = context(event("ping"));
        PingCommand.execute(&ctx).await.unwrap();
        assert_eq!(
            responder.calls(),
            vec![ResponderCall::Reply(Reply::text("🏓 Pong!"))]
        );
    }

    #[test]
    fn test_ping_schema_has_no_options() {
        let schema = PingCommand.schema();
        assert_eq!(schema.name, "ping");
        assert!(schema.options.is_empty());
    }
}
