//! /user

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::{InteractionContext, Reply};
use crate::commands::handler::SlashCommand;
use crate::commands::schema::CommandSchema;

pub struct UserCommand;

#[async_trait]
impl SlashCommand for UserCommand {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("user", "Provides information about the user.")
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<()> {
        let user = &ctx.event().user;
        ctx.reply(Reply::text(format!(
            "Your tag: {}\nYour id: {}",
            user.tag, user.id
        )))
        .await
    }
}
