//! /server
//!
//! Guild summary. The optional `detail` flag adds ids and the invoking
//! channel.

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::{InteractionContext, Reply};
use crate::commands::handler::SlashCommand;
use crate::commands::schema::{CommandSchema, OptionKind, OptionSchema};
use crate::core::embeds::Embed;

const SERVER_COLOR: u32 = 0x5865F2;

pub struct ServerCommand;

#[async_trait]
impl SlashCommand for ServerCommand {
    fn schema(&self) -> CommandSchema {
        CommandSchema::new("server", "Provides information about the server.").option(
            OptionSchema::new(
                OptionKind::Boolean,
                "detail",
                "Include ids and the current channel",
            ),
        )
    }

    async fn execute(&self, ctx: &InteractionContext) -> Result<()> {
        let event = ctx.event();
        let Some(guild) = &event.guild else {
            return ctx
                .reply(Reply::text("This command can only be used in a server.").ephemeral())
                .await;
        };

        let name = guild.name.as_deref().unwrap_or("this server");
        let members = guild
            .member_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut embed = Embed::new()
            .color(SERVER_COLOR)
            .title(name)
            .description(format!("This server is {name} and has {members} members."));

        if event.bool_option("detail").unwrap_or(false) {
            let channel = match &event.channel.name {
                Some(channel_name) => format!("#{channel_name} ({})", event.channel.id),
                None => event.channel.id.to_string(),
            };
            embed = embed
                .field("Server ID", guild.id.to_string(), true)
                .field("Channel", channel, true);
        }

        ctx.reply(Reply::embed(embed)).await
    }
}
