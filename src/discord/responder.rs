//! Interaction responses over serenity's HTTP client

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use std::sync::Arc;

use crate::commands::context::{InteractionResponder, Reply};
use crate::core::response::truncate_for_message;

/// Responds to one slash command interaction
pub struct SerenityResponder {
    http: Arc<Http>,
    interaction: ApplicationCommandInteraction,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, interaction: ApplicationCommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl InteractionResponder for SerenityResponder {
    async fn reply(&self, reply: &Reply) -> Result<()> {
        self.interaction
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        if let Some(content) = &reply.content {
                            message.content(truncate_for_message(content));
                        }
                        for embed in &reply.embeds {
                            message.add_embed(embed.to_create_embed());
                        }
                        message.ephemeral(reply.ephemeral)
                    })
            })
            .await?;
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.interaction
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|message| message.ephemeral(ephemeral))
            })
            .await?;
        Ok(())
    }

    async fn edit_reply(&self, reply: &Reply) -> Result<()> {
        self.interaction
            .edit_original_interaction_response(&self.http, |response| {
                if let Some(content) = &reply.content {
                    response.content(truncate_for_message(content));
                }
                for embed in &reply.embeds {
                    response.add_embed(embed.to_create_embed());
                }
                response
            })
            .await?;
        Ok(())
    }
}
