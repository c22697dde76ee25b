//! Command registration over serenity's HTTP client

use anyhow::Result;
use async_trait::async_trait;
use serenity::http::Http;
use std::sync::Arc;

use crate::commands::registration::CommandRegistrar;
use crate::commands::schema::CommandSchema;

/// Sends bulk-overwrite requests for application commands
pub struct SerenityRegistrar {
    http: Arc<Http>,
}

impl SerenityRegistrar {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandRegistrar for SerenityRegistrar {
    async fn bulk_replace_global(&self, commands: &[CommandSchema]) -> Result<()> {
        let body = serde_json::to_value(commands)?;
        self.http.create_global_application_commands(&body).await?;
        Ok(())
    }

    async fn bulk_replace_guild(&self, guild_id: u64, commands: &[CommandSchema]) -> Result<()> {
        let body = serde_json::to_value(commands)?;
        self.http
            .create_guild_application_commands(guild_id, &body)
            .await?;
        Ok(())
    }
}
