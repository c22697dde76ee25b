use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bootstrap_bot::commands::registration::guild_group_names;
use bootstrap_bot::commands::{
    builtin, load_commands, register_commands, InteractionContext, InteractionRouter, GUILD_GROUPS,
};
use bootstrap_bot::core::startup::{log_banner, StartupError};
use bootstrap_bot::core::{BotConfig, RunMode};
use bootstrap_bot::discord::{apply_presence, interaction_event, SerenityRegistrar, SerenityResponder};

const BOT_NAME: &str = "Bootstrap Bot";

struct Handler {
    router: InteractionRouter,
    mode: RunMode,
    config: BotConfig,
    registered: AtomicBool,
}

impl Handler {
    fn new(router: InteractionRouter, mode: RunMode, config: BotConfig) -> Self {
        Handler {
            router,
            mode,
            config,
            registered: AtomicBool::new(false),
        }
    }

    async fn register_slash_commands(&self, ctx: &Context) {
        let registrar = SerenityRegistrar::new(ctx.http.clone());
        info!("[⌛] Trying to register slash commands ({} mode)...", self.mode);

        match register_commands(
            &registrar,
            self.router.registry(),
            self.mode,
            &self.config,
            GUILD_GROUPS,
        )
        .await
        {
            Ok(report) if report.guild_failures.is_empty() => {
                info!(
                    "[✔️] Slash commands in place: {} global, {} guilds",
                    report.global_commands.unwrap_or(0),
                    report.guilds_registered.len()
                );
            }
            Ok(report) => {
                error!(
                    "[❌] Slash command registration failed for {} of {} guilds",
                    report.guild_failures.len(),
                    report.guild_failures.len() + report.guilds_registered.len()
                );
            }
            Err(e) => {
                error!("[❌] Failed to register slash commands: {e:#}");
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as '{}'!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        // A new session after a reconnect fires ready again; registering once is enough
        if !self.registered.swap(true, Ordering::SeqCst) {
            self.register_slash_commands(&ctx).await;
        }

        apply_presence(&ctx, &self.config.presence).await;
        info!("✅ Bot is ready!");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        // Components, modals and autocomplete are not routed
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let event = interaction_event(&ctx.cache, &command);
        let responder = Arc::new(SerenityResponder::new(ctx.http.clone(), command));
        let interaction_ctx = Arc::new(InteractionContext::new(event, responder));

        self.router.route(interaction_ctx).await;
    }
}

async fn run() -> Result<(), StartupError> {
    let mode = RunMode::from_env()?;
    let config = BotConfig::from_env()?;
    config.warn_unknown_groups(&guild_group_names());

    let registry = load_commands(builtin::all(), config.commands_dir.as_deref())?;
    let router = InteractionRouter::new(Arc::new(registry));

    log_banner(BOT_NAME, env!("CARGO_PKG_VERSION"), mode);

    let intents = GatewayIntents::GUILDS;
    let token = config.token.clone();
    let handler = Handler::new(router, mode, config);

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            StartupError::Gateway(e.to_string())
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(StartupError::Gateway(why.to_string()));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[❌] {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
