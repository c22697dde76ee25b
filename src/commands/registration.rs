//! Slash command registration
//!
//! Development pushes every command globally. Production pushes fixed
//! command subsets to the guilds listed for each guild group.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};

use super::registry::CommandRegistry;
use super::schema::CommandSchema;
use crate::core::config::BotConfig;
use crate::core::mode::RunMode;

/// Bulk-replace endpoints for application commands
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace the complete set of global commands
    async fn bulk_replace_global(&self, commands: &[CommandSchema]) -> Result<()>;

    /// Replace the complete set of commands in one guild
    async fn bulk_replace_guild(&self, guild_id: u64, commands: &[CommandSchema]) -> Result<()>;
}

/// A named set of guilds that all see the same commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildGroup {
    /// Key under `guild_groups` in the config file
    pub name: &'static str,
    pub commands: &'static [&'static str],
}

/// Production command subsets
pub const GUILD_GROUPS: &[GuildGroup] = &[
    GuildGroup {
        name: "user",
        commands: &["user"],
    },
    GuildGroup {
        name: "utility",
        commands: &["ping", "server"],
    },
];

/// Names of the guild groups in `GUILD_GROUPS`
pub fn guild_group_names() -> Vec<&'static str> {
    GUILD_GROUPS.iter().map(|group| group.name).collect()
}

/// Result of a registration pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Number of commands pushed globally
    pub global_commands: Option<usize>,
    /// Guilds whose command set was replaced
    pub guilds_registered: Vec<u64>,
    /// Guilds whose call failed, with the error text
    pub guild_failures: Vec<(u64, String)>,
}

/// Select schemas by command name
///
/// Names the registry does not know are skipped.
pub fn select_schemas(registry: &CommandRegistry, names: &[&str]) -> Vec<CommandSchema> {
    names
        .iter()
        .filter_map(|name| {
            let schema = registry.schema(name);
            if schema.is_none() {
                warn!("Guild group references unknown command '/{name}', skipping it");
            }
            schema.cloned()
        })
        .collect()
}

/// Push the registry's commands for the given run mode
///
/// A failing global call is returned as an error. In production a failing
/// guild call is logged and the remaining guilds are still attempted.
pub async fn register_commands(
    registrar: &dyn CommandRegistrar,
    registry: &CommandRegistry,
    mode: RunMode,
    config: &BotConfig,
    groups: &[GuildGroup],
) -> Result<RegistrationReport> {
    let mut report = RegistrationReport::default();

    match mode {
        RunMode::Development => {
            let schemas = registry.schemas();
            registrar.bulk_replace_global(&schemas).await?;
            info!("[✔️] Successfully registered {} global slash commands.", schemas.len());
            report.global_commands = Some(schemas.len());
        }
        RunMode::Production => {
            let guild_count: usize = groups.iter().map(|g| config.guilds_for(g.name).len()).sum();
            info!("[⌛] Registering per-guild ({guild_count}) slash commands...");

            for group in groups {
                let schemas = select_schemas(registry, group.commands);
                for guild in config.guilds_for(group.name) {
                    let label = guild.name.as_deref().unwrap_or("unnamed guild");
                    match registrar.bulk_replace_guild(guild.id, &schemas).await {
                        Ok(()) => {
                            info!(
                                "[✔️] Registered {} slash commands for guild {} ({label})",
                                schemas.len(),
                                guild.id
                            );
                            report.guilds_registered.push(guild.id);
                        }
                        Err(e) => {
                            error!(
                                "[❌] Failed to register slash commands for guild {} ({label}): {e:#}",
                                guild.id
                            );
                            report.guild_failures.push((guild.id, format!("{e:#}")));
                        }
                    }
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::bail;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum RegistrarCall {
        Global(serde_json::Value),
        Guild(u64, serde_json::Value),
    }

    /// Registrar that records the request bodies it would have sent
    #[derive(Default)]
    pub struct RecordingRegistrar {
        calls: Mutex<Vec<RegistrarCall>>,
        failing_guilds: HashSet<u64>,
        fail_global: bool,
    }

    impl RecordingRegistrar {
        pub fn failing_guilds(ids: &[u64]) -> Self {
            Self {
                failing_guilds: ids.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn failing_global() -> Self {
            Self {
                fail_global: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<RegistrarCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRegistrar for RecordingRegistrar {
        async fn bulk_replace_global(&self, commands: &[CommandSchema]) -> Result<()> {
            if self.fail_global {
                bail!("401: Unauthorized");
            }
            let body = serde_json::to_value(commands)?;
            self.calls.lock().unwrap().push(RegistrarCall::Global(body));
            Ok(())
        }

        async fn bulk_replace_guild(&self, guild_id: u64, commands: &[CommandSchema]) -> Result<()> {
            if self.failing_guilds.contains(&guild_id) {
                bail!("403: Missing Access");
            }
            let body = serde_json::to_value(commands)?;
            self.calls
                .lock()
                .unwrap()
                .push(RegistrarCall::Guild(guild_id, body));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::commands::builtin;
    use crate::commands::loader::load_commands;
    use serde_json::json;
    use std::path::Path;

    const CONFIG: &str = r#"
token: test
guild_groups:
  user:
    - id: 100
  utility:
    - id: 200
    - id: 300
"#;

    fn config() -> BotConfig {
        BotConfig::parse(Path::new("config.yaml"), CONFIG).unwrap()
    }

    fn registry() -> CommandRegistry {
        load_commands(builtin::all(), None).unwrap()
    }

    fn names(body: &serde_json::Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_development_registers_everything_globally_once() {
        let registrar = RecordingRegistrar::default();
        let report = register_commands(&registrar, &registry(), RunMode::Development, &config(), GUILD_GROUPS)
            .await
            .unwrap();

        assert_eq!(report.global_commands, Some(3));
        assert!(report.guilds_registered.is_empty());

        let calls = registrar.calls();
        assert_eq!(calls.len(), 1);
        let RegistrarCall::Global(body) = &calls[0] else {
            panic!("expected a global call, got {calls:?}");
        };
        assert_eq!(names(body), vec!["ping", "server", "user"]);
    }

    #[tokio::test]
    async fn test_development_body_omits_empty_options() {
        let registrar = RecordingRegistrar::default();
        let mut registry = CommandRegistry::new();
        for command in builtin::all().into_iter().take(2) {
            registry.register(command.schema(), command);
        }

        register_commands(&registrar, &registry, RunMode::Development, &config(), GUILD_GROUPS)
            .await
            .unwrap();

        assert_eq!(
            registrar.calls(),
            vec![RegistrarCall::Global(json!([
                { "name": "ping", "description": "Replies with Pong!" },
                {
                    "name": "server",
                    "description": "Provides information about the server.",
                    "options": [
                        { "type": 5, "name": "detail", "description": "Include ids and the current channel" }
                    ]
                }
            ]))]
        );
    }

    #[tokio::test]
    async fn test_production_registers_group_subsets_per_guild() {
        let registrar = RecordingRegistrar::default();
        let report = register_commands(&registrar, &registry(), RunMode::Production, &config(), GUILD_GROUPS)
            .await
            .unwrap();

        assert_eq!(report.global_commands, None);
        assert_eq!(report.guilds_registered, vec![100, 200, 300]);

        let calls = registrar.calls();
        assert_eq!(calls.len(), 3);
        for call in &calls {
            match call {
                RegistrarCall::Guild(100, body) => assert_eq!(names(body), vec!["user"]),
                RegistrarCall::Guild(200 | 300, body) => {
                    assert_eq!(names(body), vec!["ping", "server"])
                }
                other => panic!("unexpected call {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_production_skips_unknown_command_names() {
        let registrar = RecordingRegistrar::default();
        let groups = [GuildGroup {
            name: "utility",
            commands: &["ping", "does-not-exist"],
        }];

        register_commands(&registrar, &registry(), RunMode::Production, &config(), &groups)
            .await
            .unwrap();

        for call in registrar.calls() {
            let RegistrarCall::Guild(_, body) = call else {
                panic!("expected guild calls only");
            };
            // Never a null entry for the missing name
            assert_eq!(names(&body), vec!["ping"]);
        }
    }

    #[tokio::test]
    async fn test_production_guild_failure_does_not_stop_others() {
        let registrar = RecordingRegistrar::failing_guilds(&[200]);
        let report = register_commands(&registrar, &registry(), RunMode::Production, &config(), GUILD_GROUPS)
            .await
            .unwrap();

        assert_eq!(report.guilds_registered, vec![100, 300]);
        assert_eq!(report.guild_failures.len(), 1);
        assert_eq!(report.guild_failures[0].0, 200);
        assert!(report.guild_failures[0].1.contains("Missing Access"));
    }

    #[tokio::test]
    async fn test_development_failure_is_returned() {
        let registrar = RecordingRegistrar::failing_global();
        let result =
            register_commands(&registrar, &registry(), RunMode::Development, &config(), GUILD_GROUPS).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_production_without_guilds_makes_no_calls() {
        let registrar = RecordingRegistrar::default();
        let empty = BotConfig::parse(Path::new("c.yaml"), "token: t").unwrap();
        let report = register_commands(&registrar, &registry(), RunMode::Production, &empty, GUILD_GROUPS)
            .await
            .unwrap();

        assert!(registrar.calls().is_empty());
        assert_eq!(report, RegistrationReport::default());
    }

    #[test]
    fn test_select_schemas_preserves_group_order() {
        let selected = select_schemas(&registry(), &["user", "ping"]);
        let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["user", "ping"]);
    }

    #[test]
    fn test_guild_group_names() {
        assert_eq!(guild_group_names(), vec!["user", "utility"]);
    }
}
