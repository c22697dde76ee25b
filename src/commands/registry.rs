//! Command registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Store validated schemas alongside handlers, ordered by name
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::BTreeMap;
use std::sync::Arc;

use super::handler::SlashCommand;
use super::schema::CommandSchema;

/// A command as stored in the registry
#[derive(Clone)]
pub struct RegisteredCommand {
    pub schema: CommandSchema,
    pub handler: Arc<dyn SlashCommand>,
}

/// Registry mapping command names to their schema and handler
///
/// Filled once by the loader, then shared behind an `Arc` and only read.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(schema, Arc::new(PingCommand));
///
/// if let Some(command) = registry.get("ping") {
///     command.handler.execute(&ctx).await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its schema name
    ///
    /// Returns the command previously registered under that name, if any.
    pub fn register(
        &mut self,
        schema: CommandSchema,
        handler: Arc<dyn SlashCommand>,
    ) -> Option<RegisteredCommand> {
        self.commands
            .insert(schema.name.clone(), RegisteredCommand { schema, handler })
    }

    /// Look up a command by exact, case-sensitive name
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Schema of a command by name
    pub fn schema(&self, name: &str) -> Option<&CommandSchema> {
        self.commands.get(name).map(|command| &command.schema)
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All schemas, ordered by command name
    pub fn schemas(&self) -> Vec<CommandSchema> {
        self.commands
            .values()
            .map(|command| command.schema.clone())
            .collect()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::InteractionContext;
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockCommand;

    #[async_trait]
    impl SlashCommand for MockCommand {
        fn schema(&self) -> CommandSchema {
            CommandSchema::new("mock", "A mock command")
        }

        async fn execute(&self, _ctx: &InteractionContext) -> Result<()> {
            Ok(())
        }
    }

    fn schema(name: &str, description: &str) -> CommandSchema {
        CommandSchema::new(name, description)
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_register_single() {
        let mut registry = CommandRegistry::new();
        let replaced = registry.register(schema("ping", "Pong"), Arc::new(MockCommand));

        assert!(replaced.is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
    }

    #[test]
    fn test_registry_last_registration_wins() {
        let mut registry = CommandRegistry::new();
        registry.register(schema("ping", "first"), Arc::new(MockCommand));
        let replaced = registry.register(schema("ping", "second"), Arc::new(MockCommand));

        assert_eq!(replaced.map(|c| c.schema.description), Some("first".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.schema("ping").unwrap().description, "second");
    }

    #[test]
    fn test_registry_lookup_is_case_sensitive() {
        let mut registry = CommandRegistry::new();
        registry.register(schema("ping", "Pong"), Arc::new(MockCommand));

        assert!(registry.get("ping").is_some());
        assert!(registry.get("Ping").is_none());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_schemas_sorted_by_name() {
        let mut registry = CommandRegistry::new();
        registry.register(schema("user", "u"), Arc::new(MockCommand));
        registry.register(schema("ping", "p"), Arc::new(MockCommand));
        registry.register(schema("server", "s"), Arc::new(MockCommand));

        let names: Vec<String> = registry.schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["ping", "server", "user"]);
        assert_eq!(
            registry.command_names().collect::<Vec<_>>(),
            vec!["ping", "server", "user"]
        );
    }
}
