//! Command loader
//!
//! Builds the registry from the compiled-in commands and the command files in
//! the configured directory. Any bad command fails the whole load.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::canned::CannedCommand;
use super::handler::SlashCommand;
use super::registry::CommandRegistry;
use super::schema::SchemaError;

/// File extensions read from the commands directory
pub const COMMAND_FILE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read commands directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read command file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse command file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("command file {path} declares no reply")]
    MissingReply { path: PathBuf },
    #[error("command file {path} names option '{option}', which is a reserved placeholder")]
    ReservedOption { path: PathBuf, option: String },
    #[error("invalid command '{source_name}': {source}")]
    InvalidSchema {
        source_name: String,
        #[source]
        source: SchemaError,
    },
}

/// Load all commands into a registry
///
/// Compiled-in commands go first, in order, then command files sorted by file
/// name. A later command replaces an earlier one with the same name.
pub fn load_commands(
    builtins: Vec<Arc<dyn SlashCommand>>,
    commands_dir: Option<&Path>,
) -> Result<CommandRegistry, LoadError> {
    info!("[⌛] Loading slash commands...");

    let mut registry = CommandRegistry::new();

    for command in builtins {
        insert(&mut registry, command, None)?;
    }

    if let Some(dir) = commands_dir {
        for path in command_files(dir)? {
            let command = read_command_file(&path)?;
            insert(&mut registry, Arc::new(command), Some(&path))?;
        }
    }

    info!(
        "[✔️] Loaded {} slash commands: {}",
        registry.len(),
        registry.command_names().collect::<Vec<_>>().join(", ")
    );
    Ok(registry)
}

fn insert(
    registry: &mut CommandRegistry,
    command: Arc<dyn SlashCommand>,
    origin: Option<&Path>,
) -> Result<(), LoadError> {
    let schema = command.schema();
    schema.validate().map_err(|source| LoadError::InvalidSchema {
        source_name: match origin {
            Some(path) => format!("{} ({})", schema.name, path.display()),
            None => schema.name.clone(),
        },
        source,
    })?;

    if registry.contains(&schema.name) {
        debug!("Command '/{}' replaced by a later definition", schema.name);
    }
    registry.register(schema, command);
    Ok(())
}

/// Command files in `dir`, sorted by file name
pub fn command_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_dir_error = |source: std::io::Error| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && has_command_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_command_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| COMMAND_FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Parse one command file
pub fn read_command_file(path: &Path) -> Result<CannedCommand, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        CannedCommand::from_json(&contents).map_err(|e| e.to_string())
    } else {
        CannedCommand::from_yaml(&contents).map_err(|e| e.to_string())
    };

    let command = parsed.map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    if !command.has_reply() {
        return Err(LoadError::MissingReply {
            path: path.to_path_buf(),
        });
    }

    if let Some(option) = command.reserved_option_names().first() {
        return Err(LoadError::ReservedOption {
            path: path.to_path_buf(),
            option: option.to_string(),
        });
    }

    debug!("Read command '/{}' from {}", command.name, path.display());
    Ok(command)
}
