//! Interactive command file generator
//!
//! Writes a new canned-reply command file into the commands directory and
//! checks it loads the same way the bot will load it.
//!
//! Usage: cargo run --features scaffold --bin new-command [commands-dir]

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

use bootstrap_bot::commands::canned::CannedCommand;
use bootstrap_bot::commands::loader::read_command_file;
use bootstrap_bot::commands::schema::{CommandSchema, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use bootstrap_bot::commands::SlashCommand;

fn main() -> Result<()> {
    println!("Command Scaffold Generator");
    println!("==========================\n");

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("commands"));

    // 1. Command name
    let name: String = Input::new()
        .with_prompt(format!(
            "Command name (lowercase, '-' and '_' allowed, max {MAX_NAME_LEN} chars)"
        ))
        .validate_with(|input: &String| -> Result<(), String> {
            CommandSchema::new(input.as_str(), "placeholder")
                .validate()
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    let command_path = dir.join(format!("{name}.yaml"));
    if command_path.exists() {
        bail!("{} already exists", command_path.display());
    }

    // 2. Description
    let description: String = Input::new()
        .with_prompt(format!("Description (max {MAX_DESCRIPTION_LEN} chars)"))
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Err("Description cannot be empty".to_string());
            }
            if input.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(format!(
                    "Description must be {MAX_DESCRIPTION_LEN} characters or less"
                ));
            }
            Ok(())
        })
        .interact_text()?;

    // 3. Reply style
    let styles = vec!["text", "embed"];
    let style_index = Select::new()
        .with_prompt("Reply style")
        .items(&styles)
        .default(0)
        .interact()?;

    let message: String = Input::new()
        .with_prompt("Reply text (${user}, ${guild}, ${channel} are filled in)")
        .interact_text()?;

    let ephemeral = Confirm::new()
        .with_prompt("Only visible to the invoking user?")
        .default(false)
        .interact()?;

    // 4. Generate YAML
    let yaml = generate_yaml(&name, &description, styles[style_index], &message, ephemeral);

    // 5. Validate it parses
    let parsed = CannedCommand::from_yaml(&yaml)?;
    if let Err(e) = parsed.schema().validate() {
        eprintln!("YAML content:\n{yaml}");
        bail!("generated command is invalid: {e}");
    }

    // 6. Write file, then re-read it through the loader
    std::fs::create_dir_all(&dir)?;
    std::fs::write(&command_path, &yaml)?;
    check_loads(&command_path)?;

    println!("\nCreated: {}", command_path.display());
    println!("Restart the bot to load it.");
    Ok(())
}

fn check_loads(path: &Path) -> Result<()> {
    let command = read_command_file(path)?;
    println!("\nValidation passed:");
    println!("  Command: /{}", command.name);
    println!("  Ephemeral: {}", command.reply.ephemeral);
    Ok(())
}

fn generate_yaml(name: &str, description: &str, style: &str, message: &str, ephemeral: bool) -> String {
    let mut y = String::new();

    y.push_str(&format!("name: {name}\n"));
    y.push_str(&format!("description: {}\n", yaml_string(description)));
    y.push_str("\nreply:\n");

    match style {
        "embed" => {
            y.push_str("  embed:\n");
            y.push_str(&format!("    title: {}\n", yaml_string(description)));
            y.push_str(&format!("    description: {}\n", yaml_string(message)));
        }
        _ => {
            y.push_str(&format!("  content: {}\n", yaml_string(message)));
        }
    }
    y.push_str(&format!("  ephemeral: {ephemeral}\n"));

    y
}

/// Quote a scalar so `${...}`, colons and leading symbols survive YAML parsing
fn yaml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
