//! Slash command schemas
//!
//! The JSON shape of a schema is exactly what the bulk-replace endpoints
//! accept: `options` is omitted when a command has none, `required` when it is
//! false and `choices` when there are none.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serde::{Deserialize, Serialize, Serializer};

/// Discord limit on command and option names
pub const MAX_NAME_LEN: usize = 32;
/// Discord limit on command and option descriptions
pub const MAX_DESCRIPTION_LEN: usize = 100;
/// Discord limit on options per command and choices per option
pub const MAX_OPTIONS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandSchema {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OptionSchema {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OptionChoice {
    pub name: String,
    pub value: serde_json::Value,
}

/// Option value types
///
/// Command files name the type (`type: boolean`); the registration body
/// carries Discord's numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
}

impl OptionKind {
    /// Discord's application command option type code
    pub fn code(self) -> u8 {
        match self {
            OptionKind::String => 3,
            OptionKind::Integer => 4,
            OptionKind::Boolean => 5,
            OptionKind::User => 6,
            OptionKind::Channel => 7,
            OptionKind::Role => 8,
            OptionKind::Mentionable => 9,
            OptionKind::Number => 10,
            OptionKind::Attachment => 11,
        }
    }

    fn supports_choices(self) -> bool {
        matches!(
            self,
            OptionKind::String | OptionKind::Integer | OptionKind::Number
        )
    }
}

impl Serialize for OptionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("name '{0}' must be 1-32 lowercase letters, digits, '-' or '_'")]
    InvalidName(String),
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description of '{0}' is longer than 100 characters")]
    DescriptionTooLong(String),
    #[error("more than 25 options")]
    TooManyOptions,
    #[error("option '{0}' has more than 25 choices")]
    TooManyChoices(String),
    #[error("option '{0}' cannot have choices")]
    ChoicesNotSupported(String),
    #[error("required option '{0}' follows an optional one")]
    RequiredAfterOptional(String),
    #[error("duplicate option name '{0}'")]
    DuplicateOption(String),
}

impl CommandSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: OptionSchema) -> Self {
        self.options.push(option);
        self
    }

    /// Check the schema against Discord's constraints for chat input commands
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_name(&self.name)?;
        validate_description(&self.name, &self.description)?;

        if self.options.len() > MAX_OPTIONS {
            return Err(SchemaError::TooManyOptions);
        }

        let mut seen_optional = false;
        for (index, option) in self.options.iter().enumerate() {
            validate_name(&option.name)?;
            validate_description(&option.name, &option.description)?;

            if self.options[..index].iter().any(|o| o.name == option.name) {
                return Err(SchemaError::DuplicateOption(option.name.clone()));
            }

            if option.required && seen_optional {
                return Err(SchemaError::RequiredAfterOptional(option.name.clone()));
            }
            seen_optional |= !option.required;

            if !option.choices.is_empty() && !option.kind.supports_choices() {
                return Err(SchemaError::ChoicesNotSupported(option.name.clone()));
            }
            if option.choices.len() > MAX_OPTIONS {
                return Err(SchemaError::TooManyChoices(option.name.clone()));
            }
        }

        Ok(())
    }
}

impl OptionSchema {
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
            choices: Vec::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn choice(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

fn validate_name(name: &str) -> Result<(), SchemaError> {
    let len = name.chars().count();
    let valid_chars = name
        .chars()
        .all(|c| c == '-' || c == '_' || c.is_numeric() || (c.is_alphabetic() && !c.is_uppercase()));

    if len == 0 || len > MAX_NAME_LEN || !valid_chars {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_description(owner: &str, description: &str) -> Result<(), SchemaError> {
    if description.trim().is_empty() {
        return Err(SchemaError::EmptyDescription);
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(SchemaError::DescriptionTooLong(owner.to_string()));
    }
    Ok(())
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server_schema() -> CommandSchema {
        CommandSchema::new("server", "Provides information about the server.").option(
            OptionSchema::new(OptionKind::Boolean, "detail", "Include ids and channel info"),
        )
    }

    #[test]
    fn test_options_omitted_when_empty() {
        let ping = CommandSchema::new("ping", "Replies with Pong!");
        assert_eq!(
            serde_json::to_value(&ping).unwrap(),
            json!({ "name": "ping", "description": "Replies with Pong!" })
        );
    }

    #[test]
    fn test_options_serialize_with_type_code() {
        assert_eq!(
            serde_json::to_value(server_schema()).unwrap(),
            json!({
                "name": "server",
                "description": "Provides information about the server.",
                "options": [
                    { "type": 5, "name": "detail", "description": "Include ids and channel info" }
                ]
            })
        );
    }

    #[test]
    fn test_required_and_choices_serialized_when_set() {
        let option = OptionSchema::new(OptionKind::String, "period", "Time period")
            .required(true)
            .choice("Today", "today");
        let value = serde_json::to_value(option).unwrap();
        assert_eq!(value["required"], json!(true));
        assert_eq!(value["choices"], json!([{ "name": "Today", "value": "today" }]));
    }

    #[test]
    fn test_option_kind_from_yaml_name() {
        let option: OptionSchema =
            serde_yaml::from_str("type: integer\nname: count\ndescription: How many\n").unwrap();
        assert_eq!(option.kind, OptionKind::Integer);
        assert!(!option.required);
    }

    #[test]
    fn test_validate_accepts_valid_schema() {
        assert_eq!(server_schema().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let long = "x".repeat(33);
        for name in ["", "Ping", "two words", long.as_str()] {
            let schema = CommandSchema::new(name, "desc");
            assert!(
                matches!(schema.validate(), Err(SchemaError::InvalidName(_))),
                "accepted {name:?}"
            );
        }
        assert!(CommandSchema::new("über-cool_2", "desc").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_descriptions() {
        assert_eq!(
            CommandSchema::new("ping", " ").validate(),
            Err(SchemaError::EmptyDescription)
        );
        assert_eq!(
            CommandSchema::new("ping", "d".repeat(101)).validate(),
            Err(SchemaError::DescriptionTooLong("ping".to_string()))
        );
    }

    #[test]
    fn test_validate_required_ordering() {
        let schema = CommandSchema::new("cmd", "desc")
            .option(OptionSchema::new(OptionKind::String, "a", "first"))
            .option(OptionSchema::new(OptionKind::String, "b", "second").required(true));
        assert_eq!(
            schema.validate(),
            Err(SchemaError::RequiredAfterOptional("b".to_string()))
        );
    }

    #[test]
    fn test_validate_duplicate_option() {
        let schema = CommandSchema::new("cmd", "desc")
            .option(OptionSchema::new(OptionKind::String, "a", "first"))
            .option(OptionSchema::new(OptionKind::Integer, "a", "again"));
        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateOption("a".to_string()))
        );
    }

    #[test]
    fn test_validate_choices_only_on_supported_types() {
        let schema = CommandSchema::new("cmd", "desc").option(
            OptionSchema::new(OptionKind::Boolean, "flag", "a flag").choice("Yes", true),
        );
        assert_eq!(
            schema.validate(),
            Err(SchemaError::ChoicesNotSupported("flag".to_string()))
        );
    }

    #[test]
    fn test_validate_too_many_options() {
        let mut schema = CommandSchema::new("cmd", "desc");
        for i in 0..26 {
            schema = schema.option(OptionSchema::new(OptionKind::String, format!("o{i}"), "opt"));
        }
        assert_eq!(schema.validate(), Err(SchemaError::TooManyOptions));
    }
}
