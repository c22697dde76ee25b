//! Conversion from serenity interactions to `InteractionEvent`

use serenity::cache::Cache;
use serenity::model::application::command::CommandType;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};

use crate::commands::context::{
    ChannelRef, GuildRef, InteractionEvent, InteractionKind, OptionValue, UserRef,
};

/// Build the event for a command interaction, filling names from the cache
pub fn interaction_event(cache: &Cache, command: &ApplicationCommandInteraction) -> InteractionEvent {
    let guild = command.guild_id.map(|guild_id| GuildRef {
        id: guild_id.0,
        name: cache.guild_field(guild_id, |g| g.name.clone()),
        member_count: cache.guild_field(guild_id, |g| g.member_count),
    });

    let channel = ChannelRef {
        id: command.channel_id.0,
        name: cache
            .guild_channel(command.channel_id)
            .map(|channel| channel.name),
    };

    InteractionEvent {
        interaction_id: command.id.0,
        kind: interaction_kind(command.data.kind),
        command_name: command.data.name.clone(),
        user: UserRef {
            id: command.user.id.0,
            tag: command.user.tag(),
        },
        guild,
        channel,
        options: command.data.options.iter().map(option_value).collect(),
    }
}

pub fn interaction_kind(kind: CommandType) -> InteractionKind {
    match kind {
        CommandType::ChatInput => InteractionKind::ChatInput,
        CommandType::User => InteractionKind::UserContextMenu,
        CommandType::Message => InteractionKind::MessageContextMenu,
        _ => InteractionKind::Other,
    }
}

fn option_value(option: &CommandDataOption) -> OptionValue {
    OptionValue {
        name: option.name.clone(),
        value: option.value.clone(),
        options: option.options.iter().map(option_value).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_kind_mapping() {
        assert_eq!(interaction_kind(CommandType::ChatInput), InteractionKind::ChatInput);
        assert_eq!(interaction_kind(CommandType::User), InteractionKind::UserContextMenu);
        assert_eq!(interaction_kind(CommandType::Message), InteractionKind::MessageContextMenu);
    }
}
