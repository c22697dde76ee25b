//! Bot presence

use serenity::model::gateway::Activity;
use serenity::model::user::OnlineStatus;
use serenity::prelude::Context;

use crate::core::config::{PresenceConfig, PresenceStatus};

pub fn online_status(status: PresenceStatus) -> OnlineStatus {
    match status {
        PresenceStatus::Online => OnlineStatus::Online,
        PresenceStatus::Idle => OnlineStatus::Idle,
        PresenceStatus::Dnd => OnlineStatus::DoNotDisturb,
        PresenceStatus::Invisible => OnlineStatus::Invisible,
    }
}

/// Set the configured "Playing ..." activity and status
pub async fn apply_presence(ctx: &Context, presence: &PresenceConfig) {
    let activity = presence.activity.as_deref().map(Activity::playing);
    ctx.set_presence(activity, online_status(presence.status))
        .await;
}
