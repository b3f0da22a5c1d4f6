//! Event dispatch
//!
//! Turns gateway events into recruitment actions. Each event is handled on
//! its own task; concurrent actions on the same roster resolve
//! last-write-wins on the reposted message.

mod channel;
mod command;
mod interaction;

use crate::metrics::BotMetrics;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use twilight_http::Client;
use twilight_model::gateway::event::Event;
use twilight_model::guild::PartialMember;
use twilight_model::id::{marker::ApplicationMarker, Id};
use twilight_model::user::User;

/// Shared dependencies for event handlers
pub struct BotContext {
    pub http: Arc<Client>,
    pub application_id: Id<ApplicationMarker>,
    pub command_prefix: String,
    pub recruitment_window: Duration,
    pub metrics: Arc<BotMetrics>,
}

/// Handle a single gateway event
pub async fn handle_event(ctx: Arc<BotContext>, event: Event) {
    let result = match &event {
        Event::MessageCreate(message) => command::handle_message(&ctx, message).await,
        Event::InteractionCreate(interaction) => {
            interaction::handle_interaction(&ctx, interaction).await
        }
        _ => return,
    };

    if let Err(e) = result {
        ctx.metrics.record_error(e.error_type_label());
        if e.user_message().is_some() {
            debug!(error = %e, "Recruitment action rejected");
        } else {
            warn!(error = %e, "Failed to handle event");
        }
    }
}

/// Name shown in channel notices: guild nickname, then global name, then username.
pub(crate) fn display_name(member: Option<&PartialMember>, user: &User) -> String {
    member
        .and_then(|m| m.nick.clone())
        .or_else(|| user.global_name.clone())
        .unwrap_or_else(|| user.name.clone())
}

/// Comma-separated names with duplicates removed, keeping first occurrence order.
pub(crate) fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names_dedups_in_order() {
        assert_eq!(join_names(["b", "a", "b"]), "b, a");
        assert_eq!(join_names(["solo"]), "solo");
        assert_eq!(join_names(Vec::<&str>::new()), "");
    }
}
