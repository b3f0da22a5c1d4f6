//! Prefix command handling

use super::{channel, display_name, join_names, BotContext};
use crate::commands::{self, Command};
use crate::error::BotError;
use crate::recruitment::{self, Roster};
use tracing::{debug, info, warn};
use twilight_model::channel::Message;
use twilight_model::id::{marker::UserMarker, Id};

/// A user named by a join/cancel command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub id: Id<UserMarker>,
    pub name: String,
    pub bot: bool,
}

/// Handle a message that may contain a prefix command
pub async fn handle_message(ctx: &BotContext, message: &Message) -> Result<(), BotError> {
    if message.author.bot {
        return Ok(());
    }
    let Some(command) = commands::parse(&message.content, &ctx.command_prefix) else {
        return Ok(());
    };
    if command.guild_only() && message.guild_id.is_none() {
        debug!(command = command.name(), "Ignoring guild-only command in DM");
        return Ok(());
    }

    ctx.metrics.record_command(command.name());
    info!(
        command = command.name(),
        channel_id = %message.channel_id,
        user_id = %message.author.id,
        "Handling command"
    );

    let result = match command {
        Command::Start => start(ctx, message).await,
        Command::Join => join(ctx, message).await,
        Command::Cancel => cancel(ctx, message).await,
    };

    if let Err(ref e) = result {
        if let Some(text) = e.user_message() {
            if let Err(send_err) = channel::say(ctx, message.channel_id, text).await {
                warn!(error = %send_err, "Failed to report command error");
            }
        }
    }
    result
}

async fn start(ctx: &BotContext, message: &Message) -> Result<(), BotError> {
    let roster = Roster::started_by(message.author.id);
    let host = display_name(message.member.as_ref(), &message.author);
    channel::post_roster(ctx, message.channel_id, &roster, &recruitment::opened_notice(&host)).await
}

async fn join(ctx: &BotContext, message: &Message) -> Result<(), BotError> {
    let targets = eligible_targets(Command::Join, mentioned(message), author(message))?;
    let (message_id, mut roster) = channel::fetch_roster(ctx, message.channel_id).await?;

    for target in &targets {
        roster.add(target.id, false)?;
    }

    let names = join_names(targets.iter().map(|t| t.name.as_str()));
    channel::repost_roster(
        ctx,
        message.channel_id,
        message_id,
        &roster,
        &recruitment::joined_notice(&names),
    )
    .await
}

async fn cancel(ctx: &BotContext, message: &Message) -> Result<(), BotError> {
    let targets = eligible_targets(Command::Cancel, mentioned(message), author(message))?;
    let (message_id, mut roster) = channel::fetch_roster(ctx, message.channel_id).await?;

    for target in &targets {
        roster.remove(target.id, false)?;
    }

    let names = join_names(targets.iter().map(|t| t.name.as_str()));
    channel::repost_roster(
        ctx,
        message.channel_id,
        message_id,
        &roster,
        &recruitment::cancelled_notice(&names),
    )
    .await
}

fn mentioned(message: &Message) -> Vec<Target> {
    message
        .mentions
        .iter()
        .map(|mention| Target {
            id: mention.id,
            name: mention
                .member
                .as_ref()
                .and_then(|m| m.nick.clone())
                .unwrap_or_else(|| mention.name.clone()),
            bot: mention.bot,
        })
        .collect()
}

fn author(message: &Message) -> Target {
    Target {
        id: message.author.id,
        name: display_name(message.member.as_ref(), &message.author),
        bot: message.author.bot,
    }
}

/// Mentioned users, or the author when nobody is mentioned, minus bots.
///
/// Fails when that leaves nobody, e.g. a command that only mentions bots.
/// The error names what `command` could not do.
pub(crate) fn eligible_targets(
    command: Command,
    mentioned: Vec<Target>,
    author: Target,
) -> Result<Vec<Target>, BotError> {
    let candidates = if mentioned.is_empty() {
        vec![author]
    } else {
        mentioned
    };

    let mut targets: Vec<Target> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.bot && !targets.iter().any(|t| t.id == candidate.id) {
            targets.push(candidate);
        }
    }

    if targets.is_empty() {
        return Err(match command {
            Command::Cancel => BotError::NoMembersToCancel,
            _ => BotError::NoMembersToJoin,
        });
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u64, name: &str, bot: bool) -> Target {
        Target {
            id: Id::new(id),
            name: name.to_string(),
            bot,
        }
    }

    #[test]
    fn test_author_when_no_mentions() {
        let targets =
            eligible_targets(Command::Join, Vec::new(), target(1, "host", false)).unwrap();
        assert_eq!(targets, vec![target(1, "host", false)]);
    }

    #[test]
    fn test_mentions_replace_author() {
        let targets = eligible_targets(
            Command::Join,
            vec![target(2, "a", false), target(3, "b", false)],
            target(1, "host", false),
        )
        .unwrap();
        let ids: Vec<u64> = targets.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_bots_are_skipped() {
        let targets = eligible_targets(
            Command::Join,
            vec![target(2, "bot", true), target(3, "b", false)],
            target(1, "host", false),
        )
        .unwrap();
        assert_eq!(targets, vec![target(3, "b", false)]);
    }

    #[test]
    fn test_only_bots_is_an_error() {
        let err = eligible_targets(
            Command::Join,
            vec![target(2, "bot", true)],
            target(1, "host", false),
        )
        .unwrap_err();
        assert!(matches!(err, BotError::NoMembersToJoin));
        assert_eq!(err.user_message(), Some("参加できるメンバーがいません"));
    }

    #[test]
    fn test_cancel_with_only_bots_names_withdrawal() {
        let err = eligible_targets(
            Command::Cancel,
            vec![target(2, "bot", true), target(3, "bot2", true)],
            target(1, "host", false),
        )
        .unwrap_err();
        assert!(matches!(err, BotError::NoMembersToCancel));
        assert_eq!(err.user_message(), Some("取り消せるメンバーがいません"));
    }

    #[test]
    fn test_duplicate_mentions_collapse() {
        let targets = eligible_targets(
            Command::Join,
            vec![target(2, "a", false), target(2, "a", false)],
            target(1, "host", false),
        )
        .unwrap();
        assert_eq!(targets.len(), 1);
    }
}
