//! Channel I/O for recruitment messages

use super::BotContext;
use crate::error::BotError;
use crate::recruitment::{render, Lineup, Roster};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use twilight_model::channel::message::embed::Embed;
use twilight_model::channel::message::component::Component;
use twilight_model::http::interaction::{
    InteractionResponse, InteractionResponseData, InteractionResponseType,
};
use twilight_model::id::{
    marker::{ChannelMarker, MessageMarker},
    Id,
};

/// Find the open roster in `channel_id`: the newest roster message posted
/// within the recruitment window.
pub async fn fetch_roster(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
) -> Result<(Id<MessageMarker>, Roster), BotError> {
    let messages = ctx
        .http
        .channel_messages(channel_id)
        .await
        .map_err(BotError::http("channel_messages"))?
        .models()
        .await
        .map_err(BotError::body("channel_messages"))?;

    let window = i64::try_from(ctx.recruitment_window.as_secs()).unwrap_or(i64::MAX);
    let cutoff = unix_now().saturating_sub(window);

    let found = Roster::latest(
        messages
            .iter()
            .map(|m| (m.id, m.timestamp.as_secs(), m.embeds.as_slice())),
        cutoff,
    );

    match found {
        Some((message_id, roster)) => {
            debug!(
                channel_id = %channel_id,
                message_id = %message_id,
                members = roster.len(),
                "Recovered roster"
            );
            Ok((message_id, roster))
        }
        None => Err(BotError::NoRecruitment {
            channel_id: channel_id.get(),
        }),
    }
}

/// Post a roster with its buttons.
pub async fn post_roster(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
    roster: &Roster,
    content: &str,
) -> Result<(), BotError> {
    let buttons = render::roster_buttons()?;
    send(ctx, channel_id, content, roster.embed(), &buttons).await
}

/// Interaction reply that opens a roster, used by `/start`.
pub(crate) fn roster_response(
    roster: &Roster,
    content: &str,
) -> Result<InteractionResponse, BotError> {
    Ok(InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(InteractionResponseData {
            components: Some(render::roster_buttons()?),
            content: Some(content.to_string()),
            embeds: Some(vec![roster.embed()]),
            ..Default::default()
        }),
    })
}

/// Replace the message `message_id` with a fresh roster at the bottom of the channel.
///
/// The old message is only removed once the new one is posted, so a failed
/// post leaves the round intact.
pub async fn repost_roster(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    roster: &Roster,
    content: &str,
) -> Result<(), BotError> {
    post_roster(ctx, channel_id, roster, content).await?;
    retire(ctx, channel_id, message_id).await;
    Ok(())
}

/// Replace the roster message `message_id` with the group listing.
pub async fn repost_lineup(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    lineup: &Lineup,
    content: &str,
) -> Result<(), BotError> {
    send(ctx, channel_id, content, lineup.embed(), &[]).await?;
    retire(ctx, channel_id, message_id).await;
    Ok(())
}

/// Plain text message, used for user-facing errors.
pub async fn say(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
    content: &str,
) -> Result<(), BotError> {
    ctx.http
        .create_message(channel_id)
        .content(content)
        .await
        .map_err(BotError::http("create_message"))?;
    Ok(())
}

async fn send(
    ctx: &BotContext,
    channel_id: Id<ChannelMarker>,
    content: &str,
    embed: Embed,
    components: &[Component],
) -> Result<(), BotError> {
    ctx.http
        .create_message(channel_id)
        .content(content)
        .embeds(&[embed])
        .components(components)
        .await
        .map_err(BotError::http("create_message"))?;
    Ok(())
}

/// Delete a superseded message. The replacement is already posted and is
/// newer, so a failure only leaves a stale copy behind.
async fn retire(ctx: &BotContext, channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) {
    if let Err(e) = ctx.http.delete_message(channel_id, message_id).await {
        ctx.metrics.record_error("delete_message");
        warn!(
            channel_id = %channel_id,
            message_id = %message_id,
            error = %e,
            "Failed to delete superseded message"
        );
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}
