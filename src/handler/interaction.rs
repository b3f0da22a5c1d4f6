//! Interaction handling: roster buttons and the `/start` command

use super::{channel, display_name, BotContext};
use crate::commands::{slash, Command};
use crate::error::BotError;
use crate::recruitment::{self, Lineup, Roster, RosterAction, STARTED_NOTICE};
use tracing::{debug, info, warn};
use twilight_model::application::interaction::{Interaction, InteractionData, InteractionType};
use twilight_model::channel::message::MessageFlags;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};

/// Shown when a button fails for a reason the user cannot act on.
const GENERIC_FAILURE: &str = "処理に失敗しました";

/// Handle an interaction: a roster button or an application command
pub async fn handle_interaction(ctx: &BotContext, interaction: &Interaction) -> Result<(), BotError> {
    match interaction.kind {
        InteractionType::MessageComponent => handle_component(ctx, interaction).await,
        InteractionType::ApplicationCommand => handle_command(ctx, interaction).await,
        _ => Ok(()),
    }
}

async fn handle_command(ctx: &BotContext, interaction: &Interaction) -> Result<(), BotError> {
    let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
        return Ok(());
    };
    let Some(command) = slash::from_name(&data.name) else {
        debug!(name = %data.name, "Ignoring unknown application command");
        return Ok(());
    };
    let Some(user) = interaction.author() else {
        debug!(interaction_id = %interaction.id, "Application command without user");
        return Ok(());
    };

    ctx.metrics.record_command(command.name());
    info!(
        command = command.name(),
        channel_id = ?interaction.channel.as_ref().map(|c| c.id),
        user_id = %user.id,
        "Handling application command"
    );

    match command {
        Command::Start => {
            let roster = Roster::started_by(user.id);
            let host = display_name(interaction.member.as_ref(), user);
            let response = channel::roster_response(&roster, &recruitment::opened_notice(&host))?;
            ctx.http
                .interaction(ctx.application_id)
                .create_response(interaction.id, &interaction.token, &response)
                .await
                .map_err(BotError::http("create_response"))?;
            Ok(())
        }
        // never registered as slash commands
        Command::Join | Command::Cancel => Ok(()),
    }
}

async fn handle_component(ctx: &BotContext, interaction: &Interaction) -> Result<(), BotError> {
    let Some(InteractionData::MessageComponent(data)) = &interaction.data else {
        return Ok(());
    };
    let Some(action) = RosterAction::from_custom_id(&data.custom_id) else {
        debug!(custom_id = %data.custom_id, "Ignoring unknown component");
        return Ok(());
    };

    ctx.metrics.record_command(action.name());

    let client = ctx.http.interaction(ctx.application_id);
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredUpdateMessage,
        data: None,
    };
    client
        .create_response(interaction.id, &interaction.token, &response)
        .await
        .map_err(BotError::http("defer_interaction"))?;

    let result = apply(ctx, interaction, action).await;

    if let Err(ref e) = result {
        let text = e.user_message().unwrap_or(GENERIC_FAILURE);
        if let Err(send_err) = client
            .create_followup(&interaction.token)
            .content(text)
            .flags(MessageFlags::EPHEMERAL)
            .await
        {
            warn!(error = %send_err, "Failed to send ephemeral error");
        }
    }
    result
}

async fn apply(
    ctx: &BotContext,
    interaction: &Interaction,
    action: RosterAction,
) -> Result<(), BotError> {
    let Some(message) = interaction.message.as_ref() else {
        debug!(interaction_id = %interaction.id, "Component interaction without message");
        return Ok(());
    };
    let mut roster = Roster::from_embeds(&message.embeds).ok_or(BotError::InvalidMessage {
        message_id: message.id.get(),
    })?;
    let Some(user) = interaction.author() else {
        debug!(interaction_id = %interaction.id, "Component interaction without user");
        return Ok(());
    };
    let name = display_name(interaction.member.as_ref(), user);

    info!(
        action = action.name(),
        channel_id = %message.channel_id,
        user_id = %user.id,
        members = roster.len(),
        "Handling roster button"
    );

    match action {
        RosterAction::Join => {
            roster.add(user.id, true)?;
            channel::repost_roster(
                ctx,
                message.channel_id,
                message.id,
                &roster,
                &recruitment::joined_notice(&name),
            )
            .await
        }
        RosterAction::Cancel => {
            roster.remove(user.id, true)?;
            channel::repost_roster(
                ctx,
                message.channel_id,
                message.id,
                &roster,
                &recruitment::cancelled_notice(&name),
            )
            .await
        }
        RosterAction::Start => {
            // ThreadRng is !Send; keep it out of the await below
            let lineup = Lineup::from_roster(&roster, &mut rand::rng())?;
            ctx.metrics
                .record_lineup(lineup.groups().len(), lineup.participant_count());
            info!(
                channel_id = %message.channel_id,
                participants = lineup.participant_count(),
                groups = lineup.groups().len(),
                "Recruitment started"
            );
            channel::repost_lineup(ctx, message.channel_id, message.id, &lineup, STARTED_NOTICE)
                .await
        }
    }
}
