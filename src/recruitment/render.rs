//! Embed and component encoding for recruitment messages
//!
//! The bot keeps no database: a roster lives in the fields of the embed it
//! posts, and is read back from channel history on the next action.

use crate::error::BotError;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::{Embed, EmbedField};
use twilight_model::id::{marker::UserMarker, Id};

/// Title of the open-recruitment embed.
pub const ROSTER_TITLE: &str = "参加者一覧";

/// Title of the group listing embed.
pub const LINEUP_TITLE: &str = "グループ分け";

/// Discord "green".
pub const ROSTER_COLOR: u32 = 0x2ecc71;

/// Discord "gold"/"yellow".
pub const LINEUP_COLOR: u32 = 0xf1c40f;

/// Discord's limit on fields per embed.
pub const MAX_FIELDS: usize = 25;

/// Button custom ids, stable across restarts.
pub mod custom_ids {
    pub const JOIN: &str = "game_join";
    pub const CANCEL: &str = "game_cancel";
    pub const START: &str = "game_start";
}

const MENTION_PREFIX: &str = "> <@";

/// One quoted mention line: `> <@123>`.
pub fn mention_line(user_id: Id<UserMarker>) -> String {
    format!("{MENTION_PREFIX}{user_id}>")
}

/// Inverse of [`mention_line`]. Also accepts the legacy nickname form `<@!123>`.
pub fn parse_mention_line(line: &str) -> Option<Id<UserMarker>> {
    let inner = line.trim().strip_prefix(MENTION_PREFIX)?.strip_suffix('>')?;
    let digits = inner.strip_prefix('!').unwrap_or(inner);
    Id::new_checked(digits.parse().ok()?)
}

pub(crate) fn field(name: String, value: String) -> EmbedField {
    EmbedField {
        inline: false,
        name,
        value,
    }
}

pub(crate) fn embed(title: &str, color: u32, fields: Vec<EmbedField>) -> Embed {
    Embed {
        author: None,
        color: Some(color),
        description: None,
        fields,
        footer: None,
        image: None,
        kind: "rich".to_string(),
        provider: None,
        thumbnail: None,
        timestamp: None,
        title: Some(title.to_string()),
        url: None,
        video: None,
    }
}

/// The first embed, if it carries `title`.
pub fn titled<'a>(embeds: &'a [Embed], title: &str) -> Option<&'a Embed> {
    embeds
        .first()
        .filter(|embed| embed.title.as_deref() == Some(title))
}

/// Join / cancel / start buttons attached to an open roster.
///
/// Built from the Discord wire payload so the row stays valid across
/// component model revisions.
pub fn roster_buttons() -> Result<Vec<Component>, BotError> {
    let row = serde_json::json!({
        "type": 1,
        "components": [
            { "type": 2, "style": 1, "label": "参加する", "custom_id": custom_ids::JOIN },
            { "type": 2, "style": 4, "label": "取り消し", "custom_id": custom_ids::CANCEL },
            { "type": 2, "style": 3, "label": "開始", "custom_id": custom_ids::START },
        ],
    });

    let row: Component = serde_json::from_value(row).map_err(BotError::Component)?;
    Ok(vec![row])
}
