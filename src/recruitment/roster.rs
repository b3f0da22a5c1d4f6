//! Open recruitment roster

use super::render::{self, MAX_FIELDS, ROSTER_COLOR, ROSTER_TITLE};
use crate::error::BotError;
use crate::grouping::FULL_GROUP;
use twilight_model::channel::message::embed::Embed;
use twilight_model::id::{marker::UserMarker, Id};

/// Mention lines per roster field.
pub const MEMBERS_PER_FIELD: usize = FULL_GROUP;

/// Largest roster one embed can list. A lineup of this many members also
/// needs at most [`MAX_FIELDS`] groups.
pub const MAX_MEMBERS: usize = MAX_FIELDS * MEMBERS_PER_FIELD;

/// Participants who joined a recruitment round, in join order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    member_ids: Vec<Id<UserMarker>>,
}

impl Roster {
    /// Roster opened by `host`, who is its first member.
    pub fn started_by(host: Id<UserMarker>) -> Self {
        Self {
            member_ids: vec![host],
        }
    }

    pub fn member_ids(&self) -> &[Id<UserMarker>] {
        &self.member_ids
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    pub fn has(&self, user_id: Id<UserMarker>) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Add `user_id` to the end of the roster.
    ///
    /// Returns whether the roster changed. When `strict`, adding an existing
    /// member fails instead of being a no-op. A newcomer is refused once the
    /// roster holds [`MAX_MEMBERS`].
    pub fn add(&mut self, user_id: Id<UserMarker>, strict: bool) -> Result<bool, BotError> {
        if !self.has(user_id) {
            if self.member_ids.len() >= MAX_MEMBERS {
                return Err(BotError::RosterFull { max: MAX_MEMBERS });
            }
            self.member_ids.push(user_id);
            return Ok(true);
        }
        if strict {
            return Err(BotError::AlreadyJoined {
                user_id: user_id.get(),
            });
        }
        Ok(false)
    }

    /// Remove `user_id`, keeping the order of the others.
    ///
    /// Returns whether the roster changed. When `strict`, removing a
    /// non-member fails instead of being a no-op.
    pub fn remove(&mut self, user_id: Id<UserMarker>, strict: bool) -> Result<bool, BotError> {
        if let Some(pos) = self.member_ids.iter().position(|&id| id == user_id) {
            self.member_ids.remove(pos);
            return Ok(true);
        }
        if strict {
            return Err(BotError::NotJoined {
                user_id: user_id.get(),
            });
        }
        Ok(false)
    }

    /// Encode as the roster embed.
    ///
    /// Members are listed [`MEMBERS_PER_FIELD`] to a field, one mention line
    /// each, under the position range they cover (`"1-4"`, `"5-8"`, `"9"`).
    pub fn embed(&self) -> Embed {
        let fields = self
            .member_ids
            .chunks(MEMBERS_PER_FIELD)
            .enumerate()
            .map(|(chunk, ids)| {
                let first = chunk * MEMBERS_PER_FIELD + 1;
                let last = first + ids.len() - 1;
                let name = if first == last {
                    first.to_string()
                } else {
                    format!("{first}-{last}")
                };
                let lines = ids
                    .iter()
                    .map(|&id| render::mention_line(id))
                    .collect::<Vec<_>>()
                    .join("\n");
                render::field(name, lines)
            })
            .collect();
        render::embed(ROSTER_TITLE, ROSTER_COLOR, fields)
    }

    /// Decode a roster embed, reading every mention line of every field.
    /// Lines that are not member mentions are skipped.
    pub fn from_embed(embed: &Embed) -> Self {
        let mut roster = Self::default();
        let lines = embed.fields.iter().flat_map(|field| field.value.lines());
        for id in lines.filter_map(render::parse_mention_line) {
            // Hand-edited or duplicated lines collapse to one entry
            if !roster.has(id) {
                roster.member_ids.push(id);
            }
        }
        roster
    }

    /// Decode the roster carried by a message's embeds, if it has one.
    pub fn from_embeds(embeds: &[Embed]) -> Option<Self> {
        render::titled(embeds, ROSTER_TITLE).map(Self::from_embed)
    }

    /// Pick the newest roster among `candidates` posted at or after
    /// `cutoff_secs` (unix seconds).
    ///
    /// Candidates are `(key, posted_at_secs, embeds)` in any order; the key of
    /// the winning message is returned with its roster.
    pub fn latest<'a, K, I>(candidates: I, cutoff_secs: i64) -> Option<(K, Self)>
    where
        I: IntoIterator<Item = (K, i64, &'a [Embed])>,
    {
        candidates
            .into_iter()
            .filter(|(_, posted_at, _)| *posted_at >= cutoff_secs)
            .filter_map(|(key, posted_at, embeds)| {
                Self::from_embeds(embeds).map(|roster| (posted_at, key, roster))
            })
            .max_by_key(|(posted_at, _, _)| *posted_at)
            .map(|(_, key, roster)| (key, roster))
    }
}
