//! Recruitment state and its message encoding
//!
//! A recruitment round is a [`Roster`] posted as an embed with buttons. On
//! start it is replaced by a [`Lineup`] listing the groups.

mod lineup;
pub mod render;
mod roster;

pub use lineup::Lineup;
pub use roster::{Roster, MAX_MEMBERS};

/// Action bound to a roster button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterAction {
    Join,
    Cancel,
    Start,
}

impl RosterAction {
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            render::custom_ids::JOIN => Some(Self::Join),
            render::custom_ids::CANCEL => Some(Self::Cancel),
            render::custom_ids::START => Some(Self::Start),
            _ => None,
        }
    }

    /// Label for metrics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join => "button_join",
            Self::Cancel => "button_cancel",
            Self::Start => "button_start",
        }
    }
}

/// Channel text announcing a join.
pub fn joined_notice(names: &str) -> String {
    format!("{names}さんが参加しました")
}

/// Channel text announcing a withdrawal.
pub fn cancelled_notice(names: &str) -> String {
    format!("{names}さんが参加を取り消しました")
}

/// Channel text announcing a new recruitment.
pub fn opened_notice(host: &str) -> String {
    format!("{host}さんが募集を開始しました")
}

pub const STARTED_NOTICE: &str = "ゲームが開始されました";
