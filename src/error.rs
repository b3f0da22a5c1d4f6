//! Domain error types for the grouping bot
//!
//! main.rs is the ONLY module allowed to use anyhow::Result (process boundary).
//! All application code returns Result<T, BotError>.

use thiserror::Error;

/// Bot domain errors
///
/// Recruitment variants are expected outcomes of user actions and carry a
/// message for the channel via [`BotError::user_message`]. Everything else is
/// an operational failure: logged and counted, never shown to users.
#[derive(Error, Debug)]
pub enum BotError {
    /// A participant count that cannot be planned (negative)
    #[error("invalid participant count {count}: must be zero or greater")]
    InvalidParticipantCount { count: i64 },

    /// No open recruitment in the channel within the lookup window
    #[error("no open recruitment in channel {channel_id}")]
    NoRecruitment { channel_id: u64 },

    /// Strict join for a user already on the roster
    #[error("user {user_id} already joined")]
    AlreadyJoined { user_id: u64 },

    /// Strict cancel for a user not on the roster
    #[error("user {user_id} has not joined")]
    NotJoined { user_id: u64 },

    /// Interaction arrived on a message that does not carry a roster
    #[error("message {message_id} is not a recruitment message")]
    InvalidMessage { message_id: u64 },

    /// Join command named only bots
    #[error("no members to join in command")]
    NoMembersToJoin,

    /// Cancel command named only bots
    #[error("no members to withdraw in command")]
    NoMembersToCancel,

    /// Join would take the roster past what one embed can list
    #[error("roster is full ({max} members)")]
    RosterFull { max: usize },

    /// Start pressed on an empty roster
    #[error("cannot form groups without participants")]
    NoParticipants,

    /// Discord REST call failed
    #[error("discord request failed: {action}")]
    Http {
        action: &'static str,
        #[source]
        source: twilight_http::Error,
    },

    /// Discord REST response could not be decoded
    #[error("discord response body invalid: {action}")]
    ResponseBody {
        action: &'static str,
        #[source]
        source: twilight_http::response::DeserializeBodyError,
    },

    /// Message component payload could not be built
    #[error("component payload invalid")]
    Component(#[source] serde_json::Error),

    /// Shard exceeded consecutive error threshold (circuit breaker tripped)
    #[error("shard {shard_id} exceeded consecutive error threshold ({count}/{max})")]
    ShardCircuitBroken { shard_id: u64, count: u32, max: u32 },

    /// Shard reconnection failed (fatal — shard marked dead)
    #[error("shard {shard_id} reconnection failed")]
    ShardReconnectFailed {
        shard_id: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Shard ID overflow: u64 value exceeds u32::MAX (Twilight API boundary)
    #[error("shard ID overflow: {value} exceeds u32::MAX")]
    ShardIdOverflow { value: u64 },

    /// Configuration error (environment variable or config file missing or invalid)
    #[error("configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// Returns a static label string suitable for Prometheus metrics.
    pub fn error_type_label(&self) -> &'static str {
        match self {
            Self::InvalidParticipantCount { .. } => "invalid_count",
            Self::NoRecruitment { .. } => "no_recruitment",
            Self::AlreadyJoined { .. } => "already_joined",
            Self::NotJoined { .. } => "not_joined",
            Self::InvalidMessage { .. } => "invalid_message",
            Self::NoMembersToJoin => "no_members_to_join",
            Self::NoMembersToCancel => "no_members_to_cancel",
            Self::RosterFull { .. } => "roster_full",
            Self::NoParticipants => "no_participants",
            Self::Http { .. } => "http",
            Self::ResponseBody { .. } => "response_body",
            Self::Component(_) => "component",
            Self::ShardCircuitBroken { .. } => "circuit_broken",
            Self::ShardReconnectFailed { .. } => "reconnect_failed",
            Self::ShardIdOverflow { .. } => "shard_overflow",
            Self::Config(_) => "config",
        }
    }

    /// Text to post back to the channel, if this error is the user's to see.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::NoRecruitment { .. } => Some("現在参加者は募集されていません"),
            Self::AlreadyJoined { .. } => Some("既に参加しています"),
            Self::NotJoined { .. } => Some("参加していません"),
            Self::InvalidMessage { .. } => Some("不正なメッセージです"),
            Self::NoMembersToJoin => Some("参加できるメンバーがいません"),
            Self::NoMembersToCancel => Some("取り消せるメンバーがいません"),
            Self::RosterFull { .. } => Some("参加人数が上限に達しています"),
            Self::NoParticipants => Some("参加者がいません"),
            _ => None,
        }
    }

    pub(crate) fn http(action: &'static str) -> impl FnOnce(twilight_http::Error) -> Self {
        move |source| Self::Http { action, source }
    }

    pub(crate) fn body(
        action: &'static str,
    ) -> impl FnOnce(twilight_http::response::DeserializeBodyError) -> Self {
        move |source| Self::ResponseBody { action, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_error() -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(std::io::Error::other("test"))
    }

    fn sample_errors() -> Vec<BotError> {
        vec![
            BotError::InvalidParticipantCount { count: -1 },
            BotError::NoRecruitment { channel_id: 1 },
            BotError::AlreadyJoined { user_id: 1 },
            BotError::NotJoined { user_id: 1 },
            BotError::InvalidMessage { message_id: 1 },
            BotError::NoMembersToJoin,
            BotError::NoMembersToCancel,
            BotError::RosterFull { max: 100 },
            BotError::NoParticipants,
            BotError::Component(serde_json::from_str::<()>("invalid").unwrap_err()),
            BotError::ShardCircuitBroken { shard_id: 0, count: 10, max: 10 },
            BotError::ShardReconnectFailed {
                shard_id: 0,
                source: test_error(),
            },
            BotError::ShardIdOverflow { value: u64::MAX },
            BotError::Config("test".to_string()),
        ]
    }

    #[test]
    fn every_variant_has_distinct_error_type_label() {
        let labels: Vec<_> = sample_errors().iter().map(BotError::error_type_label).collect();

        let mut unique = labels.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(labels.len(), unique.len(), "Duplicate error_type_label found");
    }

    #[test]
    fn only_recruitment_errors_reach_users() {
        for err in sample_errors() {
            let shown = err.user_message().is_some();
            let expected = matches!(
                err,
                BotError::NoRecruitment { .. }
                    | BotError::AlreadyJoined { .. }
                    | BotError::NotJoined { .. }
                    | BotError::InvalidMessage { .. }
                    | BotError::NoMembersToJoin
                    | BotError::NoMembersToCancel
                    | BotError::RosterFull { .. }
                    | BotError::NoParticipants
            );
            assert_eq!(shown, expected, "unexpected visibility for {err}");
        }
    }

    #[test]
    fn join_and_cancel_report_their_own_text() {
        assert_eq!(
            BotError::NoMembersToJoin.user_message(),
            Some("参加できるメンバーがいません")
        );
        assert_eq!(
            BotError::NoMembersToCancel.user_message(),
            Some("取り消せるメンバーがいません")
        );
    }

    #[test]
    fn error_messages_contain_context() {
        let err = BotError::InvalidParticipantCount { count: -3 };
        assert!(err.to_string().contains("-3"));

        let err = BotError::ShardCircuitBroken {
            shard_id: 3,
            count: 10,
            max: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("shard 3"), "message should contain shard_id");
        assert!(msg.contains("10/10"), "message should contain count/max");
    }

    #[test]
    fn config_error_preserves_message() {
        let err = BotError::Config("DISCORD_TOKEN must be set".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: DISCORD_TOKEN must be set"
        );
    }
}
