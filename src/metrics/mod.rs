//! Prometheus metrics module

use crate::error::BotError;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use twilight_model::gateway::event::Event;

/// Bot metrics collector
#[derive(Clone)]
pub struct BotMetrics {
    handle: Arc<PrometheusHandle>,
}

impl BotMetrics {
    /// Install the global Prometheus recorder and return a handle
    pub fn install() -> Result<Self, BotError> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| BotError::Config(format!("failed to install Prometheus recorder: {e}")))?;

        Self::register_metrics();

        Ok(Self {
            handle: Arc::new(handle),
        })
    }

    /// Handle backed by a recorder that is not installed globally.
    ///
    /// Rendering works; the `counter!`/`gauge!` macros become no-ops.
    pub fn detached() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        Self {
            handle: Arc::new(recorder.handle()),
        }
    }

    /// Register metric descriptions
    fn register_metrics() {
        describe_counter!(
            "bot_events_received_total",
            Unit::Count,
            "Total events received from Discord"
        );
        describe_counter!(
            "bot_commands_total",
            Unit::Count,
            "Commands and button presses handled"
        );
        describe_counter!(
            "bot_groups_formed_total",
            Unit::Count,
            "Groups produced by started recruitments"
        );
        describe_counter!("bot_errors_total", Unit::Count, "Total bot errors");

        describe_histogram!(
            "bot_lineup_participants",
            Unit::Count,
            "Participants per started recruitment"
        );

        describe_gauge!(
            "bot_shards_ready",
            Unit::Count,
            "Number of shards in ready state"
        );
        describe_gauge!(
            "bot_guilds_total",
            Unit::Count,
            "Guilds reported by each shard on ready"
        );
    }

    /// Record an event received
    pub fn record_event(&self, shard_id: u64, event: &Event) {
        let event_type = match event {
            Event::MessageCreate(_) => "message_create",
            Event::InteractionCreate(_) => "interaction_create",
            Event::Ready(_) => "ready",
            Event::Resumed => "resumed",
            Event::GatewayHeartbeatAck => "heartbeat_ack",
            _ => "other",
        };

        counter!(
            "bot_events_received_total",
            "shard_id" => shard_id.to_string(),
            "event_type" => event_type
        )
        .increment(1);
    }

    /// Record a handled command or button press
    pub fn record_command(&self, command: &'static str) {
        counter!("bot_commands_total", "command" => command).increment(1);
    }

    /// Record a started recruitment
    pub fn record_lineup(&self, groups: usize, participants: usize) {
        counter!("bot_groups_formed_total").increment(groups as u64);
        histogram!("bot_lineup_participants").record(participants as f64);
    }

    /// Record an error by type label
    pub fn record_error(&self, error_type: &'static str) {
        counter!("bot_errors_total", "error_type" => error_type).increment(1);
    }

    /// Record heartbeat
    pub fn record_heartbeat(&self, shard_id: u64) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        gauge!(
            "bot_last_heartbeat_timestamp",
            "shard_id" => shard_id.to_string()
        )
        .set(now);
    }

    /// Set guild count for a shard
    pub fn set_guilds(&self, shard_id: u64, count: u64) {
        gauge!(
            "bot_guilds_total",
            "shard_id" => shard_id.to_string()
        )
        .set(count as f64);
    }

    /// Set shards ready count
    pub fn set_shards_ready(&self, count: usize) {
        gauge!("bot_shards_ready").set(count as f64);
    }

    /// Render metrics in Prometheus format
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
