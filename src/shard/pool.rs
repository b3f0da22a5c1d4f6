//! Shard pool implementation
//!
//! Runs every shard of the bot in this process and hands events to the
//! recruitment handlers.

use crate::error::BotError;
use crate::handler::{self, BotContext};
use crate::metrics::BotMetrics;
use crate::shard::state::{ShardHealth, ShardState};

use std::sync::Arc;
use tracing::{debug, error, info, warn};
use twilight_gateway::{Config, EventTypeFlags, Intents, Shard, StreamExt as _};
use twilight_model::gateway::{event::Event, ShardId};

/// Circuit breaker: mark shard dead after N consecutive errors without success
const MAX_CONSECUTIVE_ERRORS: u32 = 10;

/// Events the bot reacts to, plus the lifecycle events used for health.
fn wanted_events() -> EventTypeFlags {
    EventTypeFlags::MESSAGE_CREATE
        | EventTypeFlags::INTERACTION_CREATE
        | EventTypeFlags::READY
        | EventTypeFlags::RESUMED
        | EventTypeFlags::GATEWAY_HEARTBEAT_ACK
}

/// Pool of Discord shards
pub struct ShardPool {
    shards: Vec<Shard>,
    state: ShardState,
    ctx: Arc<BotContext>,
    metrics: Arc<BotMetrics>,
}

impl ShardPool {
    /// Create shards `0..total_shards`
    pub fn new(
        total_shards: u64,
        token: String,
        intents: Intents,
        ctx: Arc<BotContext>,
        metrics: Arc<BotMetrics>,
    ) -> Result<Self, BotError> {
        info!(total_shards, "Creating shard pool");

        let state = ShardState::new(0..total_shards);

        // Safe u64 → u32 cast at Twilight API boundary
        let total_shards_u32 = u32::try_from(total_shards)
            .map_err(|_| BotError::ShardIdOverflow { value: total_shards })?;

        let shards = (0..total_shards_u32)
            .map(|shard_id| {
                let config = Config::new(token.clone(), intents);
                Shard::with_config(ShardId::new(shard_id, total_shards_u32), config)
            })
            .collect();

        Ok(Self {
            shards,
            state,
            ctx,
            metrics,
        })
    }

    /// Get shared state (for health checks)
    pub fn state(&self) -> ShardState {
        self.state.clone()
    }

    /// Run all shards in the pool
    ///
    /// This spawns a task for each shard and waits for all to complete.
    /// Dropping the returned future leaves shard tasks to the runtime shutdown.
    pub async fn run(self) -> Result<(), BotError> {
        let mut handles = Vec::with_capacity(self.shards.len());

        for shard in self.shards {
            let shard_id: u64 = shard.id().number().into();
            let state = self.state.clone();
            let ctx = Arc::clone(&self.ctx);
            let metrics = Arc::clone(&self.metrics);

            let handle = tokio::spawn(async move {
                if let Err(e) = run_shard(shard, state, ctx, Arc::clone(&metrics)).await {
                    metrics.record_error(e.error_type_label());
                    error!(shard_id, error = %e, "Shard task failed");
                }
            });

            handles.push(handle);
        }

        for handle in handles {
            let _ = handle.await;
        }

        info!("Shard pool shut down");
        Ok(())
    }
}

/// Run a single shard's event loop
async fn run_shard(
    mut shard: Shard,
    state: ShardState,
    ctx: Arc<BotContext>,
    metrics: Arc<BotMetrics>,
) -> Result<(), BotError> {
    let shard_id: u64 = shard.id().number().into();

    state.set_health(shard_id, ShardHealth::Connecting);

    info!(shard_id, "Shard starting");

    let mut consecutive_errors: u32 = 0;

    while let Some(item) = shard.next_event(wanted_events()).await {
        let event = match item {
            Ok(event) => {
                consecutive_errors = 0;
                event
            }
            Err(source) => {
                consecutive_errors += 1;
                warn!(shard_id, error = %source, consecutive = consecutive_errors, "Error receiving event");

                // Immediate fatal: reconnect failure
                if matches!(
                    source.kind(),
                    twilight_gateway::error::ReceiveMessageErrorType::Reconnect
                ) {
                    state.set_health(shard_id, ShardHealth::Dead);
                    error!(shard_id, "Fatal gateway error (reconnect failed)");
                    return Err(BotError::ShardReconnectFailed {
                        shard_id,
                        source: Box::new(source),
                    });
                }

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    state.set_health(shard_id, ShardHealth::Dead);
                    error!(shard_id, consecutive = consecutive_errors, "Shard dead: consecutive error threshold exceeded");
                    return Err(BotError::ShardCircuitBroken {
                        shard_id,
                        count: consecutive_errors,
                        max: MAX_CONSECUTIVE_ERRORS,
                    });
                }

                // Non-fatal transient error
                metrics.record_error("receive_error");
                state.set_health(shard_id, ShardHealth::Disconnected);
                continue;
            }
        };

        state.record_event(shard_id);
        metrics.record_event(shard_id, &event);

        match &event {
            Event::Ready(ready) => {
                state.set_health(shard_id, ShardHealth::Ready);
                state.set_guilds(shard_id, ready.guilds.len() as u64);
                metrics.set_guilds(shard_id, ready.guilds.len() as u64);
                info!(
                    shard_id,
                    guilds = ready.guilds.len(),
                    user = %ready.user.name,
                    "Shard ready"
                );
                continue;
            }
            Event::Resumed => {
                state.set_health(shard_id, ShardHealth::Ready);
                info!(shard_id, "Shard resumed");
                continue;
            }
            Event::GatewayHeartbeatAck => {
                state.record_heartbeat(shard_id);
                metrics.record_heartbeat(shard_id);
                continue;
            }
            Event::MessageCreate(_) | Event::InteractionCreate(_) => {}
            other => {
                debug!(shard_id, kind = ?other.kind(), "Ignoring event");
                continue;
            }
        }

        tokio::spawn(handler::handle_event(Arc::clone(&ctx), event));
    }

    // Stream ended — shard closed
    info!(shard_id, "Shard event stream ended");
    Ok(())
}
