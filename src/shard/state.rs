//! Shard state tracking

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Health status for a shard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardHealth {
    /// Shard is connecting
    Connecting,
    /// Shard is ready and receiving events
    Ready,
    /// Shard is disconnected
    Disconnected,
    /// Shard encountered a fatal error
    Dead,
}

impl ShardHealth {
    /// Returns true if the shard is ready to receive events
    pub fn is_ready(&self) -> bool {
        matches!(self, ShardHealth::Ready)
    }
}

/// State for a single shard
#[derive(Debug)]
pub struct ShardStateEntry {
    pub health: ShardHealth,
    pub guilds: u64,
    pub events_received: AtomicU64,
    pub last_heartbeat: Option<Instant>,
    pub connected_at: Option<Instant>,
}

impl Default for ShardStateEntry {
    fn default() -> Self {
        Self {
            health: ShardHealth::Connecting,
            guilds: 0,
            events_received: AtomicU64::new(0),
            last_heartbeat: None,
            connected_at: None,
        }
    }
}

/// Shared state across all shards in the process
#[derive(Debug, Clone)]
pub struct ShardState {
    inner: Arc<DashMap<u64, ShardStateEntry>>,
}

impl ShardState {
    /// Create a new shard state tracker
    pub fn new(shard_ids: impl Iterator<Item = u64>) -> Self {
        let shards = DashMap::new();
        for shard_id in shard_ids {
            shards.insert(shard_id, ShardStateEntry::default());
        }

        Self {
            inner: Arc::new(shards),
        }
    }

    /// Update shard health
    pub fn set_health(&self, shard_id: u64, health: ShardHealth) {
        if let Some(mut entry) = self.inner.get_mut(&shard_id) {
            entry.health = health;
            if health == ShardHealth::Ready && entry.connected_at.is_none() {
                entry.connected_at = Some(Instant::now());
            }
        }
    }

    /// Update shard guild count
    pub fn set_guilds(&self, shard_id: u64, count: u64) {
        if let Some(mut entry) = self.inner.get_mut(&shard_id) {
            entry.guilds = count;
        }
    }

    /// Increment event received counter
    pub fn record_event(&self, shard_id: u64) {
        if let Some(entry) = self.inner.get(&shard_id) {
            entry.events_received.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record heartbeat
    pub fn record_heartbeat(&self, shard_id: u64) {
        if let Some(mut entry) = self.inner.get_mut(&shard_id) {
            entry.last_heartbeat = Some(Instant::now());
        }
    }

    /// Get health for a specific shard
    pub fn get_health(&self, shard_id: u64) -> Option<ShardHealth> {
        self.inner.get(&shard_id).map(|e| e.health)
    }

    /// Get total events received across all shards
    pub fn total_events_received(&self) -> u64 {
        self.inner
            .iter()
            .map(|e| e.events_received.load(Ordering::Relaxed))
            .sum()
    }

    /// Get total guilds across all shards
    pub fn total_guilds(&self) -> u64 {
        self.inner.iter().map(|e| e.guilds).sum()
    }

    /// Get count of ready shards
    pub fn ready_shards(&self) -> usize {
        self.inner.iter().filter(|e| e.health.is_ready()).count()
    }

    /// Get total shard count
    pub fn shard_count(&self) -> usize {
        self.inner.len()
    }

    /// Check if the bot is ready (at least one shard ready)
    pub fn is_ready(&self) -> bool {
        self.ready_shards() > 0
    }
}
