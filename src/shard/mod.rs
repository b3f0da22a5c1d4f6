//! Shard management module

mod pool;
mod state;

pub use pool::ShardPool;
pub use state::{ShardHealth, ShardState};
