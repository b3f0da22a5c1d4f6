//! Grouping Bot - Discord recruitment bot using Twilight
//!
//! Members join a recruitment post with buttons or text commands; on start
//! the participants are shuffled and split into groups of 3 or 4.
//!
//! - [`grouping`]: pure partitioning logic (size plan, allocation, shuffle)
//! - [`recruitment`]: roster/lineup state encoded in message embeds
//! - [`handler`]: gateway event handling over the Discord REST API
//! - [`shard`], [`health`], [`metrics`]: runtime plumbing

pub mod commands;
pub mod config;
pub mod error;
pub mod grouping;
pub mod handler;
pub mod health;
pub mod metrics;
pub mod recruitment;
pub mod shard;
