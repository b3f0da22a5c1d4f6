//! Group partitioning
//!
//! Pure logic with no Discord types: plan group sizes from a head count,
//! shuffle participants, and slice the shuffled list into groups of 3 or 4.

mod allocate;
mod plan;
mod shuffle;

pub use allocate::allocate;
pub use plan::{group_sizes, GroupSizePlan, FULL_GROUP, SHORT_GROUP};
pub use shuffle::shuffle;

use rand::Rng;

/// Every participant assigned to exactly one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    groups: Vec<Vec<T>>,
}

impl<T> Partition<T> {
    /// Shuffle `participants` with `rng`, then allocate them into groups.
    pub fn shuffled<R>(participants: Vec<T>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::in_order(shuffle(participants, rng))
    }

    /// Allocate `participants` as given, without shuffling.
    pub fn in_order(participants: Vec<T>) -> Self {
        Self {
            groups: allocate(participants),
        }
    }

    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<T>> {
        self.groups
    }

    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
