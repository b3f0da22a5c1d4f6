//! Group size planning
//!
//! Decides how many groups to form and how large each one is, from the
//! participant count alone. The plan never depends on who the participants
//! are or on any randomness.

use crate::error::BotError;

/// Preferred group size.
pub const FULL_GROUP: usize = 4;

/// Fallback group size used to absorb a remainder of one or two.
pub const SHORT_GROUP: usize = 3;

/// Ordered target sizes for each group, largest first.
///
/// The sizes always sum to the participant count. For counts of five or more
/// every size is 2, 3 or 4, and 2 only appears for exactly five participants.
/// Counts of four or fewer form a single group of that size, including the
/// degenerate plans `[0]` and `[1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSizePlan {
    sizes: Vec<usize>,
}

impl GroupSizePlan {
    /// Plan groups for `count` participants.
    pub fn for_count(count: usize) -> Self {
        let mut sizes = raw_sizes(count);
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Self { sizes }
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of participants the plan accounts for.
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Number of non-empty groups the plan produces.
    pub fn group_count(&self) -> usize {
        self.sizes.iter().filter(|&&size| size > 0).count()
    }

    pub fn into_sizes(self) -> Vec<usize> {
        self.sizes
    }
}

impl TryFrom<i64> for GroupSizePlan {
    type Error = BotError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        let count = usize::try_from(count)
            .map_err(|_| BotError::InvalidParticipantCount { count })?;
        Ok(Self::for_count(count))
    }
}

/// Group sizes for `count` participants, sorted descending.
pub fn group_sizes(count: usize) -> Vec<usize> {
    GroupSizePlan::for_count(count).into_sizes()
}

/// Unsorted construction: as many full groups as possible, trading some of
/// them for short groups when one or two participants would be left over.
fn raw_sizes(count: usize) -> Vec<usize> {
    if count <= FULL_GROUP {
        return vec![count];
    }

    let full = count / FULL_GROUP;
    match count % FULL_GROUP {
        0 => vec![FULL_GROUP; full],
        3 => {
            let mut sizes = vec![FULL_GROUP; full];
            sizes.push(SHORT_GROUP);
            sizes
        }
        // 2x4 + 1 becomes 3x3
        1 if full >= 2 => short_then_full(3, count),
        // only reachable for five
        1 => vec![3, 2],
        // 4 + 2 becomes 3x2
        _ => short_then_full(2, count),
    }
}

fn short_then_full(short: usize, count: usize) -> Vec<usize> {
    let full = (count - short * SHORT_GROUP) / FULL_GROUP;
    let mut sizes = vec![SHORT_GROUP; short];
    sizes.resize(short + full, FULL_GROUP);
    sizes
}
