//! Participation locks.
//!
//! A member's deposit is frozen while they take part in at least one open
//! proposal. Locks count participations, not tokens: one deposit can back
//! ballots in many open proposals at once.

use std::collections::HashMap;

use madao_types::Address;
use serde::{Deserialize, Serialize};

/// Number of open proposals each member currently participates in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTracker {
    counts: HashMap<Address, u32>,
}

impl LockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more open participation for `member`.
    ///
    /// Returns the new lock count.
    pub fn acquire(&mut self, member: Address) -> u32 {
        let count = self.counts.entry(member).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Drop one participation for `member`, floored at zero.
    ///
    /// Returns the remaining lock count.
    pub fn release(&mut self, member: &Address) -> u32 {
        match self.counts.get_mut(member) {
            Some(count) if *count > 1 => {
                *count -= 1;
                *count
            }
            Some(_) => {
                self.counts.remove(member);
                0
            }
            None => 0,
        }
    }

    pub fn count(&self, member: &Address) -> u32 {
        self.counts.get(member).copied().unwrap_or(0)
    }

    /// Whether `member`'s deposit is currently withdrawal-blocked.
    pub fn is_frozen(&self, member: &Address) -> bool {
        self.count(member) > 0
    }
}
