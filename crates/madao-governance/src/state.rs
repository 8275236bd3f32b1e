//! Governance state aggregate.

use serde::{Deserialize, Serialize};

use crate::ledger::DepositLedger;
use crate::locks::LockTracker;
use crate::proposal::ProposalRegistry;

/// Everything the engine persists between calls: deposits, participation
/// locks and the full proposal table with its ballots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceState {
    pub ledger: DepositLedger,
    pub locks: LockTracker,
    pub proposals: ProposalRegistry,
}

impl GovernanceState {
    pub fn new() -> Self {
        Self::default()
    }
}
