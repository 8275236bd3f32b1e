//! Proposal lifecycle management.
//!
//! Proposals go through states: Open -> Finished/Rejected/Cancelled.
//! The terminal transition happens exactly once.

use madao_types::{Address, Amount, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::ballot::BallotBook;
use crate::error::GovernanceError;

/// Proposal status in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes until the deadline, then waiting for `finish`
    Open,
    /// Approved and the recipient call succeeded
    Finished,
    /// Turnout below quorum, or not more votes for than against
    Rejected,
    /// Nobody voted
    Cancelled,
}

impl ProposalStatus {
    /// Numeric code used by external callers (Open=0 … Cancelled=3).
    pub fn code(&self) -> u8 {
        match self {
            ProposalStatus::Open => 0,
            ProposalStatus::Finished => 1,
            ProposalStatus::Rejected => 2,
            ProposalStatus::Cancelled => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProposalStatus::Open)
    }
}

/// A proposal to call `recipient` with `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential ID starting at 1
    pub id: ProposalId,
    /// Call target on approval
    pub recipient: Address,
    /// Opaque call data
    pub payload: Vec<u8>,
    pub description: String,
    /// Votes are accepted strictly before this instant
    pub deadline: Timestamp,
    pub votes_for: Amount,
    pub votes_against: Amount,
    pub status: ProposalStatus,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        recipient: Address,
        payload: Vec<u8>,
        description: String,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            recipient,
            payload,
            description,
            deadline,
            votes_for: 0,
            votes_against: 0,
            status: ProposalStatus::Open,
        }
    }

    pub fn total_votes(&self) -> Amount {
        self.votes_for.saturating_add(self.votes_against)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.deadline
    }

    /// Check that ballots can still be cast at `now`.
    pub fn ensure_accepting_ballots(&self, now: Timestamp) -> Result<(), GovernanceError> {
        if self.status.is_terminal() {
            return Err(GovernanceError::HandledAlready);
        }

        if self.is_expired(now) {
            return Err(GovernanceError::VotingPeriodEnded);
        }

        Ok(())
    }

    pub(crate) fn add_votes(&mut self, in_favor: bool, weight: Amount) {
        if in_favor {
            self.votes_for = self.votes_for.saturating_add(weight);
        } else {
            self.votes_against = self.votes_against.saturating_add(weight);
        }
    }
}

/// A proposal together with the ballots cast on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub proposal: Proposal,
    pub ballots: BallotBook,
}

/// Proposal table indexed by sequential ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRegistry {
    records: Vec<ProposalRecord>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a proposal and return its ID.
    pub fn create(
        &mut self,
        recipient: Address,
        payload: Vec<u8>,
        description: String,
        deadline: Timestamp,
    ) -> ProposalId {
        let id = self.records.len() as ProposalId + 1;
        self.records.push(ProposalRecord {
            proposal: Proposal::new(id, recipient, payload, description, deadline),
            ballots: BallotBook::new(),
        });
        id
    }

    fn index(id: ProposalId) -> Option<usize> {
        id.checked_sub(1).and_then(|i| usize::try_from(i).ok())
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.record(id).ok().map(|r| &r.proposal)
    }

    pub fn record(&self, id: ProposalId) -> Result<&ProposalRecord, GovernanceError> {
        Self::index(id)
            .and_then(|i| self.records.get(i))
            .ok_or(GovernanceError::NoSuchVoting(id))
    }

    pub fn record_mut(&mut self, id: ProposalId) -> Result<&mut ProposalRecord, GovernanceError> {
        Self::index(id)
            .and_then(|i| self.records.get_mut(i))
            .ok_or(GovernanceError::NoSuchVoting(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Proposals still waiting for `finish`.
    pub fn open(&self) -> Vec<&Proposal> {
        self.records
            .iter()
            .map(|r| &r.proposal)
            .filter(|p| p.status == ProposalStatus::Open)
            .collect()
    }
}
