//! Closing expired proposals.
//!
//! `finish` decides the outcome, runs the recipient call for approved
//! proposals and only then commits: locks are released and the terminal
//! status is written. A reverted call leaves the proposal Open so it can be
//! finished again later.

use madao_types::{Amount, Timestamp};

use crate::collaborators::Executor;
use crate::error::GovernanceError;
use crate::locks::LockTracker;
use crate::proposal::{Proposal, ProposalRecord, ProposalStatus};

/// Outcome of the tally once voting has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No weight was cast at all
    NoTurnout,
    /// Weight cast stayed below the configured minimum quorum
    QuorumNotReached { cast: Amount, required: Amount },
    /// Not strictly more weight for than against; ties fall here
    Defeated,
    /// The recipient call should be executed
    Approved,
}

impl Decision {
    /// Status written when this decision is committed.
    pub fn status(&self) -> ProposalStatus {
        match self {
            Decision::NoTurnout => ProposalStatus::Cancelled,
            Decision::QuorumNotReached { .. } | Decision::Defeated => ProposalStatus::Rejected,
            Decision::Approved => ProposalStatus::Finished,
        }
    }
}

/// Evaluate the tally of `proposal` against `minimum_quorum`.
pub fn decide(proposal: &Proposal, minimum_quorum: Amount) -> Decision {
    let cast = proposal.total_votes();
    if cast == 0 {
        return Decision::NoTurnout;
    }

    if cast < minimum_quorum {
        return Decision::QuorumNotReached {
            cast,
            required: minimum_quorum,
        };
    }

    if proposal.votes_for > proposal.votes_against {
        Decision::Approved
    } else {
        Decision::Defeated
    }
}

/// Close `record` and return its terminal status.
///
/// # Errors
/// - `HandledAlready` if the proposal already has a terminal status
/// - `VotingInProcess` before the deadline
/// - `RecipientCallError` if an approved proposal's call reverts; nothing is
///   changed in that case
pub fn finish<X: Executor + ?Sized>(
    record: &mut ProposalRecord,
    locks: &mut LockTracker,
    executor: &mut X,
    minimum_quorum: Amount,
    now: Timestamp,
) -> Result<ProposalStatus, GovernanceError> {
    let proposal = &record.proposal;
    if proposal.status.is_terminal() {
        return Err(GovernanceError::HandledAlready);
    }

    if !proposal.is_expired(now) {
        return Err(GovernanceError::VotingInProcess);
    }

    let decision = decide(proposal, minimum_quorum);
    if decision == Decision::Approved {
        let outcome = executor.call(proposal.recipient, &proposal.payload);
        if !outcome.success {
            tracing::warn!(
                "Recipient call of proposal #{} to {} reverted ({} bytes returned)",
                proposal.id,
                proposal.recipient,
                outcome.return_data.len()
            );
            return Err(GovernanceError::RecipientCallError(hex::encode(
                outcome.return_data,
            )));
        }
    }

    for member in record.ballots.participants() {
        locks.release(member);
    }

    let status = decision.status();
    record.proposal.status = status;
    tracing::debug!(
        "Proposal #{} decided: {:?}, participants={}",
        record.proposal.id,
        decision,
        record.ballots.len()
    );

    Ok(status)
}
