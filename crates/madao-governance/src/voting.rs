//! Vote casting.
//!
//! Weight = own deposit + delegated credit received on the same proposal.

use madao_types::{Address, Amount, Timestamp};

use crate::ballot::Ballot;
use crate::error::GovernanceError;
use crate::ledger::DepositLedger;
use crate::locks::LockTracker;
use crate::proposal::ProposalRecord;

/// Cast `voter`'s ballot on `record`.
///
/// Returns the weight added to the tally.
///
/// # Errors
/// - `HandledAlready` / `VotingPeriodEnded` once the proposal stops accepting ballots
/// - `NoDeposit` if the voter has nothing in escrow; delegated credit alone
///   does not authorize a vote
/// - `VotedAlready` if the voter already voted or delegated
pub fn cast_vote(
    record: &mut ProposalRecord,
    ledger: &DepositLedger,
    locks: &mut LockTracker,
    voter: Address,
    in_favor: bool,
    now: Timestamp,
) -> Result<Amount, GovernanceError> {
    record.proposal.ensure_accepting_ballots(now)?;

    let own = ledger.balance_of(&voter);
    if own == 0 {
        return Err(GovernanceError::NoDeposit);
    }

    if record.ballots.has_ballot(&voter) {
        return Err(GovernanceError::VotedAlready);
    }

    let weight = own.saturating_add(record.ballots.take_credit(&voter));
    record.proposal.add_votes(in_favor, weight);
    record.ballots.record(voter, Ballot::Voted { in_favor, weight });
    locks.acquire(voter);

    Ok(weight)
}
