//! Per-proposal delegation of voting rights.
//!
//! A delegator hands their whole ballot on one proposal to another member.
//! The delegator's deposit, plus any credit they had received themselves, is
//! added to the delegate's next vote on that proposal. Delegating consumes
//! the delegator's ballot and locks their deposit until the proposal is
//! finished.

use madao_types::{Address, Amount, Timestamp};

use crate::ballot::{Ballot, BallotBook};
use crate::error::GovernanceError;
use crate::ledger::DepositLedger;
use crate::locks::LockTracker;
use crate::proposal::ProposalRecord;

/// Hand `delegator`'s ballot on `record` to `delegate`.
///
/// Returns the weight credited to the delegate.
///
/// # Errors
/// - `HandledAlready` / `VotingPeriodEnded` once the proposal stops accepting ballots
/// - `NoDeposit` if the delegator has nothing in escrow
/// - `VotedAlready` if the delegator already voted or delegated
/// - `DelegateVotedAlready` if the delegate already voted or delegated
/// - `SelfDelegation` if both are the same member
pub fn delegate(
    record: &mut ProposalRecord,
    ledger: &DepositLedger,
    locks: &mut LockTracker,
    delegator: Address,
    delegate: Address,
    now: Timestamp,
) -> Result<Amount, GovernanceError> {
    record.proposal.ensure_accepting_ballots(now)?;

    let own = ledger.balance_of(&delegator);
    if own == 0 {
        return Err(GovernanceError::NoDeposit);
    }

    let book = &mut record.ballots;
    if book.has_ballot(&delegator) {
        return Err(GovernanceError::VotedAlready);
    }

    if book.has_ballot(&delegate) {
        return Err(GovernanceError::DelegateVotedAlready);
    }

    if delegator == delegate {
        return Err(GovernanceError::SelfDelegation);
    }

    let weight = own.saturating_add(book.take_credit(&delegator));
    book.add_credit(delegate, weight);
    book.record(delegator, Ballot::Delegated { to: delegate, weight });
    locks.acquire(delegator);

    Ok(weight)
}

/// Members who handed their ballot directly to `delegate`.
pub fn delegators_of(book: &BallotBook, delegate: &Address) -> Vec<Address> {
    let mut delegators: Vec<Address> = book
        .participants()
        .filter(|member| {
            matches!(book.ballot(member), Some(Ballot::Delegated { to, .. }) if to == delegate)
        })
        .copied()
        .collect();
    delegators.sort();
    delegators
}
