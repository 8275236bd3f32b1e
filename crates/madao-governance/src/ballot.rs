//! Per-proposal vote records.

use std::collections::HashMap;

use madao_types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// How a member used their ballot on one proposal. Written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ballot {
    /// Voted directly with own deposit plus any delegated credit.
    Voted { in_favor: bool, weight: Amount },
    /// Handed the ballot to another member.
    Delegated { to: Address, weight: Amount },
}

impl Ballot {
    pub fn weight(&self) -> Amount {
        match self {
            Ballot::Voted { weight, .. } | Ballot::Delegated { weight, .. } => *weight,
        }
    }
}

/// Ballots cast on a single proposal, plus the delegated weight members
/// have received but not yet used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotBook {
    ballots: HashMap<Address, Ballot>,
    credits: HashMap<Address, Amount>,
}

impl BallotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `member` has voted or delegated on this proposal.
    pub fn has_ballot(&self, member: &Address) -> bool {
        self.ballots.contains_key(member)
    }

    pub fn ballot(&self, member: &Address) -> Option<&Ballot> {
        self.ballots.get(member)
    }

    /// Delegated weight `member` can still add to their vote.
    pub fn credit_of(&self, member: &Address) -> Amount {
        self.credits.get(member).copied().unwrap_or(0)
    }

    /// Members holding a lock because of this proposal.
    pub fn participants(&self) -> impl Iterator<Item = &Address> {
        self.ballots.keys()
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    /// Add delegated weight receivable by `member`.
    pub(crate) fn add_credit(&mut self, member: Address, weight: Amount) {
        let credit = self.credits.entry(member).or_insert(0);
        *credit = credit.saturating_add(weight);
    }

    /// Remove and return the credit held by `member`.
    pub(crate) fn take_credit(&mut self, member: &Address) -> Amount {
        self.credits.remove(member).unwrap_or(0)
    }

    /// Caller guarantees `member` has no ballot yet.
    pub(crate) fn record(&mut self, member: Address, ballot: Ballot) {
        debug_assert!(!self.ballots.contains_key(&member));
        self.ballots.insert(member, ballot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(n: u8) -> Address {
        let mut addr = [0u8; 20];
        addr[19] = n;
        Address::from_bytes(addr)
    }

    #[test]
    fn test_credit_accumulates_and_is_taken_once() {
        let mut book = BallotBook::new();
        let bob = test_address(2);

        book.add_credit(bob, 300);
        book.add_credit(bob, 200);
        assert_eq!(book.credit_of(&bob), 500);

        assert_eq!(book.take_credit(&bob), 500);
        assert_eq!(book.take_credit(&bob), 0);
    }

    #[test]
    fn test_participants_are_ballot_holders() {
        let mut book = BallotBook::new();
        let alice = test_address(1);
        let bob = test_address(2);

        book.record(alice, Ballot::Delegated { to: bob, weight: 100 });
        book.add_credit(bob, 100);

        assert!(book.has_ballot(&alice));
        assert!(!book.has_ballot(&bob));
        assert_eq!(book.participants().collect::<Vec<_>>(), vec![&alice]);
        assert_eq!(book.ballot(&alice).map(Ballot::weight), Some(100));
    }
}
