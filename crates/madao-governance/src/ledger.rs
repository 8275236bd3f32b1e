//! Deposit ledger.
//!
//! Tracks the vote-token weight each member keeps in escrow. Balances move
//! only after the token collaborator confirms the matching transfer.

use std::collections::HashMap;

use madao_types::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::collaborators::VoteToken;
use crate::error::GovernanceError;
use crate::locks::LockTracker;

/// Escrowed vote-token balance per member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositLedger {
    balances: HashMap<Address, Amount>,
}

impl DepositLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, member: &Address) -> Amount {
        self.balances.get(member).copied().unwrap_or(0)
    }

    /// Sum of all escrowed balances.
    pub fn total_deposited(&self) -> Amount {
        self.balances
            .values()
            .fold(0, |total, balance| total.saturating_add(*balance))
    }

    /// Pull `amount` from `member` into `escrow` and credit it.
    ///
    /// Returns the member's new balance.
    ///
    /// # Errors
    /// - `InvalidAmount` for a zero amount
    /// - `BalanceOverflow` if the balance would exceed `Amount::MAX`
    /// - `TransferFailed` if the token call fails or returns `false`
    pub fn deposit<T: VoteToken + ?Sized>(
        &mut self,
        token: &mut T,
        escrow: Address,
        member: Address,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        if amount == 0 {
            return Err(GovernanceError::InvalidAmount(
                "Cannot deposit zero tokens".to_string(),
            ));
        }

        let new_balance = self
            .balance_of(&member)
            .checked_add(amount)
            .ok_or(GovernanceError::BalanceOverflow)?;

        match token.transfer_from(member, escrow, amount) {
            Ok(true) => {}
            Ok(false) => {
                return Err(GovernanceError::TransferFailed(
                    "transferFrom returned false".to_string(),
                ))
            }
            Err(e) => return Err(GovernanceError::TransferFailed(e.to_string())),
        }

        self.balances.insert(member, new_balance);
        Ok(new_balance)
    }

    /// Return the whole balance of `member` from `escrow`.
    ///
    /// Returns the amount paid out.
    ///
    /// # Errors
    /// - `NothingToWithdraw` if the member has no balance
    /// - `TokensFrozen` if the member participates in an open proposal
    /// - `TransferFailed` if the token call fails or returns `false`; the
    ///   balance is kept in that case
    pub fn withdraw<T: VoteToken + ?Sized>(
        &mut self,
        token: &mut T,
        escrow: Address,
        member: Address,
        locks: &LockTracker,
    ) -> Result<Amount, GovernanceError> {
        let balance = self.balance_of(&member);
        if balance == 0 {
            return Err(GovernanceError::NothingToWithdraw);
        }

        if locks.is_frozen(&member) {
            return Err(GovernanceError::TokensFrozen);
        }

        match token.transfer(escrow, member, balance) {
            Ok(true) => {}
            Ok(false) => {
                return Err(GovernanceError::TransferFailed(
                    "transfer returned false".to_string(),
                ))
            }
            Err(e) => return Err(GovernanceError::TransferFailed(e.to_string())),
        }

        self.balances.remove(&member);
        Ok(balance)
    }
}
