//! External collaborators consumed by the engine.
//!
//! The vote token, the executor of approved calls and the clock live outside
//! the governance core. They are injected into [`crate::Madao`] so every
//! outcome can be reproduced with deterministic fakes.

use std::time::{SystemTime, UNIX_EPOCH};

use madao_types::{Address, Amount, Timestamp};
use thiserror::Error;

/// Failure reported by the token collaborator itself (as opposed to a
/// transfer that completed and returned `false`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("token call reverted: {0}")]
pub struct TokenError(pub String);

/// Fungible vote token holding the deposited weight.
pub trait VoteToken {
    /// Move `amount` from `owner` into `spender`'s custody using a prior
    /// allowance.
    fn transfer_from(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<bool, TokenError>;

    /// Move `amount` held by `from` to `to`.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<bool, TokenError>;
}

/// Result of an arbitrary call made on behalf of an approved proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOutcome {
    pub success: bool,
    pub return_data: Vec<u8>,
}

impl CallOutcome {
    pub fn success(return_data: Vec<u8>) -> Self {
        Self {
            success: true,
            return_data,
        }
    }

    pub fn reverted(return_data: Vec<u8>) -> Self {
        Self {
            success: false,
            return_data,
        }
    }
}

/// Executes the call encoded in a proposal.
pub trait Executor {
    fn call(&mut self, target: Address, payload: &[u8]) -> CallOutcome;
}

/// Source of time for deadline checks.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in whole seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_epoch() {
        // 2020-09-13
        assert!(SystemClock.now() > 1_600_000_000);
    }

    #[test]
    fn test_call_outcome_constructors() {
        assert!(CallOutcome::success(vec![]).success);
        let reverted = CallOutcome::reverted(vec![1, 2]);
        assert!(!reverted.success);
        assert_eq!(reverted.return_data, vec![1, 2]);
    }
}
