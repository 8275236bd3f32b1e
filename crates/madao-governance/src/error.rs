use madao_types::ProposalId;
use thiserror::Error;

/// Errors that can occur in governance operations.
///
/// Every error aborts the entry point that produced it; no state written by
/// that call survives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("no deposit")]
    NoDeposit,

    #[error("voted already")]
    VotedAlready,

    #[error("delegate voted already")]
    DelegateVotedAlready,

    #[error("no such voting: {0}")]
    NoSuchVoting(ProposalId),

    #[error("voting period ended")]
    VotingPeriodEnded,

    #[error("voting is in process")]
    VotingInProcess,

    #[error("handled already")]
    HandledAlready,

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("tokens are frozen")]
    TokensFrozen,

    #[error("recipient call error: 0x{0}")]
    RecipientCallError(String),

    #[error("transfer failed: {0}")]
    TransferFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Self-delegation not allowed")]
    SelfDelegation,

    #[error("Deposit balance overflow")]
    BalanceOverflow,
}

impl GovernanceError {
    /// Stable tag naming the failure, for hosts that surface errors by name.
    pub fn tag(&self) -> &'static str {
        match self {
            GovernanceError::NoDeposit => "NoDeposit",
            GovernanceError::VotedAlready => "VotedAlready",
            GovernanceError::DelegateVotedAlready => "DelegateVotedAlready",
            GovernanceError::NoSuchVoting(_) => "NoSuchVoting",
            GovernanceError::VotingPeriodEnded => "VotingPeriodEnded",
            GovernanceError::VotingInProcess => "VotingInProcess",
            GovernanceError::HandledAlready => "HandledAlready",
            GovernanceError::NothingToWithdraw => "NothingToWithdraw",
            GovernanceError::TokensFrozen => "TokensFrozen",
            GovernanceError::RecipientCallError(_) => "RecipientCallError",
            GovernanceError::TransferFailed(_) => "TransferFailed",
            GovernanceError::Unauthorized(_) => "Unauthorized",
            GovernanceError::InvalidAmount(_) => "InvalidAmount",
            GovernanceError::SelfDelegation => "SelfDelegation",
            GovernanceError::BalanceOverflow => "BalanceOverflow",
        }
    }
}
