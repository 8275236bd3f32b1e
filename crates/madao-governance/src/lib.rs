//! MADAO Governance - deposit-weighted voting engine.
//!
//! This crate provides:
//! - Deposit ledger with participation-based withdrawal freezing
//! - Proposal registry with a fixed voting window
//! - One-shot, per-proposal delegation
//! - Finalization with atomic execution of approved calls

pub mod ballot;
pub mod collaborators;
pub mod config;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod finalizer;
pub mod ledger;
pub mod locks;
pub mod proposal;
pub mod state;
pub mod voting;

pub use ballot::{Ballot, BallotBook};
pub use collaborators::{CallOutcome, Clock, Executor, SystemClock, TokenError, VoteToken};
pub use config::{ConfigError, GovernanceConfig};
pub use engine::Madao;
pub use error::GovernanceError;
pub use finalizer::Decision;
pub use proposal::{Proposal, ProposalStatus};
pub use state::GovernanceState;
