//! MADAO Types - primitive types shared by the governance engine.
//!
//! - `Address`: 20-byte account identifier (Bech32m or hex text form)
//! - `Amount`: vote-token weight
//! - `Timestamp`: seconds since the UNIX epoch
//! - `ProposalId`: sequential, 1-based proposal identifier

pub mod address;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use error::TypesError;

/// Vote-token weight. Deposits, tallies and quorum are all expressed in it.
pub type Amount = u128;

/// Seconds since the UNIX epoch.
pub type Timestamp = u64;

/// Sequential proposal identifier. `0` never refers to a proposal.
pub type ProposalId = u64;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, Amount, ProposalId, Timestamp, TypesError};
}
