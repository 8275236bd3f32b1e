//! Deployment configuration.
//!
//! Fixed for the lifetime of an engine: who may raise proposals, which
//! account escrows deposits, the minimum quorum and the voting window.

use std::path::Path;

use madao_types::{Address, Amount};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default minimum quorum, in vote-token weight.
pub const DEFAULT_MINIMUM_QUORUM: Amount = 1_000;

/// Default voting window: 3 days in seconds.
pub const DEFAULT_VOTING_DURATION: u64 = 3 * 24 * 60 * 60;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Governance engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Only account allowed to add proposals
    pub chairperson: Address,
    /// Account holding deposited vote tokens
    pub escrow: Address,
    /// Vote token contract
    pub vote_token: Address,
    /// Minimum total weight cast for a decision
    #[serde(
        default = "default_minimum_quorum",
        serialize_with = "serialize_quorum",
        deserialize_with = "deserialize_quorum"
    )]
    pub minimum_quorum: Amount,
    /// Voting window in seconds, counted from proposal creation
    #[serde(default = "default_voting_duration")]
    pub voting_duration: u64,
}

fn default_minimum_quorum() -> Amount {
    DEFAULT_MINIMUM_QUORUM
}

// TOML integers are signed 64-bit.
fn deserialize_quorum<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
    u64::deserialize(deserializer).map(Amount::from)
}

fn serialize_quorum<S: Serializer>(quorum: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
    let quorum = i64::try_from(*quorum).map_err(|_| {
        serde::ser::Error::custom(format!("minimum_quorum {} exceeds the TOML integer range", quorum))
    })?;
    serializer.serialize_i64(quorum)
}

fn default_voting_duration() -> u64 {
    DEFAULT_VOTING_DURATION
}

impl GovernanceConfig {
    /// Create a configuration with the default quorum and voting window.
    pub fn new(chairperson: Address, escrow: Address, vote_token: Address) -> Self {
        Self {
            chairperson,
            escrow,
            vote_token,
            minimum_quorum: DEFAULT_MINIMUM_QUORUM,
            voting_duration: DEFAULT_VOTING_DURATION,
        }
    }

    pub fn with_minimum_quorum(mut self, minimum_quorum: Amount) -> Self {
        self.minimum_quorum = minimum_quorum;
        self
    }

    pub fn with_voting_duration(mut self, seconds: u64) -> Self {
        self.voting_duration = seconds;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GovernanceConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Render configuration as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a TOML file.
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chairperson.is_zero() {
            return Err(ConfigError::Invalid("chairperson cannot be the zero address".to_string()));
        }

        if self.escrow.is_zero() {
            return Err(ConfigError::Invalid("escrow cannot be the zero address".to_string()));
        }

        if self.voting_duration == 0 {
            return Err(ConfigError::Invalid("voting duration cannot be 0".to_string()));
        }

        Ok(())
    }
}
