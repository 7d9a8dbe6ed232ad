//! Ballot configuration with TOML file support.

use ballot_types::{Principal, ProposalName};
use ballot_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::BallotEngine;
use crate::error::BallotError;

/// Election manifest handed to the engine by its execution environment.
///
/// Can be loaded from a TOML file via [`BallotConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    /// Principal allowed to grant voting rights.
    pub chairperson: Principal,

    /// Proposal labels in ballot order, at most 32 bytes each.
    pub proposals: Vec<String>,

    /// Principals granted the right to vote as soon as the ballot opens.
    #[serde(default)]
    pub voters: Vec<Principal>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl BallotConfig {
    pub fn new(chairperson: Principal, proposals: Vec<String>) -> Self {
        Self {
            chairperson,
            proposals,
            voters: Vec::new(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BallotError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BallotError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BallotError> {
        toml::from_str(s).map_err(|e| BallotError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, BallotError> {
        toml::to_string_pretty(self).map_err(|e| BallotError::Config(e.to_string()))
    }

    /// Convert the configured labels to proposal names.
    pub fn proposal_names(&self) -> Result<Vec<ProposalName>, BallotError> {
        self.proposals
            .iter()
            .map(|label| ProposalName::from_label(label).map_err(BallotError::from))
            .collect()
    }
}

impl BallotEngine {
    /// Open the configured ballot and enfranchise the configured voters.
    ///
    /// Voters are granted rights through [`grant_right`](Self::grant_right)
    /// as the chairperson, so a duplicate entry (or the chairperson listed as
    /// a voter) fails with [`BallotError::AlreadyHasRights`].
    pub fn from_config(config: &BallotConfig) -> Result<Self, BallotError> {
        let mut engine = Self::new(config.proposal_names()?, config.chairperson.clone())?;
        for voter in &config.voters {
            engine.grant_right(&config.chairperson, voter)?;
        }
        Ok(engine)
    }
}
