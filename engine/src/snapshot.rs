//! Serializable engine state.
//!
//! The engine never stores anything itself; an execution environment that
//! wants durability takes [`BallotEngine::save_state`] bytes and hands them
//! back to [`BallotEngine::load_state`]. Voters live in an ordered map, so
//! equal states always encode to identical bytes.

use crate::engine::BallotEngine;
use crate::error::BallotError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_types::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable copy of the full ballot state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub chairperson: Principal,
    pub proposals: Vec<Proposal>,
    pub voters: BTreeMap<Principal, Voter>,
}

impl BallotEngine {
    pub fn snapshot(&self) -> BallotSnapshot {
        BallotSnapshot {
            chairperson: self.chairperson.clone(),
            proposals: self.proposals.clone(),
            voters: self.voters.clone(),
        }
    }

    /// Encode the full state with bincode.
    pub fn save_state(&self) -> Result<Vec<u8>, BallotError> {
        bincode::serialize(&self.snapshot()).map_err(|e| BallotError::Snapshot(e.to_string()))
    }

    /// Restore an engine from [`save_state`](Self::save_state) bytes.
    ///
    /// The decoded state must pass [`check_invariants`](Self::check_invariants);
    /// anything the operations could not have produced is refused.
    pub fn load_state(data: &[u8]) -> Result<Self, BallotError> {
        let snapshot: BallotSnapshot =
            bincode::deserialize(data).map_err(|e| BallotError::Snapshot(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_snapshot(snapshot: BallotSnapshot) -> Result<Self, BallotError> {
        if snapshot.proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }
        let engine = Self {
            chairperson: snapshot.chairperson,
            proposals: snapshot.proposals,
            voters: snapshot.voters,
        };
        engine
            .check_invariants()
            .map_err(|e| BallotError::Snapshot(e.to_string()))?;
        tracing::info!(
            voters = engine.voters.len(),
            proposals = engine.proposals.len(),
            "ballot state restored"
        );
        Ok(engine)
    }
}
