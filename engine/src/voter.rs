//! Per-principal ballot state.

use ballot_types::{Principal, ProposalIndex, Weight};
use serde::{Deserialize, Serialize};

/// Ballot state of a single principal.
///
/// A principal that was never granted rights reads as `Voter::default()`:
/// no rights, zero weight, no ballot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Terminal delegate this voter's weight was handed to.
    pub delegate: Option<Principal>,
    /// Proposal this voter chose directly.
    pub vote: Option<ProposalIndex>,
    /// Own weight plus anything delegated here before this voter voted.
    pub weight: Weight,
    /// Whether the ballot has been resolved, by vote or by delegation.
    pub voted: bool,
    pub has_right_to_vote: bool,
}

impl Voter {
    /// A freshly enfranchised voter with a single vote.
    pub fn enfranchised() -> Self {
        Self {
            weight: 1,
            has_right_to_vote: true,
            ..Self::default()
        }
    }

    pub fn status(&self) -> VoterStatus {
        match (self.has_right_to_vote, self.voted) {
            (false, _) => VoterStatus::NoRights,
            (true, false) => VoterStatus::Eligible,
            (true, true) => VoterStatus::Voted,
        }
    }
}

/// Lifecycle of a principal. Transitions only move forward:
/// `NoRights → Eligible → Voted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoterStatus {
    /// Never granted the right to vote.
    NoRights,
    /// Holds rights, ballot not yet cast or delegated.
    Eligible,
    /// Ballot resolved, either directly or by delegation.
    Voted,
}
