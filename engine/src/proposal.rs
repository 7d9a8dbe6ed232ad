//! Proposals on the ballot.

use ballot_types::{ProposalName, Weight};
use serde::{Deserialize, Serialize};

/// A candidate option and its running tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Label fixed at construction.
    pub name: ProposalName,
    /// Accumulated weight of all ballots resolved to this proposal.
    pub vote_count: Weight,
}

impl Proposal {
    pub fn new(name: ProposalName) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}
