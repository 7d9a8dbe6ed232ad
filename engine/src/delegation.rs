//! Delegation chain resolution.
//!
//! Delegation is stored as an edge set: each voter's `delegate` field names
//! the principal its weight was handed to. Resolving a chain follows those
//! edges until it reaches a principal that has not delegated. Traversal is
//! bounded by the number of voters, so a corrupted edge set can never loop
//! forever.

use crate::voter::Voter;
use ballot_types::Principal;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("delegation chain leads back to {0}")]
    ReachesCaller(Principal),

    #[error("delegation chain revisits {0}")]
    Cycle(Principal),

    #[error("delegation chain exceeds {0} hops")]
    TooLong(usize),
}

/// Follow delegate edges from `start` to the terminal delegate.
///
/// When `caller` is given, reaching it anywhere on the chain is an error:
/// handing the caller's weight along that chain would close a cycle.
pub fn resolve_terminal<'a>(
    voters: &'a BTreeMap<Principal, Voter>,
    start: &'a Principal,
    caller: Option<&Principal>,
) -> Result<&'a Principal, ChainError> {
    let max_hops = voters.len();
    let mut current = start;
    let mut visited = BTreeSet::new();
    for hop in 0..=max_hops {
        if caller == Some(current) {
            return Err(ChainError::ReachesCaller(current.clone()));
        }
        if !visited.insert(current) {
            return Err(ChainError::Cycle(current.clone()));
        }
        match voters.get(current).and_then(|v| v.delegate.as_ref()) {
            Some(next) => {
                tracing::trace!(from = %current, to = %next, hop, "following delegate");
                current = next;
            }
            None => return Ok(current),
        }
    }
    Err(ChainError::TooLong(max_hops))
}

/// Number of edges between `start` and its terminal delegate.
pub fn chain_length(
    voters: &BTreeMap<Principal, Voter>,
    start: &Principal,
) -> Result<usize, ChainError> {
    let max_hops = voters.len();
    let mut current = start;
    let mut visited = BTreeSet::new();
    for hops in 0..=max_hops {
        if !visited.insert(current) {
            return Err(ChainError::Cycle(current.clone()));
        }
        match voters.get(current).and_then(|v| v.delegate.as_ref()) {
            Some(next) => current = next,
            None => return Ok(hops),
        }
    }
    Err(ChainError::TooLong(max_hops))
}
