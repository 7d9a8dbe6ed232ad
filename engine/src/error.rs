use ballot_types::{LabelError, Principal, ProposalIndex};
use thiserror::Error;

/// Every way a ballot operation can be refused.
///
/// The first eight variants are the contract outcomes of the five ballot
/// operations; each is detected before any state is touched. The remaining
/// variants only arise while building or restoring an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BallotError {
    #[error("{caller} is not the chairperson")]
    Unauthorized { caller: Principal },

    #[error("{0} has already voted")]
    AlreadyVoted(Principal),

    #[error("{0} already has the right to vote")]
    AlreadyHasRights(Principal),

    #[error("{0} has no right to vote")]
    NoRightToVote(Principal),

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("delegation from {from} to {to} would form a cycle")]
    DelegationCycle { from: Principal, to: Principal },

    #[error("delegate {0} has no right to vote")]
    DelegateHasNoRight(Principal),

    #[error("proposal {index} does not exist ({count} proposals)")]
    InvalidProposal { index: ProposalIndex, count: usize },

    #[error("a ballot needs at least one proposal")]
    NoProposals,

    #[error("invalid proposal label: {0}")]
    Label(#[from] LabelError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// A broken state invariant, reported by [`crate::BallotEngine::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{0} carries weight or a ballot without holding rights")]
    StateWithoutRights(Principal),

    #[error("chairperson {0} has lost the right to vote")]
    ChairpersonWithoutRights(Principal),

    #[error("{0} has a recorded vote or delegate but is not marked as voted")]
    OutcomeWithoutBallot(Principal),

    #[error("{0} is marked as voted with no vote and no delegate")]
    BallotWithoutOutcome(Principal),

    #[error("{0} both voted directly and delegated")]
    VotedAndDelegated(Principal),

    #[error("{voter} voted for proposal {index}, out of range")]
    VoteOutOfRange { voter: Principal, index: ProposalIndex },

    #[error("{voter} delegated to {delegate}, who has no right to vote")]
    DelegateWithoutRights { voter: Principal, delegate: Principal },

    #[error("delegation chain starting at {0} does not terminate")]
    CyclicDelegation(Principal),

    #[error("weight not conserved: {counted} counted + {pending} pending != {holders} rights holders")]
    WeightNotConserved { counted: u64, pending: u64, holders: u64 },
}
