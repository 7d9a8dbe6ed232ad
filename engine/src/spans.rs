//! Pre-built [`tracing::Span`] constructors for ballot operations.
//!
//! Every mutating operation runs inside one of these spans so that the
//! accept/reject events it emits carry the caller and operands.

use ballot_types::{Principal, ProposalIndex};
use tracing::{info_span, Span};

/// Span covering a `grant_right` call.
pub fn grant_span(caller: &Principal, target: &Principal) -> Span {
    info_span!("grant_right", caller = %caller, grantee = %target)
}

/// Span covering a `delegate` call.
pub fn delegate_span(caller: &Principal, to: &Principal) -> Span {
    info_span!("delegate", caller = %caller, to = %to)
}

/// Span covering a `vote` call.
pub fn vote_span(caller: &Principal, proposal: ProposalIndex) -> Span {
    info_span!("vote", caller = %caller, proposal = proposal)
}
