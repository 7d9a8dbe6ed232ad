//! Single-election ballot engine.
//!
//! A chairperson opens a ballot over a fixed slate of proposals and grants
//! voting rights. Each rights holder either votes directly or hands their
//! weight along a delegation chain to another rights holder. Chains are
//! resolved when the delegation is made, so the tally is always current and
//! the winner is a single scan over the proposals.
//!
//! Invariants held after every operation:
//! - principals without rights carry no weight;
//! - a ballot is counted once, on exactly one proposal;
//! - delegation edges never form a cycle;
//! - delegation moves weight, never creates or destroys it;
//! - rights are never revoked.

pub mod config;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod invariants;
pub mod proposal;
pub mod snapshot;
pub mod spans;
pub mod voter;

pub use config::BallotConfig;
pub use delegation::ChainError;
pub use engine::BallotEngine;
pub use error::{BallotError, InvariantViolation};
pub use proposal::Proposal;
pub use snapshot::BallotSnapshot;
pub use voter::{Voter, VoterStatus};
