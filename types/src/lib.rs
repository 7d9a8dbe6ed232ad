//! Fundamental types for the ballot engine.
//!
//! This crate defines the identifiers shared by the engine and anything that
//! drives it: principals, proposal labels, and the index/weight aliases.

pub mod error;
pub mod label;
pub mod principal;

pub use error::LabelError;
pub use label::ProposalName;
pub use principal::Principal;

/// Position of a proposal in the slate fixed at construction.
pub type ProposalIndex = usize;

/// Number of votes a ballot represents.
pub type Weight = u64;
