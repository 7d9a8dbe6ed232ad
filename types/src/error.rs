//! Errors raised while building the shared types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("proposal label is {len} bytes, at most {max} allowed")]
    TooLong { len: usize, max: usize },
}
