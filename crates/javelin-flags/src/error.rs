// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation errors for flag construction.

use thiserror::Error;

/// Errors from constructing or parsing flag values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlagError {
    /// A sized argument magnitude must be strictly positive.
    #[error("size magnitude must be greater than zero")]
    InvalidMagnitude,

    /// An assertion scope name may not be empty.
    #[error("assertion scope name may not be empty")]
    EmptyScope,

    /// A size literal could not be parsed as `<magnitude><b|k|m|g>`.
    #[error("unrecognized size literal {literal:?}")]
    UnrecognizedSize {
        /// The literal that failed to parse.
        literal: String,
    },
}
