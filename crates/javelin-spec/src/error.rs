// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error taxonomy for spec construction and finalization.
//!
//! Everything here is a programmer or configuration error: surfaced at the
//! offending call, never retried, never rolled back. The only check
//! deferred to `build()` is spec completeness.

use javelin_flags::FlagError;
use thiserror::Error;

/// Errors from configuring or building a launch spec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A setter received malformed or absent input.
    #[error("invalid argument: {what}")]
    InvalidArgument {
        /// What was wrong with the input.
        what: String,
    },

    /// A single-assignment field was set a second time.
    #[error("{field} has already been set")]
    AlreadySet {
        /// The field that was already assigned.
        field: &'static str,
    },

    /// A call touched the half of the jar/classpath group that the spec
    /// has already committed against.
    #[error("cannot configure {attempted}: {committed} has already been configured")]
    ConflictingState {
        /// What the rejected call tried to configure.
        attempted: &'static str,
        /// The committed configuration it conflicts with.
        committed: &'static str,
    },

    /// `build()` was called on a spec with no runnable program.
    #[error("incomplete launch spec: missing {missing}")]
    IncompleteSpec {
        /// What the spec still needs before it can build.
        missing: &'static str,
    },
}

impl From<FlagError> for SpecError {
    fn from(err: FlagError) -> Self {
        Self::InvalidArgument {
            what: err.to_string(),
        }
    }
}
