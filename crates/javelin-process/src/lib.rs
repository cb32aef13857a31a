// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process spawning for assembled launch invocations.
//!
//! This is the collaborator boundary: it receives a finished
//! [`Invocation`] and turns it into a running child with piped stdio. It
//! interprets nothing — spawn failures and child exit codes are surfaced
//! to the caller as-is. Timeouts and cancellation are the caller's
//! concern.
#![deny(unsafe_code)]

mod error;
mod launch;

pub use error::LaunchError;
pub use launch::LaunchedProcess;

use javelin_spec::{Invocation, LaunchDescriptor};

/// Spawn an invocation.
///
/// Convenience for [`LaunchedProcess::spawn`].
pub fn spawn(invocation: &Invocation) -> Result<LaunchedProcess, LaunchError> {
    LaunchedProcess::spawn(invocation)
}

/// Assemble a built descriptor, appending invocation-time arguments last,
/// and spawn the result.
pub fn launch(
    descriptor: &LaunchDescriptor,
    extra_args: &[String],
) -> Result<LaunchedProcess, LaunchError> {
    LaunchedProcess::spawn(&descriptor.invocation(extra_args))
}
