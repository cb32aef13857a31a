// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for process spawning and waiting.

use thiserror::Error;

/// Errors from spawning or supervising a launched process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The OS failed to spawn the process.
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// Failed to write to the child's stdin.
    #[error("failed to write child stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Failed to read from the child's stdout.
    #[error("failed to read child stdout: {0}")]
    Stdout(#[source] std::io::Error),

    /// Waiting for the child to exit failed.
    #[error("failed to wait for child exit: {0}")]
    Wait(#[source] std::io::Error),
}
