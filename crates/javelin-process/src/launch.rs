// SPDX-License-Identifier: MIT OR Apache-2.0
//! Low-level child process management for launch invocations.

use std::process::{ExitStatus, Stdio};

use javelin_spec::Invocation;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::LaunchError;

/// A spawned child process with captured stdin/stdout.
///
/// Stderr is forwarded line-by-line through `tracing` at warn level under
/// the `javelin_process.stderr` target.
pub struct LaunchedProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Option<ChildStdout>,
}

impl LaunchedProcess {
    /// Spawn a new child from the given invocation.
    ///
    /// When the invocation carries an environment block, the child's
    /// environment is cleared and replaced with exactly that block; when
    /// it carries none, the child inherits this process's environment
    /// untouched.
    pub fn spawn(invocation: &Invocation) -> Result<Self, LaunchError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(env) = &invocation.env {
            cmd.env_clear();
            cmd.envs(env);
        }
        if let Some(dir) = &invocation.working_directory {
            cmd.current_dir(dir);
        }

        debug!(program = %invocation.program.display(), "spawning child process");
        let mut child = cmd.spawn().map_err(LaunchError::Spawn)?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();

        // Forward stderr via tracing
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut reader = BufReader::new(stderr);
                let mut line = String::new();
                loop {
                    line.clear();
                    match reader.read_line(&mut line).await {
                        Ok(0) | Err(_) => break,
                        Ok(_) => {
                            let s = line.trim_end();
                            if !s.is_empty() {
                                warn!(target: "javelin_process.stderr", "{s}");
                            }
                        }
                    }
                }
            });
        }

        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }

    /// OS process identifier, while the child is running.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Take the child's stdin handle.
    #[must_use]
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.stdin.take()
    }

    /// Take the child's stdout handle.
    #[must_use]
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    /// Write bytes to the child's stdin and flush.
    pub async fn write_stdin(&mut self, data: &[u8]) -> Result<(), LaunchError> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            LaunchError::Stdin(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "stdin handle already taken",
            ))
        })?;
        stdin.write_all(data).await.map_err(LaunchError::Stdin)?;
        stdin.flush().await.map_err(LaunchError::Stdin)
    }

    /// Close the child's stdin so a child reading it sees end of input.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Read the child's stdout to end of stream.
    pub async fn read_stdout_to_string(&mut self) -> Result<String, LaunchError> {
        let stdout = self.stdout.as_mut().ok_or_else(|| {
            LaunchError::Stdout(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "stdout handle already taken",
            ))
        })?;
        let mut output = String::new();
        stdout
            .read_to_string(&mut output)
            .await
            .map_err(LaunchError::Stdout)?;
        Ok(output)
    }

    /// Wait for the child to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus, LaunchError> {
        // Drop our stdin handle first so a child reading stdin can finish.
        self.stdin.take();
        self.child.wait().await.map_err(LaunchError::Wait)
    }

    /// Kill the child and wait for it to exit.
    pub async fn kill(&mut self) {
        let _ = self.child.kill().await;
        let _ = self.child.wait().await;
    }

    /// Consume self and return the inner child for manual management.
    #[must_use]
    pub fn into_inner(self) -> Child {
        self.child
    }
}
