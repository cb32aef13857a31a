// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host process introspection for the javelin launcher.
//!
//! A launch spec can inherit pieces of its configuration — classpath,
//! properties, environment, runtime arguments — from the process doing the
//! launching. This crate defines the [`HostProbe`] seam, the immutable
//! [`HostSnapshot`] captured through it, and the [`SystemHost`] probe that
//! reads the real process state. Snapshots are taken once, at spec
//! construction; nothing here hands out live references to host state.
#![deny(unsafe_code)]

mod snapshot;
mod system;
mod which;

pub use snapshot::HostSnapshot;
pub use system::SystemHost;
pub use which::find_executable;

use std::collections::BTreeMap;
use std::path::PathBuf;

use javelin_flags::VmMode;

/// Platform separator for classpath-style path lists.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Platform file name of the java executable.
pub const JAVA_EXECUTABLE: &str = if cfg!(windows) { "java.exe" } else { "java" };

/// Introspection over the currently-running host process.
///
/// Implementations answer each question from their own source of truth;
/// [`HostProbe::snapshot`] captures all answers at once. Callers must hold
/// on to the snapshot, not the probe, so that later host-state changes
/// cannot affect an already-configured spec.
pub trait HostProbe {
    /// VM mode the host currently runs under, when discoverable.
    fn current_mode(&self) -> Option<VmMode>;

    /// Architecture requirement flag currently in effect, verbatim.
    fn current_architecture_flag(&self) -> Option<String>;

    /// Runtime arguments the host was started with.
    fn current_runtime_arguments(&self) -> Vec<String>;

    /// System properties currently set on the host.
    fn current_properties(&self) -> BTreeMap<String, String>;

    /// The host's environment variables.
    fn current_environment(&self) -> BTreeMap<String, String>;

    /// The host's classpath entries, in order.
    fn current_class_path(&self) -> Vec<String>;

    /// The java executable the host would launch with, when resolvable.
    fn java_executable(&self) -> Option<PathBuf>;

    /// Capture every answer into one immutable snapshot.
    fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            mode: self.current_mode(),
            architecture_flag: self.current_architecture_flag(),
            runtime_arguments: self.current_runtime_arguments(),
            properties: self.current_properties(),
            environment: self.current_environment(),
            class_path: self.current_class_path(),
            java_executable: self.java_executable(),
        }
    }
}
