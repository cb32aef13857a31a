// SPDX-License-Identifier: MIT OR Apache-2.0
//! The frozen, fully-resolved result of building a launch spec.

use std::path::PathBuf;

use javelin_flags::{AssertionFlag, AssertionStatus, SizeArg, VerboseComponent, VmArch, VmMode};
use javelin_host::HostSnapshot;
use serde::{Deserialize, Serialize};

use crate::builder::{LaunchSpec, StartMode};
use crate::state::{ListState, MapState};

/// How the launched program is selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramSelector {
    /// Launch from a packaged jar.
    Jar(PathBuf),
    /// Launch a main class from a classpath; an unset classpath falls back
    /// to the snapshot classpath at assembly time.
    Class {
        /// Qualified name of the class whose `main` runs.
        main_class: String,
        /// Classpath state, when one was configured.
        class_path: Option<ListState>,
    },
}

/// Immutable launch descriptor, safe to share and read concurrently.
///
/// Produced by [`LaunchSpec::build`](crate::LaunchSpec::build); consumed by
/// the assembler. Carries the host snapshot its spec was configured
/// against, so assembly never touches live host state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub(crate) snapshot: HostSnapshot,
    pub(crate) runtime_home: Option<PathBuf>,
    pub(crate) mode: Option<VmMode>,
    pub(crate) architecture: Option<VmArch>,
    pub(crate) version: Option<String>,
    pub(crate) selector: ProgramSelector,
    pub(crate) assertions: Option<AssertionFlag>,
    pub(crate) system_assertions: Option<AssertionStatus>,
    pub(crate) verbose: Option<Vec<VerboseComponent>>,
    pub(crate) jvm_arguments: Option<ListState>,
    pub(crate) program_arguments: Option<ListState>,
    pub(crate) properties: Option<MapState>,
    pub(crate) environment: Option<MapState>,
    pub(crate) max_heap: Option<SizeArg>,
    pub(crate) initial_heap: Option<SizeArg>,
    pub(crate) stack_size: Option<SizeArg>,
    pub(crate) working_directory: Option<PathBuf>,
}

impl LaunchDescriptor {
    /// The program selector.
    #[must_use]
    pub fn selector(&self) -> &ProgramSelector {
        &self.selector
    }

    /// The maximum heap size, when set.
    #[must_use]
    pub fn max_heap(&self) -> Option<SizeArg> {
        self.max_heap
    }

    /// The working directory, when set.
    #[must_use]
    pub fn working_directory(&self) -> Option<&PathBuf> {
        self.working_directory.as_ref()
    }

    /// The environment state, when set by any path.
    #[must_use]
    pub fn environment(&self) -> Option<&MapState> {
        self.environment.as_ref()
    }

    /// Derive a new spec with every field except the program selector and
    /// program arguments.
    ///
    /// The derived spec keeps the original snapshot and tuning, and fails
    /// `build()` with an incomplete-spec error until a new selector is
    /// committed.
    #[must_use]
    pub fn clear_program(&self) -> LaunchSpec {
        let mut spec = LaunchSpec::with_snapshot(self.snapshot.clone());
        spec.runtime_home = self.runtime_home.clone();
        spec.mode = self.mode;
        spec.architecture = self.architecture;
        spec.version = self.version.clone();
        spec.start = StartMode::Unset;
        spec.assertions = self.assertions.clone();
        spec.system_assertions = self.system_assertions;
        spec.verbose = self.verbose.clone();
        spec.jvm_arguments = self.jvm_arguments.clone();
        spec.properties = self.properties.clone();
        spec.environment = self.environment.clone();
        spec.max_heap = self.max_heap;
        spec.initial_heap = self.initial_heap;
        spec.stack_size = self.stack_size;
        spec.working_directory = self.working_directory.clone();
        spec
    }
}
