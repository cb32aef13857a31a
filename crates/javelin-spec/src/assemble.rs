// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure assembly of a launch descriptor into an argv/env/workdir triple.
//!
//! Flag order is a compatibility contract with the target runtime's CLI
//! and is reproduced exactly: executable, mode, architecture, version,
//! assertions, verbosity, jvm arguments, sizes, properties, program
//! selector, program arguments, invocation-time extras.

use std::collections::BTreeMap;
use std::path::PathBuf;

use javelin_flags::{AssertionFlag, AssertionKind, FlagFamily, SizeKind, classify};
use javelin_host::{JAVA_EXECUTABLE, PATH_LIST_SEPARATOR};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{LaunchDescriptor, ProgramSelector};

/// An assembled command, ready for the spawn collaborator.
///
/// `env: None` means "inherit everything": the spawner must not override
/// the child's environment at all. `Some(map)` replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, in assembly order.
    pub args: Vec<String>,
    /// Environment block, or `None` to inherit the spawner's.
    pub env: Option<BTreeMap<String, String>>,
    /// Working directory override.
    pub working_directory: Option<PathBuf>,
}

impl Invocation {
    /// The full command line, executable first, for display.
    #[must_use]
    pub fn command_line(&self) -> Vec<String> {
        let mut line = vec![self.program.to_string_lossy().into_owned()];
        line.extend(self.args.iter().cloned());
        line
    }
}

/// Assemble a descriptor (plus invocation-time arguments) into an
/// [`Invocation`].
///
/// Pure except for a debug trace: same descriptor and extras, same result.
#[must_use]
pub fn invocation(descriptor: &LaunchDescriptor, extra_args: &[String]) -> Invocation {
    let snapshot = &descriptor.snapshot;
    let mut args = Vec::new();

    // Mode: explicit, else the snapshot's, else nothing.
    if let Some(mode) = descriptor.mode.or(snapshot.mode) {
        args.push(mode.flag().to_string());
    }

    // Architecture: explicit, else the snapshot's flag verbatim.
    if let Some(arch) = descriptor.architecture {
        args.push(arch.flag().to_string());
    } else if let Some(flag) = &snapshot.architecture_flag {
        args.push(flag.clone());
    }

    if let Some(version) = &descriptor.version {
        args.push(format!("-version:{version}"));
    }

    // Program assertions before system assertions.
    if let Some(assertions) = &descriptor.assertions {
        args.push(assertions.render(AssertionKind::Program));
    }
    if let Some(status) = descriptor.system_assertions {
        args.push(AssertionFlag::new(status).render(AssertionKind::System));
    }

    if let Some(components) = &descriptor.verbose {
        if components.is_empty() {
            args.push("-verbose".to_string());
        } else {
            args.extend(components.iter().map(|c| c.flag().to_string()));
        }
    }

    // Jvm arguments: the configured list verbatim, or the snapshot's with
    // every managed-family token stripped so they cannot duplicate the
    // flags assembled from dedicated fields above and below.
    match &descriptor.jvm_arguments {
        Some(state) => args.extend(state.values().iter().cloned()),
        None => args.extend(
            snapshot
                .runtime_arguments
                .iter()
                .filter(|token| classify(token).is_none())
                .cloned(),
        ),
    }

    for (size, kind) in [
        (descriptor.max_heap, SizeKind::MaxHeap),
        (descriptor.initial_heap, SizeKind::InitialHeap),
        (descriptor.stack_size, SizeKind::StackSize),
    ] {
        if let Some(size) = size {
            args.push(size.render(kind));
        }
    }

    // Properties: the configured map exactly (even when empty), or the
    // property-looking snapshot tokens verbatim.
    match &descriptor.properties {
        Some(state) => args.extend(
            state
                .entries()
                .iter()
                .map(|(key, value)| format!("-D{key}={value}")),
        ),
        None => args.extend(
            snapshot
                .runtime_arguments
                .iter()
                .filter(|token| classify(token) == Some(FlagFamily::Property))
                .cloned(),
        ),
    }

    match &descriptor.selector {
        ProgramSelector::Jar(path) => {
            args.push("-jar".to_string());
            args.push(path.to_string_lossy().into_owned());
        }
        ProgramSelector::Class {
            main_class,
            class_path,
        } => {
            let entries = class_path
                .as_ref()
                .map(|state| state.values())
                .unwrap_or(&snapshot.class_path);
            args.push("-cp".to_string());
            args.push(join_path_list(entries));
            args.push(main_class.clone());
        }
    }

    if let Some(state) = &descriptor.program_arguments {
        args.extend(state.values().iter().cloned());
    }

    args.extend(extra_args.iter().cloned());

    let program = executable(descriptor);
    debug!(program = %program.display(), tokens = args.len(), "assembled launch command");

    Invocation {
        program,
        args,
        env: descriptor.environment.as_ref().map(|state| state.entries().clone()),
        working_directory: descriptor.working_directory.clone(),
    }
}

fn executable(descriptor: &LaunchDescriptor) -> PathBuf {
    if let Some(home) = &descriptor.runtime_home {
        home.join("bin").join(JAVA_EXECUTABLE)
    } else if let Some(exe) = &descriptor.snapshot.java_executable {
        exe.clone()
    } else {
        PathBuf::from(JAVA_EXECUTABLE)
    }
}

fn join_path_list(entries: &[String]) -> String {
    let mut joined = String::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            joined.push(PATH_LIST_SEPARATOR);
        }
        joined.push_str(entry);
    }
    joined
}
