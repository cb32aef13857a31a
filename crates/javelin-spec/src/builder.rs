// SPDX-License-Identifier: MIT OR Apache-2.0
//! The launch-spec builder state machine.
//!
//! A [`LaunchSpec`] is created empty, mutated through a fluent owned-value
//! surface, and consumed exactly once by [`LaunchSpec::build`]. Every
//! fallible setter takes `self` and returns `Result<Self, SpecError>`, so
//! chains read `spec.jar(p)?.max_heap(256, unit)?`. Sub-builder entry
//! points hand the spec to the sub-builder, which returns it on `finish()`
//! — a dangling sub-builder therefore cannot coexist with a `build()`
//! call; ownership enforces the precondition at compile time.
//!
//! The spec is single-owner by construction: concurrent mutation is
//! unrepresentable, and no internal locking exists or is needed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use javelin_flags::{
    AssertionFlag, AssertionStatus, SizeArg, SizeUnit, VerboseComponent, VmArch, VmMode,
};
use javelin_host::{HostProbe, HostSnapshot, SystemHost};

use crate::descriptor::{LaunchDescriptor, ProgramSelector};
use crate::error::SpecError;
use crate::state::{ListState, MapState};
use crate::subbuilders::{ArgTarget, ArgumentsBuilder, ClassPathBuilder, MapBuilder, MapTarget, ScopeBuilder};

/// Which half of the program-selector group the spec has committed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StartMode {
    Unset,
    Jar,
    Class,
}

/// Builder for a JVM launch, enforcing the cross-field invariants.
///
/// See the module docs for the ownership discipline. Field semantics:
/// scalars are single-assignment (a second set fails with
/// [`SpecError::AlreadySet`] even for an equal value); collections are
/// three-way unset/clean/populated; the jar and classpath halves of the
/// program selector exclude each other from the first touch.
#[derive(Clone, Debug)]
pub struct LaunchSpec {
    pub(crate) snapshot: HostSnapshot,
    pub(crate) runtime_home: Option<PathBuf>,
    pub(crate) mode: Option<VmMode>,
    pub(crate) architecture: Option<VmArch>,
    pub(crate) version: Option<String>,
    pub(crate) start: StartMode,
    pub(crate) jar_path: Option<PathBuf>,
    pub(crate) main_class: Option<String>,
    pub(crate) class_path: Option<ListState>,
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

fn set_once<T>(slot: &mut Option<T>, field: &'static str, value: T) -> Result<(), SpecError> {
    if slot.is_some() {
        return Err(SpecError::AlreadySet { field });
    }
    *slot = Some(value);
    Ok(())
}

fn non_empty_path(path: PathBuf, what: &'static str) -> Result<PathBuf, SpecError> {
    if path.as_os_str().is_empty() {
        return Err(SpecError::InvalidArgument {
            what: format!("{what} may not be empty"),
        });
    }
    Ok(path)
}

impl LaunchSpec {
    /// Create an empty spec, capturing the host snapshot now.
    ///
    /// This is the only I/O the builder ever performs; later host-state
    /// changes never affect the spec.
    #[must_use]
    pub fn new() -> Self {
        Self::with_snapshot(SystemHost::new().snapshot())
    }

    /// Create an empty spec over a prepared snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: HostSnapshot) -> Self {
        Self {
            snapshot,
            runtime_home: None,
            mode: None,
            architecture: None,
            version: None,
            start: StartMode::Unset,
            jar_path: None,
            main_class: None,
            class_path: None,
            assertions: None,
            system_assertions: None,
            verbose: None,
            jvm_arguments: None,
            program_arguments: None,
            properties: None,
            environment: None,
            max_heap: None,
            initial_heap: None,
            stack_size: None,
            working_directory: None,
        }
    }

    /// The snapshot captured at construction.
    #[must_use]
    pub fn snapshot(&self) -> &HostSnapshot {
        &self.snapshot
    }

    // ── Single-assignment scalars ───────────────────────────────────────

    /// Root of the runtime installation the launch should use.
    pub fn runtime_home(mut self, path: impl Into<PathBuf>) -> Result<Self, SpecError> {
        let path = non_empty_path(path.into(), "runtime home")?;
        set_once(&mut self.runtime_home, "runtime home", path)?;
        Ok(self)
    }

    /// Select a VM mode.
    pub fn mode(mut self, mode: VmMode) -> Result<Self, SpecError> {
        set_once(&mut self.mode, "vm mode", mode)?;
        Ok(self)
    }

    /// Shortcut for [`VmMode::Client`].
    pub fn client(self) -> Result<Self, SpecError> {
        self.mode(VmMode::Client)
    }

    /// Shortcut for [`VmMode::Server`].
    pub fn server(self) -> Result<Self, SpecError> {
        self.mode(VmMode::Server)
    }

    /// Require a data-model architecture.
    pub fn require_architecture(mut self, arch: VmArch) -> Result<Self, SpecError> {
        set_once(&mut self.architecture, "architecture", arch)?;
        Ok(self)
    }

    /// Shortcut for [`VmArch::Bits32`].
    pub fn require_32_bit(self) -> Result<Self, SpecError> {
        self.require_architecture(VmArch::Bits32)
    }

    /// Shortcut for [`VmArch::Bits64`].
    pub fn require_64_bit(self) -> Result<Self, SpecError> {
        self.require_architecture(VmArch::Bits64)
    }

    /// Require a runtime version.
    pub fn require_version(mut self, version: impl Into<String>) -> Result<Self, SpecError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(SpecError::InvalidArgument {
                what: "version constraint may not be empty".to_string(),
            });
        }
        set_once(&mut self.version, "version constraint", version)?;
        Ok(self)
    }

    // ── Program selector group ──────────────────────────────────────────

    /// Launch from a packaged jar.
    pub fn jar(mut self, path: impl Into<PathBuf>) -> Result<Self, SpecError> {
        if self.start == StartMode::Class {
            return Err(SpecError::ConflictingState {
                attempted: "jar path",
                committed: "a classpath start",
            });
        }
        if self.jar_path.is_some() {
            return Err(SpecError::AlreadySet { field: "jar path" });
        }
        let path = non_empty_path(path.into(), "jar path")?;
        self.start = StartMode::Jar;
        self.jar_path = Some(path);
        Ok(self)
    }

    fn commit_class_start(&mut self, attempted: &'static str) -> Result<(), SpecError> {
        if self.start == StartMode::Jar {
            return Err(SpecError::ConflictingState {
                attempted,
                committed: "a jar start",
            });
        }
        self.start = StartMode::Class;
        Ok(())
    }

    /// Start a classpath seeded from the host snapshot.
    pub fn inherit_class_path(mut self) -> Result<ClassPathBuilder, SpecError> {
        self.commit_class_start("classpath")?;
        let seed = self.snapshot.class_path.clone();
        Ok(ClassPathBuilder::inherited(self, seed))
    }

    /// Start an explicitly clean classpath.
    pub fn clean_class_path(mut self) -> Result<ClassPathBuilder, SpecError> {
        self.commit_class_start("classpath")?;
        Ok(ClassPathBuilder::clean(self))
    }

    /// Set the classpath entries directly.
    ///
    /// Fails when a classpath already exists from any path.
    pub fn set_class_path<I, S>(mut self, entries: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commit_class_start("classpath")?;
        if self.class_path.is_some() {
            return Err(SpecError::AlreadySet { field: "classpath" });
        }
        let mut collected = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if entry.is_empty() {
                return Err(SpecError::InvalidArgument {
                    what: "classpath entry may not be empty".to_string(),
                });
            }
            collected.push(entry);
        }
        self.class_path = Some(ListState::Explicit(collected));
        Ok(self)
    }

    /// Name the class whose `main` starts the program.
    ///
    /// Accepts a dotted qualified name or a `/`-separated internal name,
    /// which is normalized to dotted form.
    pub fn main_class(mut self, name: impl AsRef<str>) -> Result<Self, SpecError> {
        self.commit_class_start("main class")?;
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(SpecError::InvalidArgument {
                what: "main class name may not be empty".to_string(),
            });
        }
        set_once(&mut self.main_class, "main class", name.replace('/', "."))?;
        Ok(self)
    }

    // ── Assertions ──────────────────────────────────────────────────────

    /// Enable program assertions; returns the scope accumulator.
    pub fn enable_assertions(self) -> Result<ScopeBuilder, SpecError> {
        self.assertion_scope(AssertionStatus::Enabled)
    }

    /// Disable program assertions; returns the scope accumulator.
    pub fn disable_assertions(self) -> Result<ScopeBuilder, SpecError> {
        self.assertion_scope(AssertionStatus::Disabled)
    }

    fn assertion_scope(self, status: AssertionStatus) -> Result<ScopeBuilder, SpecError> {
        if self.assertions.is_some() {
            return Err(SpecError::AlreadySet {
                field: "assertion status",
            });
        }
        Ok(ScopeBuilder::new(self, status))
    }

    /// Set the assertion status and scopes in one call.
    pub fn set_assertions<I, S>(mut self, status: AssertionStatus, scopes: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.assertions.is_some() {
            return Err(SpecError::AlreadySet {
                field: "assertion status",
            });
        }
        self.assertions = Some(AssertionFlag::with_scopes(status, scopes)?);
        Ok(self)
    }

    /// Enable system assertions.
    pub fn enable_system_assertions(self) -> Result<Self, SpecError> {
        self.set_system_assertions(AssertionStatus::Enabled)
    }

    /// Disable system assertions.
    pub fn disable_system_assertions(self) -> Result<Self, SpecError> {
        self.set_system_assertions(AssertionStatus::Disabled)
    }

    /// Set the system assertion status.
    pub fn set_system_assertions(mut self, status: AssertionStatus) -> Result<Self, SpecError> {
        set_once(
            &mut self.system_assertions,
            "system assertion status",
            status,
        )?;
        Ok(self)
    }

    // ── Verbosity ───────────────────────────────────────────────────────

    /// Select verbose components, preserving call order.
    ///
    /// An empty slice is the distinct "verbose, unqualified" value and
    /// renders as bare `-verbose`. Duplicate components are rejected.
    pub fn verbose(mut self, components: &[VerboseComponent]) -> Result<Self, SpecError> {
        if self.verbose.is_some() {
            return Err(SpecError::AlreadySet {
                field: "verbose components",
            });
        }
        for (index, component) in components.iter().enumerate() {
            if components[..index].contains(component) {
                return Err(SpecError::InvalidArgument {
                    what: format!("duplicate verbose component {component:?}"),
                });
            }
        }
        self.verbose = Some(components.to_vec());
        Ok(self)
    }

    // ── Properties and environment ──────────────────────────────────────

    /// Edit properties seeded from the host snapshot.
    #[must_use]
    pub fn inherit_properties(self) -> MapBuilder {
        let seed = self.snapshot.properties.clone();
        MapBuilder::inherited(self, MapTarget::Properties, seed)
    }

    /// Edit an explicitly clean properties map.
    #[must_use]
    pub fn clean_properties(self) -> MapBuilder {
        MapBuilder::clean(self, MapTarget::Properties)
    }

    /// Set the properties map directly.
    ///
    /// Fails when a populated map already exists from a prior path.
    pub fn set_properties(mut self, map: BTreeMap<String, String>) -> Result<Self, SpecError> {
        if self.properties.as_ref().is_some_and(|m| !m.is_empty()) {
            return Err(SpecError::AlreadySet { field: "properties" });
        }
        self.properties = Some(MapState::Explicit(map));
        Ok(self)
    }

    /// Edit environment seeded from the host snapshot.
    #[must_use]
    pub fn inherit_environment(self) -> MapBuilder {
        let seed = self.snapshot.environment.clone();
        MapBuilder::inherited(self, MapTarget::Environment, seed)
    }

    /// Edit an explicitly clean environment.
    #[must_use]
    pub fn clean_environment(self) -> MapBuilder {
        MapBuilder::clean(self, MapTarget::Environment)
    }

    /// Set the environment map directly.
    ///
    /// Fails when a populated map already exists from a prior path.
    pub fn set_environment(mut self, map: BTreeMap<String, String>) -> Result<Self, SpecError> {
        if self.environment.as_ref().is_some_and(|m| !m.is_empty()) {
            return Err(SpecError::AlreadySet { field: "environment" });
        }
        self.environment = Some(MapState::Explicit(map));
        Ok(self)
    }

    // ── Argument lists ──────────────────────────────────────────────────

    /// Extend jvm arguments seeded from the host snapshot.
    #[must_use]
    pub fn inherit_jvm_arguments(self) -> ArgumentsBuilder {
        let seed = self.snapshot.runtime_arguments.clone();
        ArgumentsBuilder::inherited(self, ArgTarget::Jvm, seed)
    }

    /// Extend an explicitly clean jvm argument list.
    #[must_use]
    pub fn clean_jvm_arguments(self) -> ArgumentsBuilder {
        ArgumentsBuilder::clean(self, ArgTarget::Jvm)
    }

    /// Set the jvm argument list directly.
    ///
    /// Fails when a populated list already exists from a prior path.
    pub fn set_jvm_arguments<I, S>(mut self, arguments: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.jvm_arguments.as_ref().is_some_and(|l| !l.is_empty()) {
            return Err(SpecError::AlreadySet {
                field: "jvm arguments",
            });
        }
        self.jvm_arguments = Some(ListState::Explicit(
            arguments.into_iter().map(Into::into).collect(),
        ));
        Ok(self)
    }

    /// Accumulate program arguments, starting clean.
    #[must_use]
    pub fn program_arguments(self) -> ArgumentsBuilder {
        ArgumentsBuilder::clean(self, ArgTarget::Program)
    }

    /// Set the program argument list directly.
    ///
    /// Fails when a populated list already exists from a prior path.
    pub fn set_program_arguments<I, S>(mut self, arguments: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.program_arguments.as_ref().is_some_and(|l| !l.is_empty()) {
            return Err(SpecError::AlreadySet {
                field: "program arguments",
            });
        }
        self.program_arguments = Some(ListState::Explicit(
            arguments.into_iter().map(Into::into).collect(),
        ));
        Ok(self)
    }

    // ── Sized arguments ─────────────────────────────────────────────────

    /// Set the maximum heap space.
    pub fn max_heap(mut self, magnitude: u64, unit: SizeUnit) -> Result<Self, SpecError> {
        let size = SizeArg::new(magnitude, unit)?;
        set_once(&mut self.max_heap, "max heap", size)?;
        Ok(self)
    }

    /// Set the initial heap space.
    pub fn initial_heap(mut self, magnitude: u64, unit: SizeUnit) -> Result<Self, SpecError> {
        let size = SizeArg::new(magnitude, unit)?;
        set_once(&mut self.initial_heap, "initial heap", size)?;
        Ok(self)
    }

    /// Set the thread stack size.
    pub fn stack_size(mut self, magnitude: u64, unit: SizeUnit) -> Result<Self, SpecError> {
        let size = SizeArg::new(magnitude, unit)?;
        set_once(&mut self.stack_size, "stack size", size)?;
        Ok(self)
    }

    // ── Working directory ───────────────────────────────────────────────

    /// Working directory for the launched process.
    pub fn working_directory(mut self, path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = non_empty_path(path.as_ref().to_path_buf(), "working directory")?;
        set_once(&mut self.working_directory, "working directory", path)?;
        Ok(self)
    }

    // ── Finalization ────────────────────────────────────────────────────

    /// Freeze the spec into an immutable launch descriptor.
    ///
    /// Fails with [`SpecError::IncompleteSpec`] when no program selector
    /// was ever committed, or when a classpath start has no main class.
    pub fn build(self) -> Result<LaunchDescriptor, SpecError> {
        let selector = match self.start {
            StartMode::Unset => {
                return Err(SpecError::IncompleteSpec {
                    missing: "a program selector (jar or main class)",
                });
            }
            StartMode::Jar => {
                let path = self.jar_path.ok_or(SpecError::IncompleteSpec {
                    missing: "a jar path",
                })?;
                ProgramSelector::Jar(path)
            }
            StartMode::Class => {
                let main_class = self.main_class.ok_or(SpecError::IncompleteSpec {
                    missing: "a main class for the classpath start",
                })?;
                ProgramSelector::Class {
                    main_class,
                    class_path: self.class_path,
                }
            }
        };

        Ok(LaunchDescriptor {
            snapshot: self.snapshot,
            runtime_home: self.runtime_home,
            mode: self.mode,
            architecture: self.architecture,
            version: self.version,
            selector,
            assertions: self.assertions,
            system_assertions: self.system_assertions,
            verbose: self.verbose,
            jvm_arguments: self.jvm_arguments,
            program_arguments: self.program_arguments,
            properties: self.properties,
            environment: self.environment,
            max_heap: self.max_heap,
            initial_heap: self.initial_heap,
            stack_size: self.stack_size,
            working_directory: self.working_directory,
        })
    }
}

impl Default for LaunchSpec {
    fn default() -> Self {
        Self::new()
    }
}
