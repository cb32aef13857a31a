// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sub-builders for scopes, classpaths, maps, and argument lists.
//!
//! Each sub-builder takes ownership of the spec at its entry point and
//! hands it back on `finish()`. Dropping a sub-builder discards the spec
//! with it, so a half-edited collection can never leak into a `build()`.

use std::collections::BTreeMap;
use std::path::Path;

use javelin_flags::{AssertionFlag, AssertionStatus};

use crate::builder::LaunchSpec;
use crate::error::SpecError;
use crate::state::{ListState, MapState};

/// Accumulates assertion scopes after the status has been fixed.
#[derive(Debug)]
pub struct ScopeBuilder {
    spec: LaunchSpec,
    flag: AssertionFlag,
}

impl ScopeBuilder {
    pub(crate) fn new(spec: LaunchSpec, status: AssertionStatus) -> Self {
        Self {
            spec,
            flag: AssertionFlag::new(status),
        }
    }

    /// Narrow to a class by qualified name.
    pub fn include_class(mut self, name: impl Into<String>) -> Result<Self, SpecError> {
        self.flag.push_class_scope(name)?;
        Ok(self)
    }

    /// Narrow to a package and its subpackages.
    pub fn include_package(mut self, name: impl AsRef<str>) -> Result<Self, SpecError> {
        self.flag.push_package_scope(name)?;
        Ok(self)
    }

    /// Finalize the scopes back into the spec.
    #[must_use]
    pub fn finish(mut self) -> LaunchSpec {
        self.spec.assertions = Some(self.flag);
        self.spec
    }
}

/// Accumulates classpath entries for a classpath start.
#[derive(Debug)]
pub struct ClassPathBuilder {
    spec: LaunchSpec,
    entries: Vec<String>,
    inherited: bool,
}

impl ClassPathBuilder {
    pub(crate) fn inherited(spec: LaunchSpec, seed: Vec<String>) -> Self {
        Self {
            spec,
            entries: seed,
            inherited: true,
        }
    }

    pub(crate) fn clean(spec: LaunchSpec) -> Self {
        Self {
            spec,
            entries: Vec::new(),
            inherited: false,
        }
    }

    /// Append a classpath entry.
    pub fn add_entry(mut self, entry: impl Into<String>) -> Result<Self, SpecError> {
        let entry = entry.into();
        if entry.is_empty() {
            return Err(SpecError::InvalidArgument {
                what: "classpath entry may not be empty".to_string(),
            });
        }
        self.entries.push(entry);
        Ok(self)
    }

    /// Append a filesystem path as an entry.
    pub fn add_path(self, path: impl AsRef<Path>) -> Result<Self, SpecError> {
        self.add_entry(path.as_ref().to_string_lossy().into_owned())
    }

    /// Finalize the entries back into the spec.
    #[must_use]
    pub fn finish(mut self) -> LaunchSpec {
        self.spec.class_path = Some(if self.inherited {
            ListState::Inherited(self.entries)
        } else {
            ListState::Explicit(self.entries)
        });
        self.spec
    }
}

/// Which map a [`MapBuilder`] edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MapTarget {
    Properties,
    Environment,
}

/// Incremental editor for the properties or environment map.
#[derive(Debug)]
pub struct MapBuilder {
    spec: LaunchSpec,
    target: MapTarget,
    entries: BTreeMap<String, String>,
    inherited: bool,
}

impl MapBuilder {
    pub(crate) fn inherited(
        spec: LaunchSpec,
        target: MapTarget,
        seed: BTreeMap<String, String>,
    ) -> Self {
        Self {
            spec,
            target,
            entries: seed,
            inherited: true,
        }
    }

    pub(crate) fn clean(spec: LaunchSpec, target: MapTarget) -> Self {
        Self {
            spec,
            target,
            entries: BTreeMap::new(),
            inherited: false,
        }
    }

    /// Set a key; the last set wins.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Remove a key; removing an absent key is a no-op.
    #[must_use]
    pub fn remove(mut self, key: &str) -> Self {
        self.entries.remove(key);
        self
    }

    /// Finalize the entries back into the spec.
    #[must_use]
    pub fn finish(mut self) -> LaunchSpec {
        let state = if self.inherited {
            MapState::Inherited(self.entries)
        } else {
            MapState::Explicit(self.entries)
        };
        match self.target {
            MapTarget::Properties => self.spec.properties = Some(state),
            MapTarget::Environment => self.spec.environment = Some(state),
        }
        self.spec
    }
}

/// Which list an [`ArgumentsBuilder`] extends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArgTarget {
    Jvm,
    Program,
}

/// Appends to the jvm or program argument list.
#[derive(Debug)]
pub struct ArgumentsBuilder {
    spec: LaunchSpec,
    target: ArgTarget,
    values: Vec<String>,
    inherited: bool,
}

impl ArgumentsBuilder {
    pub(crate) fn inherited(spec: LaunchSpec, target: ArgTarget, seed: Vec<String>) -> Self {
        Self {
            spec,
            target,
            values: seed,
            inherited: true,
        }
    }

    pub(crate) fn clean(spec: LaunchSpec, target: ArgTarget) -> Self {
        Self {
            spec,
            target,
            values: Vec::new(),
            inherited: false,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn add(mut self, argument: impl Into<String>) -> Self {
        self.values.push(argument.into());
        self
    }

    /// Append several arguments in order.
    #[must_use]
    pub fn add_all<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Finalize the list back into the spec.
    #[must_use]
    pub fn finish(mut self) -> LaunchSpec {
        let state = if self.inherited {
            ListState::Inherited(self.values)
        } else {
            ListState::Explicit(self.values)
        };
        match self.target {
            ArgTarget::Jvm => self.spec.jvm_arguments = Some(state),
            ArgTarget::Program => self.spec.program_arguments = Some(state),
        }
        self.spec
    }
}
