// SPDX-License-Identifier: MIT OR Apache-2.0
//! Assertion switches: `-ea`/`-da` with optional scopes, `-esa`/`-dsa`.

use serde::{Deserialize, Serialize};

use crate::FlagError;

/// Whether assertions are switched on or off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionStatus {
    /// Assertions enabled.
    Enabled,
    /// Assertions disabled.
    Disabled,
}

impl AssertionStatus {
    /// Flag for program assertions.
    #[must_use]
    pub fn program_flag(self) -> &'static str {
        match self {
            Self::Enabled => "-ea",
            Self::Disabled => "-da",
        }
    }

    /// Flag for system (runtime-internal) assertions.
    #[must_use]
    pub fn system_flag(self) -> &'static str {
        match self {
            Self::Enabled => "-esa",
            Self::Disabled => "-dsa",
        }
    }
}

/// Which assertion family a flag renders for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssertionKind {
    /// Program assertions; scopes narrow the affected classes/packages.
    Program,
    /// System assertions; never scoped.
    System,
}

/// An assertion status optionally narrowed to named scopes.
///
/// The status is fixed at construction; scopes accumulate afterwards in
/// call order. Scope ordering is significant to the target runtime, so it
/// is preserved verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFlag {
    status: AssertionStatus,
    scopes: Vec<String>,
}

impl AssertionFlag {
    /// Create a flag with the given status and no scopes.
    #[must_use]
    pub fn new(status: AssertionStatus) -> Self {
        Self {
            status,
            scopes: Vec::new(),
        }
    }

    /// Create a flag with a pre-collected scope list.
    pub fn with_scopes<I, S>(status: AssertionStatus, scopes: I) -> Result<Self, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flag = Self::new(status);
        for scope in scopes {
            flag.push_class_scope(scope)?;
        }
        Ok(flag)
    }

    /// The fixed status.
    #[must_use]
    pub fn status(&self) -> AssertionStatus {
        self.status
    }

    /// Scopes in accumulation order.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Narrow to a class by qualified name.
    pub fn push_class_scope(&mut self, name: impl Into<String>) -> Result<(), FlagError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FlagError::EmptyScope);
        }
        self.scopes.push(name);
        Ok(())
    }

    /// Narrow to a package and its subpackages; rendered as `name...`.
    pub fn push_package_scope(&mut self, name: impl AsRef<str>) -> Result<(), FlagError> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(FlagError::EmptyScope);
        }
        self.scopes.push(format!("{name}..."));
        Ok(())
    }

    /// Render the flag.
    ///
    /// Program assertions carry their scopes as a `:`-joined suffix; system
    /// assertions are always the bare flag.
    #[must_use]
    pub fn render(&self, kind: AssertionKind) -> String {
        match kind {
            AssertionKind::System => self.status.system_flag().to_string(),
            AssertionKind::Program if self.scopes.is_empty() => {
                self.status.program_flag().to_string()
            }
            AssertionKind::Program => {
                format!("{}:{}", self.status.program_flag(), self.scopes.join(":"))
            }
        }
    }
}
