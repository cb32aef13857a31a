// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime mode, data-model architecture, and verbosity selectors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which virtual machine implementation to select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmMode {
    /// The client VM, `-client`.
    Client,
    /// The server VM, `-server`.
    Server,
}

impl VmMode {
    /// The selector flag.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Client => "-client",
            Self::Server => "-server",
        }
    }

    /// Recognize a selector flag token.
    #[must_use]
    pub fn from_flag(token: &str) -> Option<Self> {
        match token {
            "-client" => Some(Self::Client),
            "-server" => Some(Self::Server),
            _ => None,
        }
    }
}

impl fmt::Display for VmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Client => "client",
            Self::Server => "server",
        })
    }
}

/// Required data-model architecture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmArch {
    /// 32-bit data model, `-d32`.
    Bits32,
    /// 64-bit data model, `-d64`.
    Bits64,
}

impl VmArch {
    /// The requirement flag.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Bits32 => "-d32",
            Self::Bits64 => "-d64",
        }
    }

    /// Recognize a requirement flag token.
    #[must_use]
    pub fn from_flag(token: &str) -> Option<Self> {
        match token {
            "-d32" => Some(Self::Bits32),
            "-d64" => Some(Self::Bits64),
            _ => None,
        }
    }
}

/// Subsystems the runtime can report verbosely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerboseComponent {
    /// Class loading, `-verbose:class`.
    Class,
    /// Garbage collection, `-verbose:gc`.
    Gc,
    /// Native interface calls, `-verbose:jni`.
    Jni,
}

impl VerboseComponent {
    /// The qualified verbosity flag for this component.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Class => "-verbose:class",
            Self::Gc => "-verbose:gc",
            Self::Jni => "-verbose:jni",
        }
    }
}
