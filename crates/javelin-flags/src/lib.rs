// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flag vocabulary for the javelin launcher.
//!
//! Everything the assembler ever prints lives here: sized interpreter
//! arguments (`-Xmx256m`), assertion switches (`-ea:com.example...`),
//! mode/architecture/verbosity selectors, and the [`FlagFamily`]
//! classifier used to recognize these shapes in an inherited argument
//! list. The types are plain values; the builder state machine that
//! decides *when* a flag is emitted lives in `javelin-spec`.
#![deny(unsafe_code)]

mod assertions;
mod error;
mod family;
mod size;
mod vm;

pub use assertions::{AssertionFlag, AssertionKind, AssertionStatus};
pub use error::FlagError;
pub use family::{FlagFamily, classify};
pub use size::{SizeArg, SizeKind, SizeUnit};
pub use vm::{VerboseComponent, VmArch, VmMode};
