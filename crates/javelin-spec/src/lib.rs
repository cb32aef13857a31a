// SPDX-License-Identifier: MIT OR Apache-2.0
//! Launch-spec builder and command assembly for the javelin launcher.
//!
//! The [`LaunchSpec`] builder accumulates a JVM launch configuration under
//! strict invariants (single-assignment scalars, a mutually exclusive
//! jar/classpath program selector, three-way unset/clean/populated
//! collection states), freezes it into an immutable [`LaunchDescriptor`],
//! and [`assemble`]s that into the argv/env/workdir triple the spawn
//! collaborator consumes.
//!
//! ```
//! use javelin_flags::SizeUnit;
//! use javelin_host::HostSnapshot;
//! use javelin_spec::LaunchSpec;
//!
//! # fn main() -> Result<(), javelin_spec::SpecError> {
//! let descriptor = LaunchSpec::with_snapshot(HostSnapshot::empty())
//!     .jar("/opt/app/app.jar")?
//!     .max_heap(256, SizeUnit::Megabytes)?
//!     .build()?;
//! let invocation = descriptor.invocation(&[]);
//! assert!(invocation.args.contains(&"-Xmx256m".to_string()));
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod assemble;
mod builder;
mod descriptor;
mod error;
mod state;
mod subbuilders;

pub use assemble::{Invocation, invocation};
pub use builder::LaunchSpec;
pub use descriptor::{LaunchDescriptor, ProgramSelector};
pub use error::SpecError;
pub use state::{ListState, MapState};
pub use subbuilders::{ArgumentsBuilder, ClassPathBuilder, MapBuilder, ScopeBuilder};

impl LaunchDescriptor {
    /// Assemble this descriptor, appending invocation-time arguments last.
    #[must_use]
    pub fn invocation(&self, extra_args: &[String]) -> Invocation {
        invocation(self, extra_args)
    }
}
