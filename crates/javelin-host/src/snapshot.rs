// SPDX-License-Identifier: MIT OR Apache-2.0
//! The one-shot host configuration snapshot.

use std::collections::BTreeMap;
use std::path::PathBuf;

use javelin_flags::VmMode;
use serde::{Deserialize, Serialize};

/// Everything a launch spec may inherit from its host, captured at one
/// moment.
///
/// A snapshot is plain data: cloning or mutating the host after capture
/// never changes it. The empty snapshot (via [`Default`]) stands in for a
/// host with nothing to offer, which is also the right probe stub for
/// tests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// VM mode the host runs under, when discoverable.
    pub mode: Option<VmMode>,
    /// Architecture flag in effect, verbatim (`-d32`/`-d64`).
    pub architecture_flag: Option<String>,
    /// Runtime arguments the host was started with.
    pub runtime_arguments: Vec<String>,
    /// System properties set on the host.
    pub properties: BTreeMap<String, String>,
    /// The host's environment variables.
    pub environment: BTreeMap<String, String>,
    /// The host's classpath entries, in order.
    pub class_path: Vec<String>,
    /// The java executable the host resolves to.
    pub java_executable: Option<PathBuf>,
}

impl HostSnapshot {
    /// A snapshot with nothing inherited.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_offers_nothing() {
        let snapshot = HostSnapshot::empty();
        assert_eq!(snapshot.mode, None);
        assert!(snapshot.runtime_arguments.is_empty());
        assert!(snapshot.class_path.is_empty());
    }

    #[test]
    fn snapshot_serializes_round_trip() {
        let snapshot = HostSnapshot {
            mode: Some(VmMode::Server),
            runtime_arguments: vec!["-Xmx1g".to_string()],
            ..HostSnapshot::empty()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(serde_json::from_str::<HostSnapshot>(&json).unwrap(), snapshot);
    }
}
