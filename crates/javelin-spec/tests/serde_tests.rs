// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serde round-trips for frozen descriptors and assembled invocations.

use javelin_flags::{AssertionStatus, SizeUnit, VerboseComponent};
use javelin_host::HostSnapshot;
use javelin_spec::{Invocation, LaunchDescriptor, LaunchSpec};

fn descriptor() -> LaunchDescriptor {
    LaunchSpec::with_snapshot(HostSnapshot::empty())
        .server()
        .unwrap()
        .require_version("1.8")
        .unwrap()
        .set_assertions(AssertionStatus::Enabled, ["com.example"])
        .unwrap()
        .verbose(&[VerboseComponent::Gc])
        .unwrap()
        .max_heap(256, SizeUnit::Megabytes)
        .unwrap()
        .clean_properties()
        .set("k", "v")
        .finish()
        .clean_environment()
        .set("KEY", "value")
        .finish()
        .set_class_path(["a.jar", "b.jar"])
        .unwrap()
        .main_class("com.example.Main")
        .unwrap()
        .set_program_arguments(["run"])
        .unwrap()
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// 1. Round-trips
// ---------------------------------------------------------------------------

#[test]
fn descriptor_serializes_round_trip() {
    let descriptor = descriptor();
    let json = serde_json::to_string(&descriptor).unwrap();
    assert_eq!(
        serde_json::from_str::<LaunchDescriptor>(&json).unwrap(),
        descriptor
    );
}

#[test]
fn invocation_serializes_round_trip() {
    let invocation = descriptor().invocation(&["tail".to_string()]);
    let json = serde_json::to_string(&invocation).unwrap();
    assert_eq!(serde_json::from_str::<Invocation>(&json).unwrap(), invocation);
}

// ---------------------------------------------------------------------------
// 2. A restored descriptor is the same launch
// ---------------------------------------------------------------------------

#[test]
fn a_deserialized_descriptor_assembles_identically() {
    let descriptor = descriptor();
    let json = serde_json::to_string(&descriptor).unwrap();
    let restored: LaunchDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.invocation(&[]), descriptor.invocation(&[]));
}
