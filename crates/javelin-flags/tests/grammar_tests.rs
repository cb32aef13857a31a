// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendered flag grammar tests for javelin-flags.

use javelin_flags::{
    AssertionFlag, AssertionKind, AssertionStatus, FlagError, FlagFamily, SizeArg, SizeKind,
    SizeUnit, VerboseComponent, VmArch, VmMode, classify,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// 1. Size grammar
// ---------------------------------------------------------------------------

#[test]
fn size_renders_per_parameter() {
    let size = SizeArg::new(256, SizeUnit::Megabytes).unwrap();
    assert_eq!(size.render(SizeKind::MaxHeap), "-Xmx256m");
    assert_eq!(size.render(SizeKind::InitialHeap), "-Xms256m");
    assert_eq!(size.render(SizeKind::StackSize), "-Xss256m");
}

#[test]
fn byte_sizes_render_without_suffix() {
    let size = SizeArg::new(4096, SizeUnit::Bytes).unwrap();
    assert_eq!(size.render(SizeKind::StackSize), "-Xss4096");
}

proptest! {
    #[test]
    fn any_valid_size_matches_the_grammar(
        magnitude in 1u64..=u32::MAX as u64,
        unit in prop_oneof![
            Just(SizeUnit::Bytes),
            Just(SizeUnit::Kilobytes),
            Just(SizeUnit::Megabytes),
            Just(SizeUnit::Gigabytes),
        ],
        kind in prop_oneof![
            Just(SizeKind::MaxHeap),
            Just(SizeKind::InitialHeap),
            Just(SizeKind::StackSize),
        ],
    ) {
        let rendered = SizeArg::new(magnitude, unit).unwrap().render(kind);
        prop_assert!(rendered.starts_with(kind.prefix()));
        // The classifier must take back every flag the renderer produces.
        prop_assert_eq!(classify(&rendered), Some(FlagFamily::Size));
    }

    #[test]
    fn rendered_sizes_parse_back(magnitude in 1u64..=u32::MAX as u64) {
        let size = SizeArg::new(magnitude, SizeUnit::Kilobytes).unwrap();
        prop_assert_eq!(size.to_string().parse::<SizeArg>().unwrap(), size);
    }
}

// ---------------------------------------------------------------------------
// 2. Assertion grammar
// ---------------------------------------------------------------------------

#[test]
fn assertion_flags_cover_both_families() {
    assert_eq!(AssertionStatus::Enabled.program_flag(), "-ea");
    assert_eq!(AssertionStatus::Disabled.program_flag(), "-da");
    assert_eq!(AssertionStatus::Enabled.system_flag(), "-esa");
    assert_eq!(AssertionStatus::Disabled.system_flag(), "-dsa");
}

#[test]
fn scoped_assertions_join_with_colons() {
    let flag = AssertionFlag::with_scopes(
        AssertionStatus::Enabled,
        ["com.example.Main", "org.example.Other"],
    )
    .unwrap();
    assert_eq!(
        flag.render(AssertionKind::Program),
        "-ea:com.example.Main:org.example.Other"
    );
}

#[test]
fn system_assertions_ignore_scopes() {
    let mut flag = AssertionFlag::new(AssertionStatus::Enabled);
    flag.push_class_scope("com.example.Main").unwrap();
    assert_eq!(flag.render(AssertionKind::System), "-esa");
}

#[test]
fn with_scopes_rejects_empty_names() {
    assert_eq!(
        AssertionFlag::with_scopes(AssertionStatus::Enabled, [""]),
        Err(FlagError::EmptyScope)
    );
}

// ---------------------------------------------------------------------------
// 3. Selector flags
// ---------------------------------------------------------------------------

#[test]
fn selector_flags_round_trip_through_recognition() {
    for mode in [VmMode::Client, VmMode::Server] {
        assert_eq!(VmMode::from_flag(mode.flag()), Some(mode));
    }
    for arch in [VmArch::Bits32, VmArch::Bits64] {
        assert_eq!(VmArch::from_flag(arch.flag()), Some(arch));
    }
    assert_eq!(VmMode::from_flag("-d64"), None);
}

#[test]
fn verbose_components_render_lowercase_names() {
    assert_eq!(VerboseComponent::Class.flag(), "-verbose:class");
    assert_eq!(VerboseComponent::Gc.flag(), "-verbose:gc");
    assert_eq!(VerboseComponent::Jni.flag(), "-verbose:jni");
}
