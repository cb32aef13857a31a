// SPDX-License-Identifier: MIT OR Apache-2.0
//! Assembly-order and inherit-fallback tests.

use std::path::PathBuf;

use javelin_flags::{AssertionStatus, SizeUnit, VerboseComponent, VmMode};
use javelin_host::{HostSnapshot, PATH_LIST_SEPARATOR};
use javelin_spec::LaunchSpec;

fn spec() -> LaunchSpec {
    LaunchSpec::with_snapshot(HostSnapshot::empty())
}

// ---------------------------------------------------------------------------
// 1. Program selectors
// ---------------------------------------------------------------------------

#[test]
fn jar_launch_ends_in_jar_selector_with_no_classpath_token() {
    let descriptor = spec()
        .jar("/x/app.jar")
        .unwrap()
        .max_heap(256, SizeUnit::Megabytes)
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;

    assert!(args.contains(&"-Xmx256m".to_string()));
    assert_eq!(args[args.len() - 2..], ["-jar", "/x/app.jar"]);
    assert!(!args.contains(&"-cp".to_string()));
}

#[test]
fn class_launch_joins_the_classpath_and_appends_program_arguments() {
    let descriptor = spec()
        .set_class_path(["a.jar", "b.jar"])
        .unwrap()
        .main_class("com.example.Main")
        .unwrap()
        .set_program_arguments(["x", "y"])
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;

    let joined = format!("a.jar{PATH_LIST_SEPARATOR}b.jar");
    assert_eq!(
        args[args.len() - 4..],
        ["-cp", joined.as_str(), "com.example.Main", "x", "y"]
    );
    assert!(!args.contains(&"-jar".to_string()));
}

#[test]
fn unset_classpath_falls_back_to_the_snapshot() {
    let mut snapshot = HostSnapshot::empty();
    snapshot.class_path = vec!["host.jar".to_string(), "other.jar".to_string()];

    let descriptor = LaunchSpec::with_snapshot(snapshot)
        .main_class("com.example.Main")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;

    let cp_index = args.iter().position(|a| a == "-cp").unwrap();
    assert_eq!(
        args[cp_index + 1],
        format!("host.jar{PATH_LIST_SEPARATOR}other.jar")
    );
}

// ---------------------------------------------------------------------------
// 2. Full fixed ordering
// ---------------------------------------------------------------------------

#[test]
fn flags_assemble_in_the_contract_order() {
    let descriptor = spec()
        .server()
        .unwrap()
        .require_64_bit()
        .unwrap()
        .require_version("1.8")
        .unwrap()
        .set_assertions(AssertionStatus::Enabled, ["com.example"])
        .unwrap()
        .disable_system_assertions()
        .unwrap()
        .verbose(&[VerboseComponent::Gc, VerboseComponent::Class])
        .unwrap()
        .set_jvm_arguments(["-XX:+UseG1GC"])
        .unwrap()
        .max_heap(512, SizeUnit::Megabytes)
        .unwrap()
        .initial_heap(128, SizeUnit::Megabytes)
        .unwrap()
        .stack_size(2, SizeUnit::Megabytes)
        .unwrap()
        .clean_properties()
        .set("k", "v")
        .finish()
        .jar("/x/app.jar")
        .unwrap()
        .set_program_arguments(["run"])
        .unwrap()
        .build()
        .unwrap();

    let args = descriptor.invocation(&["--late".to_string()]).args;
    assert_eq!(
        args,
        [
            "-server",
            "-d64",
            "-version:1.8",
            "-ea:com.example",
            "-dsa",
            "-verbose:gc",
            "-verbose:class",
            "-XX:+UseG1GC",
            "-Xmx512m",
            "-Xms128m",
            "-Xss2m",
            "-Dk=v",
            "-jar",
            "/x/app.jar",
            "run",
            "--late",
        ]
    );
}

// ---------------------------------------------------------------------------
// 3. Verbosity rendering
// ---------------------------------------------------------------------------

#[test]
fn unqualified_verbose_renders_one_bare_flag() {
    let descriptor = spec().verbose(&[]).unwrap().jar("/x/a.jar").unwrap().build().unwrap();
    let args = descriptor.invocation(&[]).args;
    assert_eq!(args.iter().filter(|a| *a == "-verbose").count(), 1);
    assert!(!args.iter().any(|a| a.starts_with("-verbose:")));
}

#[test]
fn unset_verbosity_emits_nothing() {
    let descriptor = spec().jar("/x/a.jar").unwrap().build().unwrap();
    let args = descriptor.invocation(&[]).args;
    assert!(!args.iter().any(|a| a.starts_with("-verbose")));
}

// ---------------------------------------------------------------------------
// 4. Properties
// ---------------------------------------------------------------------------

#[test]
fn property_map_round_trips_into_flags() {
    let descriptor = spec()
        .clean_properties()
        .set("k", "v")
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;
    assert_eq!(args.iter().filter(|a| *a == "-Dk=v").count(), 1);
}

#[test]
fn removed_keys_emit_no_flag() {
    let descriptor = spec()
        .clean_properties()
        .set("k", "v")
        .set("keep", "1")
        .remove("k")
        .remove("absent")
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;
    assert!(!args.iter().any(|a| a.starts_with("-Dk=")));
    assert!(args.contains(&"-Dkeep=1".to_string()));
}

#[test]
fn an_explicitly_clean_map_suppresses_inherited_property_tokens() {
    let mut snapshot = HostSnapshot::empty();
    snapshot.runtime_arguments = vec!["-Dhost=1".to_string()];

    let descriptor = LaunchSpec::with_snapshot(snapshot)
        .clean_properties()
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;
    assert!(!args.iter().any(|a| a.starts_with("-D")));
}

// ---------------------------------------------------------------------------
// 5. Inherit fallbacks and the family filter
// ---------------------------------------------------------------------------

#[test]
fn inherited_runtime_arguments_keep_only_foreign_tokens() {
    let mut snapshot = HostSnapshot::empty();
    snapshot.runtime_arguments = [
        "-Xmx1g",
        "-server",
        "-XX:+UseG1GC",
        "-Dfoo=bar",
        "-verbose:gc",
        "-ea",
        "--enable-preview",
    ]
    .map(str::to_string)
    .to_vec();

    let descriptor = LaunchSpec::with_snapshot(snapshot)
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;

    // Managed families are stripped from the inherited list.
    assert!(!args.contains(&"-Xmx1g".to_string()));
    assert!(!args.contains(&"-server".to_string()));
    assert!(!args.contains(&"-verbose:gc".to_string()));
    assert!(!args.contains(&"-ea".to_string()));
    // Foreign tokens pass through; the property token reappears through
    // the unset-properties fallback only.
    assert!(args.contains(&"-XX:+UseG1GC".to_string()));
    assert!(args.contains(&"--enable-preview".to_string()));
    assert_eq!(args.iter().filter(|a| *a == "-Dfoo=bar").count(), 1);
}

#[test]
fn explicit_jvm_arguments_pass_verbatim() {
    let descriptor = spec()
        .set_jvm_arguments(["-Xmx1g"])
        .unwrap()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;
    assert!(args.contains(&"-Xmx1g".to_string()));
}

#[test]
fn snapshot_mode_and_architecture_fill_unset_fields() {
    let mut snapshot = HostSnapshot::empty();
    snapshot.mode = Some(VmMode::Server);
    snapshot.architecture_flag = Some("-d64".to_string());

    let descriptor = LaunchSpec::with_snapshot(snapshot)
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let args = descriptor.invocation(&[]).args;
    assert_eq!(args[..2], ["-server", "-d64"]);
}

#[test]
fn ambiguous_host_mode_emits_nothing() {
    let descriptor = spec().jar("/x/a.jar").unwrap().build().unwrap();
    let args = descriptor.invocation(&[]).args;
    assert!(!args.contains(&"-server".to_string()));
    assert!(!args.contains(&"-client".to_string()));
}

// ---------------------------------------------------------------------------
// 6. Executable resolution and environment block
// ---------------------------------------------------------------------------

#[test]
fn runtime_home_locates_the_executable() {
    let descriptor = spec()
        .runtime_home("/opt/jdk")
        .unwrap()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let invocation = descriptor.invocation(&[]);
    assert_eq!(
        invocation.program,
        PathBuf::from("/opt/jdk")
            .join("bin")
            .join(javelin_host::JAVA_EXECUTABLE)
    );
}

#[test]
fn snapshot_executable_is_the_fallback() {
    let mut snapshot = HostSnapshot::empty();
    snapshot.java_executable = Some(PathBuf::from("/usr/bin/java"));

    let descriptor = LaunchSpec::with_snapshot(snapshot)
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        descriptor.invocation(&[]).program,
        PathBuf::from("/usr/bin/java")
    );
}

#[test]
fn unset_environment_means_inherit_everything() {
    let descriptor = spec().jar("/x/a.jar").unwrap().build().unwrap();
    assert_eq!(descriptor.invocation(&[]).env, None);
}

#[test]
fn configured_environment_is_an_explicit_block() {
    let descriptor = spec()
        .clean_environment()
        .set("KEY", "value")
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let env = descriptor.invocation(&[]).env.unwrap();
    assert_eq!(env.get("KEY").map(String::as_str), Some("value"));
    assert_eq!(env.len(), 1);
}

#[test]
fn an_explicitly_clean_environment_is_an_empty_block_not_inherit() {
    let descriptor = spec()
        .clean_environment()
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(descriptor.invocation(&[]).env, Some(Default::default()));
}

// ---------------------------------------------------------------------------
// 7. Determinism
// ---------------------------------------------------------------------------

#[test]
fn assembly_is_reproducible() {
    let descriptor = spec()
        .clean_properties()
        .set("b", "2")
        .set("a", "1")
        .finish()
        .jar("/x/a.jar")
        .unwrap()
        .build()
        .unwrap();
    let first = descriptor.invocation(&[]);
    let second = descriptor.invocation(&[]);
    assert_eq!(first, second);
    // Map-backed flags iterate in key order.
    let d_flags: Vec<&String> = first.args.iter().filter(|a| a.starts_with("-D")).collect();
    assert_eq!(d_flags, ["-Da=1", "-Db=2"]);
}
