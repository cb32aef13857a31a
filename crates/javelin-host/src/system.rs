// SPDX-License-Identifier: MIT OR Apache-2.0
//! The real host probe, backed by process environment state.
//!
//! A native host carries its JVM-facing configuration in the conventional
//! places: `JAVA_HOME` and `PATH` locate the executable, `CLASSPATH` holds
//! the classpath, and the pickup variables (`JDK_JAVA_OPTIONS`,
//! `JAVA_TOOL_OPTIONS`) hold the runtime arguments a launched JVM would
//! see. Mode, architecture, and properties are read out of those argument
//! tokens.

use std::collections::BTreeMap;
use std::path::PathBuf;

use javelin_flags::{VmArch, VmMode};
use tracing::debug;

use crate::{HostProbe, JAVA_EXECUTABLE, PATH_LIST_SEPARATOR, find_executable};

/// Environment variables whose contents a launched JVM picks up as
/// runtime arguments, in pickup order.
const OPTION_VARIABLES: [&str; 2] = ["JAVA_TOOL_OPTIONS", "JDK_JAVA_OPTIONS"];

/// Probe reading the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost;

impl SystemHost {
    /// Create the system probe.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HostProbe for SystemHost {
    fn current_mode(&self) -> Option<VmMode> {
        mode_from_arguments(&self.current_runtime_arguments())
    }

    fn current_architecture_flag(&self) -> Option<String> {
        architecture_from_arguments(&self.current_runtime_arguments())
    }

    fn current_runtime_arguments(&self) -> Vec<String> {
        let mut arguments = Vec::new();
        for variable in OPTION_VARIABLES {
            if let Ok(value) = std::env::var(variable) {
                arguments.extend(split_options(&value));
            }
        }
        arguments
    }

    fn current_properties(&self) -> BTreeMap<String, String> {
        properties_from_arguments(&self.current_runtime_arguments())
    }

    fn current_environment(&self) -> BTreeMap<String, String> {
        std::env::vars().collect()
    }

    fn current_class_path(&self) -> Vec<String> {
        std::env::var("CLASSPATH")
            .map(|value| split_class_path(&value))
            .unwrap_or_default()
    }

    fn java_executable(&self) -> Option<PathBuf> {
        if let Ok(home) = std::env::var("JAVA_HOME") {
            let candidate = PathBuf::from(home).join("bin").join(JAVA_EXECUTABLE);
            if candidate.exists() {
                return Some(candidate);
            }
            debug!(candidate = %candidate.display(), "JAVA_HOME does not hold a java executable");
        }
        find_executable(JAVA_EXECUTABLE)
    }
}

/// Split an option variable's value into argument tokens.
///
/// Tokens are whitespace-separated; the quoting rules some JVMs apply to
/// these variables are not reproduced.
fn split_options(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn split_class_path(value: &str) -> Vec<String> {
    value
        .split(PATH_LIST_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn mode_from_arguments(arguments: &[String]) -> Option<VmMode> {
    arguments.iter().find_map(|token| VmMode::from_flag(token))
}

fn architecture_from_arguments(arguments: &[String]) -> Option<String> {
    arguments
        .iter()
        .find(|token| VmArch::from_flag(token).is_some())
        .cloned()
}

fn properties_from_arguments(arguments: &[String]) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for token in arguments {
        let Some(definition) = token.strip_prefix("-D") else {
            continue;
        };
        let (key, value) = match definition.split_once('=') {
            Some((key, value)) => (key, value),
            None => (definition, ""),
        };
        if !key.is_empty() {
            properties.insert(key.to_string(), value.to_string());
        }
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_split_on_whitespace() {
        assert_eq!(
            split_options(" -server\t-Xmx1g  -Dfoo=bar "),
            vec!["-server", "-Xmx1g", "-Dfoo=bar"]
        );
    }

    #[test]
    fn class_path_split_drops_empty_entries() {
        let value = format!("a.jar{sep}{sep}b.jar", sep = PATH_LIST_SEPARATOR);
        assert_eq!(split_class_path(&value), vec!["a.jar", "b.jar"]);
    }

    #[test]
    fn mode_and_architecture_come_from_tokens() {
        let arguments: Vec<String> = ["-d64", "-server", "-Xmx1g"]
            .map(str::to_string)
            .to_vec();
        assert_eq!(mode_from_arguments(&arguments), Some(VmMode::Server));
        assert_eq!(
            architecture_from_arguments(&arguments),
            Some("-d64".to_string())
        );
        assert_eq!(mode_from_arguments(&[]), None);
    }

    #[test]
    fn properties_parse_with_last_definition_winning() {
        let arguments: Vec<String> = ["-Da=1", "-Dflagless", "-Da=2", "-D=skipped"]
            .map(str::to_string)
            .to_vec();
        let properties = properties_from_arguments(&arguments);
        assert_eq!(properties.get("a").map(String::as_str), Some("2"));
        assert_eq!(properties.get("flagless").map(String::as_str), Some(""));
        assert!(!properties.contains_key(""));
    }
}
