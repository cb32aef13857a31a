// SPDX-License-Identifier: MIT OR Apache-2.0
//! Classifier for the flag families the assembler manages itself.
//!
//! When a spec inherits the host's runtime arguments, tokens belonging to
//! a managed family must not leak through next to the flags the assembler
//! emits from its own fields. The classifier is an explicit allow-list of
//! known flag shapes, one matcher per family; anything it does not
//! recognize is foreign and passes through untouched.

use serde::{Deserialize, Serialize};

/// A flag family the assembler emits from dedicated spec fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagFamily {
    /// `-Xmx`/`-Xms`/`-Xss` sized arguments.
    Size,
    /// `-client`/`-server` selectors.
    Mode,
    /// `-d32`/`-d64` requirements.
    Architecture,
    /// `-version:<v>` constraints.
    Version,
    /// `-ea`/`-da`/`-esa`/`-dsa`, optionally scoped.
    Assertion,
    /// `-verbose` and `-verbose:<component>`.
    Verbose,
    /// `-D<key>=<value>` system properties.
    Property,
}

/// Classify a single argument token, or `None` for a foreign token.
#[must_use]
pub fn classify(token: &str) -> Option<FlagFamily> {
    if is_size_shape(token) {
        Some(FlagFamily::Size)
    } else if matches!(token, "-client" | "-server") {
        Some(FlagFamily::Mode)
    } else if matches!(token, "-d32" | "-d64") {
        Some(FlagFamily::Architecture)
    } else if token.starts_with("-version:") {
        Some(FlagFamily::Version)
    } else if is_assertion_shape(token) {
        Some(FlagFamily::Assertion)
    } else if token == "-verbose" || token.starts_with("-verbose:") {
        Some(FlagFamily::Verbose)
    } else if token.len() > 2 && token.starts_with("-D") {
        Some(FlagFamily::Property)
    } else {
        None
    }
}

/// `-Xm<x|s>` or `-Xss`, then one or more digits, then at most one unit
/// suffix. A malformed magnitude is not a size flag.
fn is_size_shape(token: &str) -> bool {
    let rest = ["-Xmx", "-Xms", "-Xss"]
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix));
    let Some(rest) = rest else {
        return false;
    };
    let digits = rest.strip_suffix(['b', 'B', 'k', 'K', 'm', 'M', 'g', 'G']).unwrap_or(rest);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_assertion_shape(token: &str) -> bool {
    const BARE: [&str; 8] = [
        "-ea",
        "-da",
        "-esa",
        "-dsa",
        "-enableassertions",
        "-disableassertions",
        "-enablesystemassertions",
        "-disablesystemassertions",
    ];
    const SCOPED: [&str; 4] = ["-ea:", "-da:", "-enableassertions:", "-disableassertions:"];
    BARE.contains(&token) || SCOPED.iter().any(|prefix| token.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_family_is_recognized() {
        assert_eq!(classify("-Xmx256m"), Some(FlagFamily::Size));
        assert_eq!(classify("-Xss1024k"), Some(FlagFamily::Size));
        assert_eq!(classify("-server"), Some(FlagFamily::Mode));
        assert_eq!(classify("-d64"), Some(FlagFamily::Architecture));
        assert_eq!(classify("-version:1.8"), Some(FlagFamily::Version));
        assert_eq!(classify("-ea:com.example..."), Some(FlagFamily::Assertion));
        assert_eq!(classify("-dsa"), Some(FlagFamily::Assertion));
        assert_eq!(classify("-verbose:gc"), Some(FlagFamily::Verbose));
        assert_eq!(classify("-Dfoo=bar"), Some(FlagFamily::Property));
    }

    #[test]
    fn foreign_tokens_stay_unclassified() {
        assert_eq!(classify("-XX:+UseG1GC"), None);
        assert_eq!(classify("--enable-preview"), None);
        assert_eq!(classify("-Xmxlots"), None);
        assert_eq!(classify("-D"), None);
        assert_eq!(classify("plain"), None);
    }

    #[test]
    fn version_tokens_never_read_as_another_family() {
        // A version constraint whose payload looks size-ish must stay a
        // version token.
        assert_eq!(classify("-version:256m"), Some(FlagFamily::Version));
    }
}
