// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tagged collection states for the three-way unset/clean/populated model.
//!
//! A field that was never touched is the surrounding `Option::None`; these
//! states only represent configuration that *was* made, and keep inherited
//! and explicit provenance apart instead of leaning on null-vs-empty
//! ambiguity. Inherited values are copied out of the host snapshot at the
//! moment of the call — the variants hold plain data, never a live view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered argument or classpath list with known provenance.
///
/// Duplicates are allowed and order is significant; both are meaningful to
/// the launched runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListState {
    /// Copied from the host snapshot when the inherit mode was selected.
    Inherited(Vec<String>),
    /// Explicitly supplied; an empty list means explicitly clean.
    Explicit(Vec<String>),
}

impl ListState {
    /// A clean, explicitly empty list.
    #[must_use]
    pub fn clean() -> Self {
        Self::Explicit(Vec::new())
    }

    /// The values, regardless of provenance.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Inherited(values) | Self::Explicit(values) => values,
        }
    }

    /// Consume into the value list.
    #[must_use]
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Inherited(values) | Self::Explicit(values) => values,
        }
    }

    /// Whether the list holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// A key-unique map with known provenance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapState {
    /// Copied from the host snapshot when the inherit mode was selected.
    Inherited(BTreeMap<String, String>),
    /// Explicitly supplied; an empty map means explicitly clean.
    Explicit(BTreeMap<String, String>),
}

impl MapState {
    /// A clean, explicitly empty map.
    #[must_use]
    pub fn clean() -> Self {
        Self::Explicit(BTreeMap::new())
    }

    /// The entries, regardless of provenance.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Inherited(entries) | Self::Explicit(entries) => entries,
        }
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
