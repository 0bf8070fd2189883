// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw section dimensions as they arrive from the source model
//!
//! Field names are not normalized here: a section may carry `A`/`B`/`t1`/`t2`
//! codes, camelCase or snake_case keys. Normalization is the job of the
//! parameter mapper in the geometry crate.

use crate::error::{Error, Result};
use crate::units::parse_number;
use rustc_hash::FxHashMap;

/// Unordered map of raw dimension name to value (millimeters)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawDimensions {
    values: FxHashMap<String, f64>,
}

impl RawDimensions {
    /// Create an empty dimension map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from numeric key/value pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut dims = Self::new();
        for (key, value) in pairs {
            dims.insert(key, value);
        }
        dims
    }

    /// Build from attribute strings, failing on the first unparsable value
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut dims = Self::new();
        for (key, text) in attributes {
            let value = parse_number(text).ok_or_else(|| Error::InvalidNumber {
                key: key.to_string(),
                value: text.to_string(),
            })?;
            dims.insert(key, value);
        }
        Ok(dims)
    }

    /// Build from attribute strings, silently skipping non-numeric values
    ///
    /// Source sections mix numeric dimensions with names and strength
    /// grades (`strength="SN490B"`), which are not dimensions.
    pub fn from_attributes_lenient<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut dims = Self::new();
        for (key, text) in attributes {
            if let Some(value) = parse_number(text) {
                dims.insert(key, value);
            }
        }
        dims
    }

    /// Insert or replace a value
    #[inline]
    pub fn insert(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by exact key
    #[inline]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Whether the exact key is present
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// First present key among `aliases`, in order
    pub fn first_of<'a>(&self, aliases: &[&'a str]) -> Option<(&'a str, f64)> {
        aliases
            .iter()
            .find_map(|alias| self.values.get(*alias).map(|v| (*alias, *v)))
    }

    /// Whether any of `aliases` is present
    #[inline]
    pub fn has_any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.values.contains_key(*alias))
    }

    /// Entries sorted by key (stable regardless of insertion order)
    pub fn sorted_entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> =
            self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no dimensions are present
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
