//! Variable store - the numeric state every condition reads and every effect writes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value returned for any variable that was never set.
pub const DEFAULT_VALUE: i64 = 0;

/// The complete numeric state of a conversation at any point in time.
///
/// Reads never fail: a variable that was never set reads as [`DEFAULT_VALUE`].
/// A read miss does not insert the variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Globals {
    values: BTreeMap<String, i64>,
}

impl Globals {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with author-supplied defaults.
    pub fn with_defaults<K, I>(defaults: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, i64)>,
    {
        Self {
            values: defaults.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Read a variable, defaulting to zero.
    pub fn get(&self, name: &str) -> i64 {
        self.values.get(name).copied().unwrap_or(DEFAULT_VALUE)
    }

    /// Write a variable.
    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), value);
    }

    /// Check whether a variable has been explicitly written.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over explicitly written variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of explicitly written variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for Globals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}
