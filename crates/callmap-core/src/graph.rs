//! Call graph data model.
//!
//! A [`CallGraph`] maps each fully-qualified caller name to the distinct
//! callee names found in its body. Both levels are kept in ordered
//! collections so every report derived from a graph is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Distinct callee names invoked by one caller, in ascending lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallGraphEntry {
    callees: BTreeSet<String>,
}

impl CallGraphEntry {
    /// Creates an entry with no callees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a callee name. Returns `false` if it was already present.
    pub fn add(&mut self, callee: impl Into<String>) -> bool {
        self.callees.insert(callee.into())
    }

    /// Returns `true` if this entry lists `callee`.
    #[must_use]
    pub fn contains(&self, callee: &str) -> bool {
        self.callees.contains(callee)
    }

    /// Number of distinct callees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callees.len()
    }

    /// Returns `true` if the caller invokes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callees.is_empty()
    }

    /// Iterates callee names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.callees.iter().map(String::as_str)
    }

    /// Returns the callees as an owned, sorted vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.callees.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CallGraphEntry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            callees: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BTreeSet<String>> for CallGraphEntry {
    fn from(callees: BTreeSet<String>) -> Self {
        Self { callees }
    }
}

/// Mapping from fully-qualified caller name to its [`CallGraphEntry`].
///
/// Keys are unique. Inserting an existing key replaces the previous entry;
/// that is how a redefinition in a later file wins over an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallGraph {
    entries: BTreeMap<String, CallGraphEntry>,
}

impl CallGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` under `caller`, returning the entry it replaced.
    pub fn insert(
        &mut self,
        caller: impl Into<String>,
        entry: CallGraphEntry,
    ) -> Option<CallGraphEntry> {
        self.entries.insert(caller.into(), entry)
    }

    /// Merges `other` into `self`. Entries from `other` overwrite existing
    /// ones; the names of overwritten callers are returned in order.
    pub fn merge(&mut self, other: CallGraph) -> Vec<String> {
        let mut overwritten = Vec::new();
        for (caller, entry) in other.entries {
            match self.entries.entry(caller) {
                btree_map::Entry::Occupied(mut slot) => {
                    overwritten.push(slot.key().clone());
                    slot.insert(entry);
                }
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
            }
        }
        overwritten
    }

    /// Looks up the entry recorded for `caller`.
    #[must_use]
    pub fn get(&self, caller: &str) -> Option<&CallGraphEntry> {
        self.entries.get(caller)
    }

    /// Number of callers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no caller has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (caller, callee) pairs.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(CallGraphEntry::len).sum()
    }

    /// Iterates `(caller, entry)` pairs sorted by caller.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CallGraphEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates every `(caller, callee)` edge, sorted by caller then callee.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(caller, entry)| entry.iter().map(move |callee| (caller, callee)))
    }
}
