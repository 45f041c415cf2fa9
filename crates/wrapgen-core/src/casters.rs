//! Run-scoped type-caster registry.
//!
//! Every native type the transformers encounter is registered here; after
//! all declarations in a header are visited, the accumulated set is
//! resolved against the caster table to the include paths actually needed.

use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use wrapgen_config::{CasterEntry, CasterTable};

/// Split a possibly-templated type string into its constituent type names.
///
/// Grammar: a base name up to the first `<`, then the remainder with
/// spaces removed, split at any of `<` `>` `(` `)` `,`. Empty fragments
/// are discarded. `Vector<Point, 3>` yields `Vector`, `Point`, `3`;
/// literal tokens like `3` simply fail the later table lookup.
pub fn decompose_type(typename: &str) -> Vec<String> {
    let Some(idx) = typename.find('<') else {
        if typename.is_empty() {
            return Vec::new();
        }
        return vec![typename.to_string()];
    };

    let mut names = Vec::new();
    if idx > 0 {
        names.push(typename[..idx].to_string());
    }
    let interior: String = typename[idx..].chars().filter(|c| *c != ' ').collect();
    for part in interior.split(['<', '>', '(', ')', ',']) {
        if !part.is_empty() {
            names.push(part.to_string());
        }
    }
    names
}

/// Caster entries claiming any constituent of `typename`, in constituent
/// order.
pub(crate) fn entries_for<'a>(table: &'a CasterTable, typename: &str) -> Vec<&'a CasterEntry> {
    decompose_type(typename)
        .iter()
        .filter_map(|name| table.get(name))
        .collect()
}

/// Accumulates every type encountered during one processing run.
///
/// The set only grows; duplicates are free. Include resolution is
/// deferred until the whole header has been visited.
#[derive(Debug, Default)]
pub struct TypeCasterRegistry {
    types: FxHashSet<String>,
}

impl TypeCasterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type. Idempotent.
    pub fn register(&mut self, typename: &str) {
        if !typename.is_empty() && !self.types.contains(typename) {
            self.types.insert(typename.to_string());
        }
    }

    /// Resolve the accumulated set to the include paths it needs,
    /// lexicographically sorted and deduplicated.
    pub fn resolve_includes(&self, table: &CasterTable) -> Vec<String> {
        let mut includes = BTreeSet::new();
        for typename in &self.types {
            for entry in entries_for(table, typename) {
                includes.insert(entry.header.clone());
            }
        }
        includes.into_iter().collect()
    }
}
