//! Dependency graph between cells.
//!
//! Stores ordered pairs `(s, t)` meaning "t depends on s": `s` is a dependee
//! of `t` and `t` is a dependent of `s`. The graph knows nothing about cells
//! or formulas; it is a plain many-to-many index over names.
//!
//! # Invariants
//!
//! 1. **Bidirectional consistency:** `t` is in `dependents[s]` exactly when
//!    `s` is in `dependees[t]`.
//! 2. **No dangling entries:** empty sets are removed, not stored.
//! 3. **No duplicate pairs:** set semantics; `size` counts distinct pairs.

use std::collections::{HashMap, HashSet};

/// A set of "t depends on s" pairs with indices in both directions.
#[derive(Default, Debug, Clone)]
pub struct DependencyGraph {
    /// s -> {t, ...}
    dependents: HashMap<String, HashSet<String>>,
    /// t -> {s, ...}
    dependees: HashMap<String, HashSet<String>>,
    size: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the pair `(s, t)` is present.
    pub fn contains(&self, s: &str, t: &str) -> bool {
        self.dependents.get(s).is_some_and(|set| set.contains(t))
    }

    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.contains_key(s)
    }

    pub fn has_dependees(&self, t: &str) -> bool {
        self.dependees.contains_key(t)
    }

    /// Number of dependees of `t`.
    pub fn num_dependees(&self, t: &str) -> usize {
        self.dependees.get(t).map_or(0, HashSet::len)
    }

    /// Names that depend on `s`. Empty for unknown names.
    pub fn dependents<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependents
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Names that `t` depends on. Empty for unknown names.
    pub fn dependees<'a>(&'a self, t: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.dependees
            .get(t)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Every stored pair, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependents
            .iter()
            .flat_map(|(s, set)| set.iter().map(move |t| (s.as_str(), t.as_str())))
    }

    /// Add `(s, t)`. No-op if already present.
    pub fn add_dependency(&mut self, s: &str, t: &str) {
        if self.contains(s, t) {
            return;
        }
        self.dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());
        self.dependees
            .entry(t.to_string())
            .or_default()
            .insert(s.to_string());
        self.size += 1;
    }

    /// Remove `(s, t)`. No-op if absent.
    pub fn remove_dependency(&mut self, s: &str, t: &str) {
        if !self.contains(s, t) {
            return;
        }
        remove_from(&mut self.dependents, s, t);
        remove_from(&mut self.dependees, t, s);
        self.size -= 1;
    }

    /// Replace every `(s, *)` pair with `(s, t)` for each `t` in `new_dependents`.
    pub fn replace_dependents<I, S>(&mut self, s: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependents.remove(s) {
            self.size -= old.len();
            for t in &old {
                remove_from(&mut self.dependees, t, s);
            }
        }
        for t in new_dependents {
            self.add_dependency(s, t.as_ref());
        }
    }

    /// Replace every `(*, t)` pair with `(s, t)` for each `s` in `new_dependees`.
    pub fn replace_dependees<I, S>(&mut self, t: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(old) = self.dependees.remove(t) {
            self.size -= old.len();
            for s in &old {
                remove_from(&mut self.dependents, s, t);
            }
        }
        for s in new_dependees {
            self.add_dependency(s.as_ref(), t);
        }
    }
}

/// Remove `value` from `index[key]`, pruning the key when its set empties.
fn remove_from(index: &mut HashMap<String, HashSet<String>>, key: &str, value: &str) {
    if let Some(set) = index.get_mut(key) {
        set.remove(value);
        if set.is_empty() {
            index.remove(key);
        }
    }
}
