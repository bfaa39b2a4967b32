//! Insertion-ordered set.
//!
//! Used wherever "first seen wins" matters: deduplicating input keys,
//! collecting artist IDs across tracks, and merging genre lists.

use std::hash::Hash;

use indexmap::IndexSet;

/// A set that remembers the order values were first inserted in.
#[derive(Debug, Clone)]
pub struct OrderedSet<T>(IndexSet<T>);

impl<T: Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Insert a value, returning `true` if it wasn't already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0.into_iter().collect()
    }
}

impl<T: Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T: Eq + Hash> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(IndexSet::from_iter(iter))
    }
}
