//! Sparse vector type.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A sparse vector: dimension index to weight.
///
/// On the wire this is a JSON object whose keys are the decimal indices,
/// e.g. `{"1": 0.4, "10000": 0.6}`. Decoding fails if a key is not a
/// valid `i32`. Entry order carries no meaning.
///
/// # Example
///
/// ```
/// use dashvector_core::SparseVector;
///
/// let sv = SparseVector::new().with_entry(1, 0.4).with_entry(10000, 0.6);
/// assert_eq!(sv.len(), 2);
/// assert_eq!(sv.get(10000), Some(0.6));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseVector {
    entries: HashMap<i32, f32>,
}

impl SparseVector {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds one entry. Chainable; other entries are kept.
    #[inline]
    pub fn with_entry(mut self, index: i32, weight: f32) -> Self {
        self.entries.insert(index, weight);
        self
    }

    /// Inserts one entry, returning the previous weight at that index.
    #[inline]
    pub fn insert(&mut self, index: i32, weight: f32) -> Option<f32> {
        self.entries.insert(index, weight)
    }

    #[inline]
    pub fn get(&self, index: i32) -> Option<f32> {
        self.entries.get(&index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (i32, f32)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Consumes the vector and returns the underlying map.
    #[inline]
    pub fn into_inner(self) -> HashMap<i32, f32> {
        self.entries
    }
}

impl From<HashMap<i32, f32>> for SparseVector {
    fn from(entries: HashMap<i32, f32>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(i32, f32)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (i32, f32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
