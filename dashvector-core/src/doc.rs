//! Documents: the records stored in a collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{
    is_none_or_empty, is_none_or_empty_map, is_zero_f32, lenient_string, null_as_default,
};
use crate::fields::Fields;
use crate::sparse::SparseVector;

/// One document, used both to build write requests and as decoded output.
///
/// A document is either in single-vector mode (`vector`) or multi-vector
/// mode (`vectors`, keyed by the collection's named vector schemas). Query
/// output may carry neither when vectors were not requested.
///
/// # Example
///
/// ```
/// use dashvector_core::Doc;
///
/// let doc = Doc::new()
///     .with_id("1")
///     .with_vector(vec![0.1, 0.2, 0.3, 0.4])
///     .with_sparse(1, 0.4)
///     .with_field("name", "zhangsan");
///
/// assert_eq!(doc.sparse_vector.get(1), Some(0.4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    /// Server assigns one on insert when left empty.
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "lenient_string"
    )]
    pub id: String,

    #[serde(default, skip_serializing_if = "is_none_or_empty")]
    pub vector: Option<Vec<f32>>,

    #[serde(
        default,
        skip_serializing_if = "is_none_or_empty_map",
        deserialize_with = "named_vectors"
    )]
    pub vectors: Option<HashMap<String, Vec<f32>>>,

    #[serde(
        default,
        skip_serializing_if = "SparseVector::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub sparse_vector: SparseVector,

    #[serde(
        default,
        skip_serializing_if = "Fields::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub fields: Fields,

    /// Output only; zero outside of query results.
    #[serde(
        default,
        skip_serializing_if = "is_zero_f32",
        deserialize_with = "null_as_default"
    )]
    pub score: f32,
}

/// Which vector representation a document carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorKind<'a> {
    Dense(&'a [f32]),
    Named(&'a HashMap<String, Vec<f32>>),
    Absent,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the single dense vector, replacing any earlier one.
    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Sets one named vector. Other names are kept.
    pub fn with_named_vector(mut self, name: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), vector);
        self
    }

    /// Adds one sparse entry. Other indices are kept.
    pub fn with_sparse(mut self, index: i32, weight: f32) -> Self {
        self.sparse_vector.insert(index, weight);
        self
    }

    pub fn with_sparse_vector(mut self, sparse_vector: SparseVector) -> Self {
        self.sparse_vector = sparse_vector;
        self
    }

    /// Sets one scalar field. Other fields are kept.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.set(name, value);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Reports the vector representation, preferring the dense vector.
    pub fn vector_kind(&self) -> VectorKind<'_> {
        match (&self.vector, &self.vectors) {
            (Some(v), _) if !v.is_empty() => VectorKind::Dense(v),
            (_, Some(named)) if !named.is_empty() => VectorKind::Named(named),
            _ => VectorKind::Absent,
        }
    }

    /// Returns the named vector `name`, if present.
    pub fn named_vector(&self, name: &str) -> Option<&[f32]> {
        self.vectors
            .as_ref()
            .and_then(|named| named.get(name))
            .map(Vec::as_slice)
    }
}

// `"vectors": null` decodes as absent rather than failing.
fn named_vectors<'de, D>(deserializer: D) -> Result<Option<HashMap<String, Vec<f32>>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let named = Option::<HashMap<String, Option<Vec<f32>>>>::deserialize(deserializer)?;
    Ok(named.map(|m| {
        m.into_iter()
            .map(|(name, v)| (name, v.unwrap_or_default()))
            .collect()
    }))
}
