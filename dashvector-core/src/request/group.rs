//! Group-by query options.

use serde::Serialize;

use crate::codec::{is_false, is_none_or_empty, is_zero_usize};
use crate::sparse::SparseVector;

/// A similarity query whose results are grouped by a scalar field.
///
/// The group-by field itself is passed to
/// [`Partition::group_query`](crate::Partition::group_query), which
/// rejects an empty name before building the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupQuery {
    #[serde(skip_serializing_if = "is_zero_usize")]
    group_count: usize,
    #[serde(skip_serializing_if = "is_zero_usize")]
    group_topk: usize,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    vector: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "SparseVector::is_empty")]
    sparse_vector: SparseVector,
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "is_false")]
    include_vector: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    filter: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    output_fields: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    vector_field: String,
}

impl GroupQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of groups returned.
    pub fn with_group_count(mut self, group_count: usize) -> Self {
        self.group_count = group_count;
        self
    }

    /// Maximum number of documents per group.
    pub fn with_group_topk(mut self, group_topk: usize) -> Self {
        self.group_topk = group_topk;
        self
    }

    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    pub fn with_sparse(mut self, index: i32, weight: f32) -> Self {
        self.sparse_vector.insert(index, weight);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_include_vector(mut self, include_vector: bool) -> Self {
        self.include_vector = include_vector;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_output_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Named vector used to rank documents inside each group.
    pub fn with_vector_field(mut self, vector_field: impl Into<String>) -> Self {
        self.vector_field = vector_field.into();
        self
    }
}

/// Body of `POST /collections/{c}/query_group_by`.
#[derive(Debug, Serialize)]
pub(crate) struct GroupQueryRequest<'a> {
    pub group_by_field: &'a str,
    #[serde(flatten)]
    pub query: &'a GroupQuery,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub partition: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_query_body() {
        let query = GroupQuery::new()
            .with_group_count(3)
            .with_group_topk(2)
            .with_vector(vec![0.5, 0.25])
            .with_sparse(7, 1.0)
            .with_filter("age > 1")
            .with_vector_field("title");

        let body = serde_json::to_value(GroupQueryRequest {
            group_by_field: "category",
            query: &query,
            partition: "default",
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "group_by_field": "category",
                "group_count": 3,
                "group_topk": 2,
                "vector": [0.5, 0.25],
                "sparse_vector": {"7": 1.0},
                "filter": "age > 1",
                "vector_field": "title",
                "partition": "default"
            })
        );
    }
}
