//! Similarity query options.

use std::collections::{BTreeMap, HashMap};

use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::codec::{is_false, is_none_or_empty, is_zero_f32, is_zero_u32, is_zero_usize};
use crate::sparse::SparseVector;

/// A similarity query.
///
/// Documents can be matched by a dense vector, by named vectors, by a
/// sparse vector or by the vector of an existing document id. The builder
/// does not enforce exclusivity; the server decides how they combine.
///
/// # Example
///
/// ```
/// use dashvector_core::{Query, VectorQuery};
///
/// let query = Query::new()
///     .with_vector(vec![0.1, 0.2, 0.3, 0.4])
///     .with_vector_param(VectorQuery::default().with_ef(1000))
///     .with_topk(10)
///     .with_filter("age > 18")
///     .with_include_vector(true);
/// assert_eq!(query.topk(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    #[serde(skip_serializing_if = "is_none_or_empty")]
    vector: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector_param: Option<VectorQuery>,
    #[serde(skip_serializing_if = "SparseVector::is_empty")]
    sparse_vector: SparseVector,
    #[serde(skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(skip_serializing_if = "is_zero_usize")]
    topk: usize,
    #[serde(skip_serializing_if = "is_false")]
    include_vector: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    filter: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    output_fields: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    vectors: HashMap<String, VectorQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rerank: Option<Rerank>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Tuning for the single implicit vector.
    pub fn with_vector_param(mut self, param: VectorQuery) -> Self {
        self.vector_param = Some(param);
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

    /// Queries by the vector of an existing document.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_topk(mut self, topk: usize) -> Self {
        self.topk = topk;
        self
    }

    pub fn with_include_vector(mut self, include_vector: bool) -> Self {
        self.include_vector = include_vector;
        self
    }

    /// Filter expression, passed to the server as-is.
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

    /// Queries one named vector with its own tuning. Repeatable per name.
    pub fn with_named_vector(mut self, name: impl Into<String>, query: VectorQuery) -> Self {
        self.vectors.insert(name.into(), query);
        self
    }

    /// Fuses multi-vector results with reciprocal rank fusion.
    pub fn with_rrf_ranker(mut self, rank_constant: u32) -> Self {
        self.rerank = Some(Rerank::Rrf { rank_constant });
        self
    }

    /// Fuses multi-vector results with per-vector weights.
    pub fn with_weighted_ranker<I, S>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        let weights = weights.into_iter().map(|(k, w)| (k.into(), w)).collect();
        self.rerank = Some(Rerank::Weighted { weights });
        self
    }

    pub fn topk(&self) -> usize {
        self.topk
    }

    pub fn rerank(&self) -> Option<&Rerank> {
        self.rerank.as_ref()
    }
}

/// Body of `POST /collections/{c}/query`.
#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    #[serde(flatten)]
    pub query: &'a Query,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub partition: &'a str,
}

/// Per-vector search tuning, optionally with the vector itself.
///
/// Used as `vector_param` for the implicit vector (where `vector` stays
/// empty) and as the value of each named vector in `vectors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VectorQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    vector: Vec<f32>,
    #[serde(skip_serializing_if = "is_zero_usize")]
    num_candidates: usize,
    #[serde(skip_serializing_if = "is_false")]
    is_linear: bool,
    #[serde(skip_serializing_if = "is_zero_usize")]
    ef: usize,
    #[serde(skip_serializing_if = "is_zero_f32")]
    radius: f32,
}

impl VectorQuery {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            vector,
            ..Self::default()
        }
    }

    pub fn with_num_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    /// Exact (brute force) search instead of the approximate index.
    pub fn with_linear(mut self, is_linear: bool) -> Self {
        self.is_linear = is_linear;
        self
    }

    pub fn with_ef(mut self, ef: usize) -> Self {
        self.ef = ef;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// Strategy for fusing results from several named vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum Rerank {
    Rrf { rank_constant: u32 },
    Weighted { weights: BTreeMap<String, f32> },
}

#[derive(Serialize)]
struct RankerBody<P> {
    ranker_name: &'static str,
    ranker_params: P,
}

#[derive(Serialize)]
struct RrfParams {
    #[serde(skip_serializing_if = "is_zero_u32")]
    rank_constant: u32,
}

#[derive(Serialize)]
struct WeightedParams {
    weights: String,
}

impl Serialize for Rerank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rerank::Rrf { rank_constant } => RankerBody {
                ranker_name: "rrf",
                ranker_params: RrfParams {
                    rank_constant: *rank_constant,
                },
            }
            .serialize(serializer),
            // The service expects the weight map as a JSON string value.
            Rerank::Weighted { weights } => {
                let weights = serde_json::to_string(weights).map_err(S::Error::custom)?;
                RankerBody {
                    ranker_name: "weighted",
                    ranker_params: WeightedParams { weights },
                }
                .serialize(serializer)
            }
        }
    }
}
