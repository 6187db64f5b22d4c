//! Collection creation options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::codec::{is_zero_usize, null_as_default};
use crate::types::{DataType, FieldType, Metric, QuantizeType};

/// Options for creating a collection.
///
/// Set `dimension` for a single implicit vector, or add named vector
/// schemas for multi-vector mode. Both are accepted; how they combine is
/// up to the server.
///
/// # Example
///
/// ```
/// use dashvector_core::{CollectionConfig, ExtraParams, FieldType, Metric, QuantizeType};
///
/// let config = CollectionConfig::new()
///     .with_dimension(4)
///     .with_metric(Metric::Euclidean)
///     .with_field_schema("name", FieldType::String)
///     .with_extra_params(ExtraParams::new().with_quantize_type(QuantizeType::Int8));
/// assert_eq!(config.dimension(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionConfig {
    #[serde(skip_serializing_if = "is_zero_usize")]
    dimension: usize,
    #[serde(rename = "dtype", skip_serializing_if = "DataType::is_unset")]
    data_type: DataType,
    #[serde(skip_serializing_if = "Metric::is_unset")]
    metric: Metric,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    fields_schema: HashMap<String, FieldType>,
    #[serde(skip_serializing_if = "ExtraParams::is_empty")]
    extra_params: ExtraParams,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    vectors_schema: HashMap<String, VectorSchema>,
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Declares one scalar field. Repeatable; merges into one schema.
    pub fn with_field_schema(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields_schema.insert(name.into(), field_type);
        self
    }

    /// Replaces the extra params.
    pub fn with_extra_params(mut self, extra_params: ExtraParams) -> Self {
        self.extra_params = extra_params;
        self
    }

    /// Declares one named vector. Repeatable; each name is configured
    /// independently.
    pub fn with_vector_schema(mut self, name: impl Into<String>, schema: VectorSchema) -> Self {
        self.vectors_schema.insert(name.into(), schema);
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn vectors_schema(&self) -> &HashMap<String, VectorSchema> {
        &self.vectors_schema
    }
}

/// Body of `POST /collections`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateCollectionRequest<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub config: &'a CollectionConfig,
}

/// Collection-wide extra parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtraParams {
    #[serde(skip_serializing_if = "QuantizeType::is_unset")]
    quantize_type: QuantizeType,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "bool_as_string")]
    auto_id: Option<bool>,
}

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantize_type(mut self, quantize_type: QuantizeType) -> Self {
        self.quantize_type = quantize_type;
        self
    }

    /// Whether the server generates ids for documents inserted without one.
    pub fn with_auto_id(mut self, auto_id: bool) -> Self {
        self.auto_id = Some(auto_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.quantize_type.is_unset() && self.auto_id.is_none()
    }
}

// The service takes `auto_id` as the string "true" / "false".
fn bool_as_string<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(flag) => serializer.serialize_str(if *flag { "true" } else { "false" }),
        None => serializer.serialize_none(),
    }
}

/// Schema of one named vector.
///
/// Sent when creating a collection and returned by `describe`, where any
/// missing member decodes as zero or unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSchema {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dimension: usize,
    #[serde(rename = "dtype", default, skip_serializing_if = "DataType::is_unset")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Metric::is_unset")]
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "QuantizeType::is_unset")]
    pub quantize_type: QuantizeType,
}

impl VectorSchema {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_quantize_type(mut self, quantize_type: QuantizeType) -> Self {
        self.quantize_type = quantize_type;
        self
    }
}
