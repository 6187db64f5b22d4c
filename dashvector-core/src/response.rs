//! Response envelope and typed outputs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::codec::{lenient_f64, lenient_i64, lenient_string, null_as_default, NoOutput};
use crate::doc::Doc;
use crate::request::VectorSchema;
use crate::types::{DataType, DocOp, FieldType, Metric, Status};

/// Envelope wrapping every response.
///
/// `code == 0` means success. A non-zero code is reported here rather
/// than as an [`Error`](crate::Error): the request reached the server and
/// the server refused it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Response<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub request_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: T,
    /// `None` when the server reported no usage at all, which is not the
    /// same as usage of zero units.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Envelope of calls without output (create, delete).
pub type Ack = Response<NoOutput>;

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Drops the output, keeping the envelope.
    pub fn ack(&self) -> Ack {
        Response {
            code: self.code,
            message: self.message.clone(),
            request_id: self.request_id.clone(),
            output: NoOutput,
            usage: self.usage,
        }
    }
}

/// Units consumed by a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub read_units: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub write_units: i64,
}

/// Output of `describe` for a collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dimension: usize,
    #[serde(rename = "dtype", default)]
    pub data_type: DataType,
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields_schema: HashMap<String, FieldType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vectors_schema: HashMap<String, VectorSchema>,
    /// Status of each partition, by name.
    #[serde(rename = "partitions", default, deserialize_with = "null_as_default")]
    pub partition_status: HashMap<String, Status>,
}

/// Output of `stats` for a collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CollectionStats {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_doc_count: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub index_completeness: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub partitions: HashMap<String, PartitionStats>,
}

/// Output of `stats` for a partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PartitionStats {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_doc_count: i64,
}

/// Per-document result of a write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocOpResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default)]
    pub doc_op: DocOp,
}

/// Documents sharing one value of the group-by field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Group {
    #[serde(default, deserialize_with = "lenient_string")]
    pub group_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub docs: Vec<Doc>,
}

pub type CollectionDescResponse = Response<CollectionMeta>;
pub type CollectionStatsResponse = Response<CollectionStats>;
pub type ListResponse = Response<Vec<String>>;
pub type PartitionDescResponse = Response<Status>;
pub type PartitionStatsResponse = Response<PartitionStats>;
pub type WriteResponse = Response<Vec<DocOpResult>>;
pub type ReadResponse = Response<HashMap<String, Doc>>;
pub type QueryResponse = Response<Vec<Doc>>;
pub type GroupQueryResponse = Response<Vec<Group>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::types::QuantizeType;

    #[test]
    fn test_ack_decodes_envelope() {
        let ack: Ack =
            decode(br#"{"code":0,"message":"","request_id":"r-1","output":null}"#).unwrap();
        assert!(ack.is_success());
        assert_eq!(ack.request_id, "r-1");
        assert!(ack.usage.is_none());
    }

    #[test]
    fn test_non_zero_code_is_not_an_error() {
        let ack: Ack = decode(br#"{"code":-2021,"message":"collection exists"}"#).unwrap();
        assert!(!ack.is_success());
        assert_eq!(ack.message, "collection exists");
    }

    #[test]
    fn test_usage_absent_vs_zero() {
        let absent: WriteResponse = decode(br#"{"code":0,"output":[]}"#).unwrap();
        assert_eq!(absent.usage, None);

        let zero: WriteResponse =
            decode(br#"{"code":0,"output":[],"usage":{"write_units":0}}"#).unwrap();
        assert_eq!(zero.usage, Some(Usage::default()));
    }

    #[test]
    fn test_collection_meta() {
        let resp: CollectionDescResponse = decode(
            br#"{
                "code": 0, "message": "", "request_id": "r",
                "output": {
                    "name": "c1", "dimension": 4, "dtype": "FLOAT", "metric": "euclidean",
                    "status": "SERVING",
                    "fields_schema": {"name": "STRING", "age": "INT"},
                    "vectors_schema": {
                        "proxima_vector": {"dimension": 4, "dtype": "FLOAT",
                            "metric": "euclidean", "quantize_type": "DT_VECTOR_INT8"}
                    },
                    "partitions": {"default": "SERVING"}
                }
            }"#,
        )
        .unwrap();

        let meta = resp.output;
        assert_eq!(meta.name, "c1");
        assert_eq!(meta.dimension, 4);
        assert_eq!(meta.data_type, DataType::Float);
        assert_eq!(meta.status, Status::Serving);
        assert_eq!(meta.fields_schema["age"], FieldType::Int);
        let schema = &meta.vectors_schema["proxima_vector"];
        assert_eq!(schema.metric, Metric::Euclidean);
        assert_eq!(schema.quantize_type, QuantizeType::Int8);
        assert_eq!(meta.partition_status["default"], Status::Serving);
    }

    #[test]
    fn test_collection_meta_missing_members() {
        let resp: CollectionDescResponse =
            decode(br#"{"code":0,"output":{"name":"c","vectors_schema":{"v":{}}}}"#).unwrap();
        assert_eq!(resp.output.dimension, 0);
        assert!(resp.output.status.is_unset());
        assert_eq!(resp.output.vectors_schema["v"], VectorSchema::default());
    }

    #[test]
    fn test_stats_accept_string_counts() {
        let resp: CollectionStatsResponse = decode(
            br#"{"code":0,"output":{"total_doc_count":"3","index_completeness":1.0,
                "partitions":{"default":{"total_doc_count":"3"}}}}"#,
        )
        .unwrap();
        assert_eq!(resp.output.total_doc_count, 3);
        assert_eq!(resp.output.index_completeness, 1.0);
        assert_eq!(resp.output.partitions["default"].total_doc_count, 3);
    }

    #[test]
    fn test_partition_desc_is_bare_status() {
        let resp: PartitionDescResponse = decode(br#"{"code":0,"output":"SERVING"}"#).unwrap();
        assert_eq!(resp.output, Status::Serving);
    }

    #[test]
    fn test_write_and_group_outputs() {
        let write: WriteResponse = decode(
            br#"{"code":0,"output":[{"id":"a","code":0,"message":"","doc_op":"insert"}],
                "usage":{"write_units":1}}"#,
        )
        .unwrap();
        assert_eq!(write.output[0].doc_op, DocOp::Insert);
        assert_eq!(write.usage.map(|u| u.write_units), Some(1));

        let groups: GroupQueryResponse = decode(
            br#"{"code":0,"output":[{"group_id":"red","docs":[{"id":"1","score":0.5}]},
                {"group_id":7,"docs":null}]}"#,
        )
        .unwrap();
        assert_eq!(groups.output[0].group_id, "red");
        assert_eq!(groups.output[0].docs[0].score, 0.5);
        assert_eq!(groups.output[1].group_id, "7");
        assert!(groups.output[1].docs.is_empty());
    }
}
