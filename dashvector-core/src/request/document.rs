//! Document write and delete requests.

use serde::Serialize;
use tracing::warn;

use crate::codec::is_false;
use crate::doc::Doc;
use crate::transport::Method;
use crate::validation::{is_insertable, is_updatable};

/// The three document write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Upsert,
}

impl WriteOp {
    /// Admission rule applied to each document before it joins a batch.
    ///
    /// - insert: needs a dense vector or a non-empty named vector
    /// - update: needs a non-empty id
    /// - upsert: either of the above
    pub fn admits(self, doc: &Doc) -> bool {
        match self {
            WriteOp::Insert => is_insertable(doc),
            WriteOp::Update => is_updatable(doc),
            WriteOp::Upsert => is_updatable(doc) || is_insertable(doc),
        }
    }

    pub(crate) fn method(self) -> Method {
        match self {
            WriteOp::Insert | WriteOp::Upsert => Method::Post,
            WriteOp::Update => Method::Put,
        }
    }

    pub(crate) fn path(self, collection: &str) -> String {
        match self {
            WriteOp::Insert | WriteOp::Update => format!("/collections/{collection}/docs"),
            WriteOp::Upsert => format!("/collections/{collection}/docs/upsert"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WriteOp::Insert => "insert",
            WriteOp::Update => "update",
            WriteOp::Upsert => "upsert",
        }
    }
}

/// Body of a document write.
///
/// Documents the operation does not admit are dropped silently while the
/// batch is built; no error is raised for an individual document. The
/// caller sees [`Error::EmptyBatch`](crate::Error::EmptyBatch) only when
/// nothing is left. `docs` is always encoded, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteRequest {
    docs: Vec<Doc>,
    #[serde(skip_serializing_if = "String::is_empty")]
    partition: String,
}

impl WriteRequest {
    pub fn build<I>(op: WriteOp, partition: &str, docs: I) -> Self
    where
        I: IntoIterator<Item = Doc>,
    {
        let mut dropped = 0usize;
        let docs: Vec<Doc> = docs
            .into_iter()
            .filter(|doc| {
                let admitted = op.admits(doc);
                if !admitted {
                    dropped += 1;
                }
                admitted
            })
            .collect();

        if dropped > 0 {
            warn!(op = op.as_str(), dropped, kept = docs.len(), "dropped inadmissible documents");
        }

        Self {
            docs,
            partition: partition.to_string(),
        }
    }

    pub fn docs(&self) -> &[Doc] {
        &self.docs
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Body of `DELETE /collections/{c}/docs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropRequest {
    ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    partition: String,
    #[serde(skip_serializing_if = "is_false")]
    delete_all: bool,
}

impl DropRequest {
    pub fn ids(partition: &str, ids: Vec<String>) -> Self {
        Self {
            ids,
            partition: partition.to_string(),
            delete_all: false,
        }
    }

    pub fn all(partition: &str) -> Self {
        Self {
            ids: Vec::new(),
            partition: partition.to_string(),
            delete_all: true,
        }
    }
}
