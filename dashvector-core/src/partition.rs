//! Partition handle: document operations scoped to one partition.

use std::fmt;
use std::sync::Arc;

use url::form_urlencoded;

use crate::codec;
use crate::doc::Doc;
use crate::error::{Error, Result};
use crate::request::document::{DropRequest, WriteOp, WriteRequest};
use crate::request::group::GroupQueryRequest;
use crate::request::query::QueryRequest;
use crate::request::{GroupQuery, Query};
use crate::response::{GroupQueryResponse, QueryResponse, ReadResponse, WriteResponse};
use crate::transport::{exchange, Method, Transport};
use crate::validation::validate_group_by_field;

/// Name of the partition every collection has.
pub const DEFAULT_PARTITION: &str = "default";

/// Handle to one partition of a collection.
///
/// Obtained from [`Collection::partition`](crate::Collection::partition).
/// Immutable after construction and safe to share between threads.
pub struct Partition {
    collection: String,
    name: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("collection", &self.collection)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Partition {
    pub(crate) fn new(collection: &str, name: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            collection: collection.to_string(),
            name: name.to_string(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Inserts documents. Documents without any vector are skipped.
    pub fn insert<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.write(WriteOp::Insert, docs)
    }

    /// Updates documents by id. Documents without an id are skipped.
    pub fn update<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.write(WriteOp::Update, docs)
    }

    /// Inserts or updates. Documents with neither an id nor a vector are
    /// skipped.
    pub fn upsert<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.write(WriteOp::Upsert, docs)
    }

    fn write<I>(&self, op: WriteOp, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        let request = WriteRequest::build(op, &self.name, docs);
        if request.is_empty() {
            return Err(Error::EmptyBatch);
        }
        let body = codec::encode(&request)?;
        exchange(
            self.transport.as_ref(),
            op.method(),
            &op.path(&self.collection),
            Some(body),
        )
    }

    /// Fetches documents by id.
    pub fn get<I, S>(&self, ids: I) -> Result<ReadResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = collect_ids(ids)?;
        let partition: String = form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        let path = format!(
            "/collections/{}/docs?ids={}&partition={}",
            self.collection,
            ids.join(","),
            partition
        );
        exchange(self.transport.as_ref(), Method::Get, &path, None)
    }

    /// Deletes documents by id.
    pub fn drop_docs<I, S>(&self, ids: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = collect_ids(ids)?;
        let body = codec::encode(&DropRequest::ids(&self.name, ids))?;
        exchange(
            self.transport.as_ref(),
            Method::Delete,
            &self.docs_path(),
            Some(body),
        )
    }

    /// Deletes every document in the partition.
    pub fn drop_all(&self) -> Result<WriteResponse> {
        let body = codec::encode(&DropRequest::all(&self.name))?;
        exchange(
            self.transport.as_ref(),
            Method::Delete,
            &self.docs_path(),
            Some(body),
        )
    }

    pub fn query(&self, query: &Query) -> Result<QueryResponse> {
        let body = codec::encode(&QueryRequest {
            query,
            partition: &self.name,
        })?;
        exchange(
            self.transport.as_ref(),
            Method::Post,
            &format!("/collections/{}/query", self.collection),
            Some(body),
        )
    }

    /// Queries and groups results by the scalar field `group_by_field`.
    pub fn group_query(&self, group_by_field: &str, query: &GroupQuery) -> Result<GroupQueryResponse> {
        validate_group_by_field(group_by_field)?;
        let body = codec::encode(&GroupQueryRequest {
            group_by_field,
            query,
            partition: &self.name,
        })?;
        exchange(
            self.transport.as_ref(),
            Method::Post,
            &format!("/collections/{}/query_group_by", self.collection),
            Some(body),
        )
    }

    fn docs_path(&self) -> String {
        format!("/collections/{}/docs", self.collection)
    }
}

fn collect_ids<I, S>(ids: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: Vec<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
    if ids.is_empty() {
        return Err(Error::EmptyIds);
    }
    Ok(ids)
}
