//! Collection handle: partition management plus document operations on
//! the default partition.
//!
//! A `Collection` owns a name-keyed cache of [`Partition`] handles. The
//! cache only grows: asking for the same partition twice returns the same
//! `Arc`, and concurrent first requests for a name construct it once.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::codec;
use crate::doc::Doc;
use crate::error::Result;
use crate::partition::{Partition, DEFAULT_PARTITION};
use crate::poller::{Readiness, ReadinessPoller};
use crate::request::{GroupQuery, Query};
use crate::response::{
    Ack, GroupQueryResponse, ListResponse, PartitionDescResponse, PartitionStatsResponse,
    QueryResponse, ReadResponse, WriteResponse,
};
use crate::transport::{exchange, Method, Transport};
use crate::types::Status;
use crate::validation::validate_partition_name;

/// Body of `POST /collections/{c}/partitions`.
#[derive(serde::Serialize)]
struct CreatePartitionRequest<'a> {
    name: &'a str,
}

/// Handle to one collection.
///
/// # Example
///
/// ```no_run
/// use dashvector_core::{Client, ClientConfig, Doc};
///
/// fn main() -> dashvector_core::Result<()> {
///     let client = Client::connect(ClientConfig::from_env()?)?;
///     let collection = client.collection("quickstart");
///
///     collection.create_partition_serving("shard-1")?;
///     let shard = collection.partition("shard-1");
///     shard.insert([Doc::new().with_vector(vec![0.1, 0.2, 0.3, 0.4])])?;
///     Ok(())
/// }
/// ```
pub struct Collection {
    name: String,
    transport: Arc<dyn Transport>,
    poller: ReadinessPoller,
    partitions: Mutex<HashMap<String, Arc<Partition>>>,
    default_partition: Arc<Partition>,
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("partitions", &self.partitions.lock().len())
            .finish_non_exhaustive()
    }
}

impl Collection {
    pub(crate) fn new(name: &str, transport: Arc<dyn Transport>, poller: ReadinessPoller) -> Self {
        let default_partition = Arc::new(Partition::new(
            name,
            DEFAULT_PARTITION,
            Arc::clone(&transport),
        ));
        let mut partitions = HashMap::new();
        partitions.insert(DEFAULT_PARTITION.to_string(), Arc::clone(&default_partition));

        Self {
            name: name.to_string(),
            transport,
            poller,
            partitions: Mutex::new(partitions),
            default_partition,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the handle for partition `name`, creating it on first use.
    ///
    /// An empty name resolves to the default partition. This only builds
    /// a local handle; it does not create the partition on the server.
    pub fn partition(&self, name: &str) -> Arc<Partition> {
        let name = if name.is_empty() { DEFAULT_PARTITION } else { name };
        let mut partitions = self.partitions.lock();
        Arc::clone(partitions.entry(name.to_string()).or_insert_with(|| {
            Arc::new(Partition::new(&self.name, name, Arc::clone(&self.transport)))
        }))
    }

    pub fn default_partition(&self) -> Arc<Partition> {
        Arc::clone(&self.default_partition)
    }

    // -- partition management -------------------------------------------

    pub fn create_partition(&self, name: &str) -> Result<Ack> {
        validate_partition_name(name)?;
        let body = codec::encode(&CreatePartitionRequest { name })?;
        exchange(
            self.transport.as_ref(),
            Method::Post,
            &format!("/collections/{}/partitions", self.name),
            Some(body),
        )
    }

    pub fn describe_partition(&self, name: &str) -> Result<PartitionDescResponse> {
        validate_partition_name(name)?;
        exchange(self.transport.as_ref(), Method::Get, &self.partition_path(name), None)
    }

    pub fn list_partitions(&self) -> Result<ListResponse> {
        exchange(
            self.transport.as_ref(),
            Method::Get,
            &format!("/collections/{}/partitions", self.name),
            None,
        )
    }

    pub fn partition_stats(&self, name: &str) -> Result<PartitionStatsResponse> {
        validate_partition_name(name)?;
        exchange(
            self.transport.as_ref(),
            Method::Get,
            &format!("{}/stats", self.partition_path(name)),
            None,
        )
    }

    pub fn delete_partition(&self, name: &str) -> Result<Ack> {
        validate_partition_name(name)?;
        exchange(self.transport.as_ref(), Method::Delete, &self.partition_path(name), None)
    }

    /// Creates a partition and blocks until it reports `SERVING`.
    pub fn create_partition_serving(&self, name: &str) -> Result<Readiness<Status>> {
        self.poller.run(
            || self.create_partition(name),
            || self.describe_partition(name),
            |resp| resp.output == Status::Serving,
        )
    }

    fn partition_path(&self, name: &str) -> String {
        format!("/collections/{}/partitions/{}", self.name, name)
    }

    // -- document operations on the default partition -------------------

    pub fn insert<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.default_partition.insert(docs)
    }

    pub fn update<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.default_partition.update(docs)
    }

    pub fn upsert<I>(&self, docs: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = Doc>,
    {
        self.default_partition.upsert(docs)
    }

    pub fn get<I, S>(&self, ids: I) -> Result<ReadResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_partition.get(ids)
    }

    pub fn drop_docs<I, S>(&self, ids: I) -> Result<WriteResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_partition.drop_docs(ids)
    }

    pub fn drop_all(&self) -> Result<WriteResponse> {
        self.default_partition.drop_all()
    }

    pub fn query(&self, query: &Query) -> Result<QueryResponse> {
        self.default_partition.query(query)
    }

    pub fn group_query(&self, group_by_field: &str, query: &GroupQuery) -> Result<GroupQueryResponse> {
        self.default_partition.group_query(group_by_field, query)
    }
}
