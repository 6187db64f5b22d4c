//! # DashVector Core
//!
//! Blocking client for the DashVector vector search service.
//!
//! The crate models three resources: a [`Client`] manages collections, a
//! [`Collection`] manages partitions and runs document operations on its
//! default partition, and a [`Partition`] runs document operations
//! (insert, update, upsert, get, drop, query, grouped query) scoped to
//! itself. Every call is one JSON request and returns the decoded
//! [`Response`] envelope.
//!
//! ## Crate Features
//!
//! - `http` (default) - Enables [`HttpTransport`] and [`Client::connect`]
//!
//! ## Core Types
//!
//! ### Handles
//!
//! - [`Client`] - Collection management and the collection handle cache
//! - [`Collection`] - Partition management and the partition handle cache
//! - [`Partition`] - Document operations
//!
//! ### Requests
//!
//! - [`CollectionConfig`] - Collection schema
//! - [`Doc`] - Document sent and received
//! - [`Query`] / [`GroupQuery`] - Similarity search
//!
//! ### Plumbing
//!
//! - [`Transport`] - One request/response exchange
//! - [`ReadinessPoller`] - "Create and wait until serving"

pub mod client;
pub mod codec;
pub mod collection;
pub mod config;
pub mod doc;
pub mod error;
pub mod fields;
#[cfg(feature = "http")]
pub mod http;
pub mod partition;
pub mod poller;
pub mod request;
pub mod response;
pub mod sparse;
pub mod transport;
pub mod types;
pub mod validation;

// Re-exports for convenient access
pub use client::Client;
pub use codec::NoOutput;
pub use collection::Collection;
pub use config::ClientConfig;
pub use doc::{Doc, VectorKind};
pub use error::{Error, Result};
pub use fields::Fields;
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use partition::{Partition, DEFAULT_PARTITION};
pub use poller::{PollState, Readiness, ReadinessPoller, DEFAULT_POLL_INTERVAL};
pub use request::{
    CollectionConfig, DropRequest, ExtraParams, GroupQuery, Query, Rerank, VectorQuery,
    VectorSchema, WriteOp, WriteRequest,
};
pub use response::{
    Ack, CollectionDescResponse, CollectionMeta, CollectionStats, CollectionStatsResponse,
    DocOpResult, Group, GroupQueryResponse, ListResponse, PartitionDescResponse, PartitionStats,
    PartitionStatsResponse, QueryResponse, ReadResponse, Response, Usage, WriteResponse,
};
pub use sparse::SparseVector;
pub use transport::{Method, Transport};
pub use types::{DataType, DocOp, FieldType, Metric, QuantizeType, Status};

/// Re-export commonly used types for convenience.
///
/// # Example
///
/// ```rust
/// use dashvector_core::prelude::*;
///
/// let doc = Doc::new()
///     .with_id("1")
///     .with_vector(vec![0.5, 0.25])
///     .with_field("title", "hello");
/// let query = Query::new().with_vector(vec![0.5, 0.25]).with_topk(5);
/// assert_eq!(query.topk(), 5);
/// assert!(doc.fields.contains_key("title"));
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Collection, CollectionConfig, Doc, Error, Fields, GroupQuery,
        Metric, Partition, Query, Response, Result, SparseVector, Status, Transport,
    };
}
