//! # DashVector
//!
//! **A blocking Rust client for the DashVector vector search service.**
//!
//! DashVector stores documents (a dense vector, optional named and sparse
//! vectors, and scalar fields) in collections split into partitions. This
//! crate covers the whole resource tree:
//!
//! | Resource | Operations |
//! |----------|------------|
//! | **Collection** | create, describe, list, stats, delete, create-and-wait |
//! | **Partition** | create, describe, list, stats, delete, create-and-wait |
//! | **Document** | insert, update, upsert, get, drop, drop all |
//! | **Search** | query (dense, sparse, multi-vector with rerank), grouped query |
//!
//! ## Quick Start
//!
//! ```no_run
//! use dashvector::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Reads DASHVECTOR_ENDPOINT and DASHVECTOR_API_KEY
//!     let client = Client::from_env()?;
//!
//!     let config = CollectionConfig::new()
//!         .with_dimension(4)
//!         .with_metric(Metric::Cosine);
//!     client.create_serving("quickstart", &config)?;
//!
//!     let collection = client.collection("quickstart");
//!     collection.insert([Doc::new()
//!         .with_id("1")
//!         .with_vector(vec![0.1, 0.2, 0.3, 0.4])
//!         .with_field("title", "hello")])?;
//!
//!     let hits = collection.query(&Query::new().with_vector(vec![0.1, 0.2, 0.3, 0.4]).with_topk(3))?;
//!     for doc in &hits.output {
//!         println!("{} {}", doc.id, doc.score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Partitions
//!
//! Every collection has a partition named `default`; the document methods
//! on [`Collection`] act on it. Other partitions are reached through
//! [`Collection::partition`]:
//!
//! ```no_run
//! use dashvector::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let client = Client::from_env()?;
//!     let collection = client.collection("quickstart");
//!     collection.create_partition_serving("2024")?;
//!     collection.partition("2024").upsert([Doc::new().with_id("7").with_vector(vec![0.5; 4])])?;
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `http` (default) | Enables `HttpTransport`, `Client::connect` and `Client::from_env` |
//!
//! Without `http`, supply your own [`Transport`] to [`Client::new`].
//!
//! ## Error Handling
//!
//! Calls return [`Result<T>`](crate::Result). An `Err` means the request
//! never produced a decodable response (validation, transport, decode,
//! poll timeout). A server-side refusal is an `Ok` [`Response`] with a
//! non-zero `code`.
//!
//! ## Thread Safety
//!
//! [`Client`], [`Collection`] and [`Partition`] are `Send + Sync`. Handles
//! are cached by name and handed out as `Arc`s.

// Re-export everything from core
pub use dashvector_core::*;

pub use serde_json;
