//! Request builders.
//!
//! Each builder is populated by chained `with_*` calls applied left to
//! right: a later call overwrites an earlier one touching the same field,
//! while repeatable options (field schemas, named vectors, sparse entries)
//! merge into one map. Building never fails; emptiness and validity are
//! checked when the request is issued.

pub mod collection;
pub mod document;
pub mod group;
pub mod query;

pub use collection::{CollectionConfig, ExtraParams, VectorSchema};
pub use document::{DropRequest, WriteOp, WriteRequest};
pub use group::GroupQuery;
pub use query::{Query, Rerank, VectorQuery};
