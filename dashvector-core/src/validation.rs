//! Pre-flight checks run before a request is built or sent.

use crate::doc::Doc;
use crate::error::{Error, Result};

/// Fails with [`Error::MissingRequiredField`] when `value` is empty.
///
/// No trimming or case folding is applied: `" "` is a valid name.
pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingRequiredField(field));
    }
    Ok(())
}

pub fn validate_collection_name(name: &str) -> Result<()> {
    validate_name("collectionName", name)
}

pub fn validate_partition_name(name: &str) -> Result<()> {
    validate_name("partitionName", name)
}

pub fn validate_group_by_field(field: &str) -> Result<()> {
    validate_name("group_by_field", field)
}

/// A document can be inserted when it carries a dense vector or at least
/// one non-empty named vector.
pub fn is_insertable(doc: &Doc) -> bool {
    if doc.vector.as_ref().is_some_and(|v| !v.is_empty()) {
        return true;
    }
    doc.vectors
        .as_ref()
        .is_some_and(|named| named.iter().any(|(name, v)| !name.is_empty() && !v.is_empty()))
}

/// A document can be updated when it names an existing id.
pub fn is_updatable(doc: &Doc) -> bool {
    !doc.id.is_empty()
}
