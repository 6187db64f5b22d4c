//! Error types for DashVector client operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using the client's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, issuing or decoding a request.
///
/// A non-zero `code` in a response envelope is *not* an error: the call
/// returns `Ok` and the caller inspects [`Response::code`](crate::Response).
#[derive(Debug, Error)]
pub enum Error {
    /// A required name or field was empty. Raised before any transport call.
    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    /// A write request had no admissible documents left after filtering.
    #[error("docs is empty")]
    EmptyBatch,

    /// A get or drop call was issued without any document ids.
    #[error("ids is empty")]
    EmptyIds,

    /// The response body was not valid JSON for the expected shape.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failure reported by the transport collaborator.
    #[error("transport error: {0}")]
    Transport(String),

    /// Client configuration is missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// A bounded readiness poll gave up before the resource was serving.
    #[error("resource not serving after {waited:?}")]
    Timeout { waited: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingRequiredField("collectionName");
        assert_eq!(err.to_string(), "collectionName is required");
        assert_eq!(Error::EmptyBatch.to_string(), "docs is empty");
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Decode(source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("decode error:"));
    }
}
