//! The transport seam.
//!
//! The client never talks HTTP itself. Every request is a verb, a path
//! below the service base URL and an optional JSON body; every reply is
//! the raw response body. [`HttpTransport`](crate::HttpTransport) is the
//! production implementation.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::codec;
use crate::error::Result;
use crate::response::Response;

/// HTTP verbs used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs one request/response exchange.
///
/// Implementations are shared by every handle of a client and must be
/// safe to call from several threads at once. Cancellation and deadlines
/// are the implementation's business.
pub trait Transport: Send + Sync {
    /// Sends `body` (already JSON-encoded) to `path` and returns the raw
    /// response body. Any failure to obtain a body is reported as
    /// [`Error::Transport`](crate::Error::Transport).
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;
}

/// Sends a request and decodes the response envelope.
pub(crate) fn exchange<T>(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: Option<Vec<u8>>,
) -> Result<Response<T>>
where
    Response<T>: DeserializeOwned,
{
    debug!(
        %method,
        path,
        body_len = body.as_ref().map_or(0, Vec::len),
        "dashvector request"
    );
    let bytes = transport.send(method, path, body)?;
    trace!(%method, path, response_len = bytes.len(), "dashvector response");
    codec::decode(&bytes)
}
