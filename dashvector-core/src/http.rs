//! Blocking HTTP transport built on `reqwest`.

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::transport::{Method, Transport};

const HEADER_AUTH_TOKEN: &str = "dashvector-auth-token";

/// Sends requests to `https://{endpoint}/v1` with the API key header.
///
/// Non-2xx replies that still carry a body are returned as-is so that the
/// envelope's code and message reach the caller; only a failed exchange
/// or an empty error reply becomes [`Error::Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&config.api_key)
            .map_err(|e| Error::Config(format!("invalid api key: {e}")))?;
        headers.insert(HEADER_AUTH_TOKEN, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Transport(format!("build http client failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.into(), &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .map_err(|e| Error::Transport(format!("{method} {path} failed: {e}")))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| Error::Transport(format!("{method} {path} read body failed: {e}")))?;

        if !status.is_success() {
            if bytes.is_empty() {
                return Err(Error::Transport(format!("{method} {path} returned {status}")));
            }
            warn!(%method, path, %status, "dashvector http error status");
        }
        Ok(bytes.to_vec())
    }
}
