//! Client: collection management and the collection handle cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::codec;
use crate::collection::Collection;
#[cfg(feature = "http")]
use crate::config::ClientConfig;
use crate::error::Result;
#[cfg(feature = "http")]
use crate::http::HttpTransport;
use crate::poller::{Readiness, ReadinessPoller};
use crate::request::collection::CreateCollectionRequest;
use crate::request::CollectionConfig;
use crate::response::{Ack, CollectionDescResponse, CollectionMeta, CollectionStatsResponse, ListResponse};
use crate::transport::{exchange, Method, Transport};
use crate::types::Status;
use crate::validation::validate_collection_name;

/// Entry point for a DashVector cluster.
///
/// Cheap to share: every handle it hands out holds the same transport.
/// Collection handles are cached by name and never evicted.
///
/// # Example
///
/// ```no_run
/// use dashvector_core::{Client, ClientConfig, CollectionConfig, Metric};
///
/// fn main() -> dashvector_core::Result<()> {
///     let client = Client::connect(ClientConfig::from_env()?)?;
///     let config = CollectionConfig::new()
///         .with_dimension(4)
///         .with_metric(Metric::Cosine);
///     let ready = client.create_serving("quickstart", &config)?;
///     assert!(ready.is_serving());
///     Ok(())
/// }
/// ```
pub struct Client {
    transport: Arc<dyn Transport>,
    poller: ReadinessPoller,
    collections: Mutex<HashMap<String, Arc<Collection>>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("poller", &self.poller)
            .field("collections", &self.collections.lock().len())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            poller: ReadinessPoller::default(),
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the poller used by `create_serving` and by collections
    /// obtained afterwards. Chainable.
    pub fn with_poller(mut self, poller: ReadinessPoller) -> Self {
        self.poller = poller;
        self
    }

    /// Connects over HTTPS.
    #[cfg(feature = "http")]
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!(base_url = transport.base_url(), "dashvector client ready");
        Ok(Self::new(transport))
    }

    /// Connects using [`ClientConfig::from_env`].
    #[cfg(feature = "http")]
    pub fn from_env() -> Result<Self> {
        Self::connect(ClientConfig::from_env()?)
    }

    pub fn poller(&self) -> ReadinessPoller {
        self.poller
    }

    // -- collection management ------------------------------------------

    pub fn create(&self, name: &str, config: &CollectionConfig) -> Result<Ack> {
        validate_collection_name(name)?;
        let body = codec::encode(&CreateCollectionRequest { name, config })?;
        let resp: Ack = exchange(self.transport.as_ref(), Method::Post, "/collections", Some(body))?;
        if resp.is_success() {
            info!(collection = name, "collection created");
        }
        Ok(resp)
    }

    pub fn describe(&self, name: &str) -> Result<CollectionDescResponse> {
        validate_collection_name(name)?;
        exchange(
            self.transport.as_ref(),
            Method::Get,
            &format!("/collections/{name}"),
            None,
        )
    }

    pub fn list(&self) -> Result<ListResponse> {
        exchange(self.transport.as_ref(), Method::Get, "/collections", None)
    }

    pub fn stats(&self, name: &str) -> Result<CollectionStatsResponse> {
        validate_collection_name(name)?;
        exchange(
            self.transport.as_ref(),
            Method::Get,
            &format!("/collections/{name}/stats"),
            None,
        )
    }

    /// Deletes a collection on the server. A cached handle for it stays
    /// usable locally; its calls fail server-side.
    pub fn delete(&self, name: &str) -> Result<Ack> {
        validate_collection_name(name)?;
        let resp: Ack = exchange(
            self.transport.as_ref(),
            Method::Delete,
            &format!("/collections/{name}"),
            None,
        )?;
        if resp.is_success() {
            info!(collection = name, "collection deleted");
        }
        Ok(resp)
    }

    /// Creates a collection and blocks until it reports `SERVING`.
    pub fn create_serving(&self, name: &str, config: &CollectionConfig) -> Result<Readiness<CollectionMeta>> {
        self.poller.run(
            || self.create(name, config),
            || self.describe(name),
            |resp| resp.output.status == Status::Serving,
        )
    }

    // -- handles ---------------------------------------------------------

    /// Returns the handle for collection `name`, creating it on first use.
    ///
    /// This only builds a local handle; it does not contact the server.
    pub fn try_collection(&self, name: &str) -> Result<Arc<Collection>> {
        validate_collection_name(name)?;
        let mut collections = self.collections.lock();
        let collection = collections.entry(name.to_string()).or_insert_with(|| {
            Arc::new(Collection::new(name, Arc::clone(&self.transport), self.poller))
        });
        Ok(Arc::clone(collection))
    }

    /// Like [`try_collection`](Self::try_collection).
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn collection(&self, name: &str) -> Arc<Collection> {
        match self.try_collection(name) {
            Ok(collection) => collection,
            Err(err) => panic!("{err}"),
        }
    }
}
