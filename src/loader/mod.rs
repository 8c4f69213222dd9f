//! Documentation index loader.
//!
//! [`DataLoader`] fetches the index feed over HTTP, validates it, and keeps
//! the result in an owned [`IndexCache`]:
//!
//! - **Bounded fetch**: every request carries the configured timeout; a
//!   timeout is reported like any other transport failure.
//! - **Single flight**: concurrent `load()` calls wait for one fetch and share
//!   its result.
//! - **No negative caching**: a failed load leaves the cache untouched, so the
//!   next call tries the source again.
//!
//! ```rust,ignore
//! use docs_explorer::config::ExplorerConfig;
//! use docs_explorer::loader::DataLoader;
//! use docs_explorer::search::filter;
//!
//! let loader = DataLoader::new(ExplorerConfig::from_env())?;
//! let index = loader.load().await?;
//! for link in filter(&index, "text").links() {
//!     println!("{}", link.to_markdown());
//! }
//! ```

pub mod cache;
pub mod error;
pub mod parse;

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tracing::{debug, info, warn};

pub use cache::{CacheKey, CacheState, IndexCache};
pub use error::{LoadError, LoadErrorKind, RecordIssue};

use crate::config::ExplorerConfig;
use crate::model::DocIndex;

pub struct DataLoader {
    config: ExplorerConfig,
    client: Client,
    cache: IndexCache,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for DataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DataLoader {
    /// Create a loader with an empty cache.
    pub fn new(config: ExplorerConfig) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("docs-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self {
            cache: IndexCache::new(config.cache_ttl),
            config,
            client,
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.config.source_url, &self.config.base_url)
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state(&self.cache_key())
    }

    /// The cached index if it is still inside its window. Never fetches.
    pub fn cached(&self) -> Option<Arc<DocIndex>> {
        self.cache.get(&self.cache_key())
    }

    /// Forget the cached index so the next [`load`](Self::load) fetches.
    pub fn invalidate(&self) -> bool {
        let dropped = self.cache.invalidate();
        debug!(dropped, "index cache invalidated");
        dropped
    }

    /// Return the cached index, fetching it first if the cache is empty or stale.
    pub async fn load(&self) -> Result<Arc<DocIndex>, LoadError> {
        let key = self.cache_key();
        if let Some(index) = self.cache.get(&key) {
            debug!(entries = index.len(), "index cache hit");
            return Ok(index);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have published while we waited.
        if let Some(index) = self.cache.get(&key) {
            debug!(entries = index.len(), "index published by concurrent load");
            return Ok(index);
        }

        let state = self.cache.state(&key);
        info!(url = %self.config.source_url, ?state, "index_fetch_start");
        let started = Instant::now();

        match self.fetch().await {
            Ok(index) => {
                info!(
                    url = %self.config.source_url,
                    entries = index.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "index_loaded"
                );
                Ok(self.cache.publish(key, index))
            }
            Err(err) => {
                warn!(
                    url = %self.config.source_url,
                    kind = ?err.kind(),
                    timeout = err.is_timeout(),
                    error = %err,
                    "index_load_failed"
                );
                Err(err)
            }
        }
    }

    /// Drop the cached index and load a fresh one.
    pub async fn refresh(&self) -> Result<Arc<DocIndex>, LoadError> {
        self.invalidate();
        self.load().await
    }

    async fn fetch(&self) -> Result<DocIndex, LoadError> {
        let url = &self.config.source_url;

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| LoadError::Fetch {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| LoadError::Fetch {
            url: url.clone(),
            source,
        })?;

        let payload = parse::parse_payload(&body)?;
        parse::build_index(
            &payload,
            &self.config.layout,
            self.config.record_policy,
            url,
            &self.config.base_url,
        )
    }
}
