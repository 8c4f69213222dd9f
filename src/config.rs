//! Explorer configuration.
//!
//! Defaults point at the SwiftUI view index published on GitHub. Every value
//! can be overridden through `DOCS_EXPLORER_*` environment variables (a `.env`
//! file is honoured) and then by command-line flags.

use std::time::Duration;

/// Default feed holding the documentation link index.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/mobiledge/mobiledge.github.io/master/search/swiftui-views.json";

/// Default prefix joined with each entry's relative path.
pub const DEFAULT_BASE_URL: &str = "https://developer.apple.com";

/// Timeout for the index request.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How records that lack a title or path are treated while building an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordPolicy {
    /// Skip the record and keep loading.
    #[default]
    Lenient,
    /// Fail the whole load on the first bad record.
    Strict,
}

impl RecordPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

/// Field names expected in the source payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLayout {
    /// Top-level field holding the record array.
    pub records_field: String,
    pub title_field: String,
    pub path_field: String,
}

impl Default for FeedLayout {
    fn default() -> Self {
        Self {
            records_field: "links".to_string(),
            title_field: "title".to_string(),
            path_field: "url".to_string(),
        }
    }
}

/// Configuration injected into [`crate::loader::DataLoader`].
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub source_url: String,
    pub base_url: String,
    pub request_timeout: Duration,
    /// `None` keeps a loaded index for the lifetime of the process.
    pub cache_ttl: Option<Duration>,
    pub record_policy: RecordPolicy,
    pub layout: FeedLayout,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: None,
            record_policy: RecordPolicy::Lenient,
            layout: FeedLayout::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(url) = dotenvy::var("DOCS_EXPLORER_SOURCE_URL") {
            cfg.source_url = url;
        }

        if let Ok(url) = dotenvy::var("DOCS_EXPLORER_BASE_URL") {
            cfg.base_url = url;
        }

        if let Ok(val) = dotenvy::var("DOCS_EXPLORER_TIMEOUT_SECS")
            && let Ok(secs) = val.parse()
        {
            cfg.request_timeout = Duration::from_secs(secs);
        }

        // 0 means "never expire"
        if let Ok(val) = dotenvy::var("DOCS_EXPLORER_CACHE_TTL_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            cfg.cache_ttl = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Ok(val) = dotenvy::var("DOCS_EXPLORER_RECORD_POLICY") {
            match RecordPolicy::parse(&val) {
                Some(policy) => cfg.record_policy = policy,
                None => tracing::warn!(value = %val, "ignoring unknown record policy"),
            }
        }

        if let Ok(field) = dotenvy::var("DOCS_EXPLORER_RECORDS_FIELD") {
            cfg.layout.records_field = field;
        }
        if let Ok(field) = dotenvy::var("DOCS_EXPLORER_TITLE_FIELD") {
            cfg.layout.title_field = field;
        }
        if let Ok(field) = dotenvy::var("DOCS_EXPLORER_PATH_FIELD") {
            cfg.layout.path_field = field;
        }

        cfg
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_record_policy(mut self, policy: RecordPolicy) -> Self {
        self.record_policy = policy;
        self
    }
}
