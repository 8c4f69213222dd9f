use thiserror::Error;

/// Why a single record could not become a [`crate::model::DocEntry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{0}` is not a string")]
    WrongType(String),

    #[error("field `{0}` is empty")]
    EmptyField(String),
}

/// Errors that can occur while loading the documentation index.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse index payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected structure: payload has no `{field}` array")]
    Schema { field: String },

    #[error("Invalid record at position {position}: {reason}")]
    InvalidRecord {
        position: usize,
        #[source]
        reason: RecordIssue,
    },
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Source unreachable, timed out, or answered with a non-success status.
    Fetch,
    /// Body is not well-formed JSON.
    Parse,
    /// Payload lacks the expected record array.
    Schema,
    /// A record failed validation under the strict policy.
    InvalidRecord,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Client(_) | LoadError::Fetch { .. } | LoadError::Status { .. } => {
                LoadErrorKind::Fetch
            }
            LoadError::Parse(_) => LoadErrorKind::Parse,
            LoadError::Schema { .. } => LoadErrorKind::Schema,
            LoadError::InvalidRecord { .. } => LoadErrorKind::InvalidRecord,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            LoadError::Fetch { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Short message for end users; `Display` carries the diagnostic detail.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            LoadErrorKind::Fetch => "Could not retrieve documentation data, try again.",
            LoadErrorKind::Parse | LoadErrorKind::Schema | LoadErrorKind::InvalidRecord => {
                "No documentation data is available right now, try again."
            }
        }
    }
}
