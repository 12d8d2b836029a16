use thiserror::Error;

/// Longest slice of a raw response body kept on an error for diagnosis.
const MAX_PAYLOAD_CHARS: usize = 500;

/// Errors that can occur while searching bills.
///
/// Any error aborts the whole search; callers never receive a partially
/// enriched result list.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was rejected before any request was made
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// API returned a 4xx/5xx response
    #[error("HTTP error occurred: {status} - {message}")]
    Http { status: u16, message: String },

    /// No response: DNS failure, refused connection, TLS failure
    #[error("Connection error occurred: {0}")]
    Connection(#[source] reqwest::Error),

    /// Request or connect timeout elapsed
    #[error("Timeout error occurred: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Any other transport-level failure
    #[error("An unexpected request error occurred: {0}")]
    Request(#[source] reqwest::Error),

    /// A required key was missing from an otherwise valid JSON response
    #[error("Error parsing API response. Missing expected key: {key}")]
    MissingKey { key: &'static str, payload: String },

    /// The response body was not valid JSON (or not the expected shape)
    #[error("Error parsing API response: {source}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
        payload: String,
    },

    /// Valid JSON with a structure the client cannot interpret
    #[error("An unknown error occurred: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        // connect timeouts report both; they are timeouts to the user
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connection(err)
        } else {
            Self::Request(err)
        }
    }
}

impl SearchError {
    /// HTTP status code, for `Http` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 and 403 responses.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }

    /// Truncated raw body attached to parse errors.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::MissingKey { payload, .. } | Self::InvalidBody { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Advice shown to the user alongside the error, if any applies.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Http { .. } if self.is_auth() => {
                Some("Please check if your OpenStates API key is correct and valid.")
            }
            Self::Connection(_) => Some("Please check your internet connection."),
            Self::Timeout(_) => Some("The API server took too long to respond."),
            _ => None,
        }
    }

    /// Emit this error (and its hint) as tracing events.
    pub fn log(&self) {
        match self {
            Self::Http { status, .. } => {
                tracing::error!(status = *status, "{self}");
            }
            Self::MissingKey { key, payload } => {
                tracing::error!(key = %key, "{self}");
                tracing::error!(payload = %payload, "Partial data for debugging");
            }
            Self::InvalidBody { payload, .. } => {
                tracing::error!("{self}");
                tracing::error!(payload = %payload, "Partial data for debugging");
            }
            _ => tracing::error!("{self}"),
        }

        if let Some(hint) = self.hint() {
            tracing::warn!("{hint}");
        }
    }
}

/// Keep at most [`MAX_PAYLOAD_CHARS`] characters of a response body.
pub(crate) fn truncate_payload(body: &str) -> String {
    match body.char_indices().nth(MAX_PAYLOAD_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
