//! Data types for OpenStates API requests and responses.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::SearchError;

/// Jurisdiction searched when the caller does not name one (Georgia).
pub const DEFAULT_JURISDICTION: &str = "ga";

/// Legislative session searched when the caller does not name one.
pub const DEFAULT_SESSION: &str = "current";

/// Page size and detail-fetch cap used when the caller does not set one.
pub const DEFAULT_LIMIT: NonZeroU32 = NonZeroU32::MIN.saturating_add(19);

const NOT_AVAILABLE: &str = "N/A";
const NO_RECENT_ACTION: &str = "No recent action found.";
const NO_DESCRIPTION: &str = "No description.";
const NO_ABSTRACT: &str = "No abstract available.";
const NO_URL: &str = "No URL available.";

/// Parameters for a single bill search.
///
/// The keyword is trimmed and must not be empty. Jurisdictions are matched
/// case-insensitively by the API, so they are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    jurisdiction: String,
    session: String,
    limit: NonZeroU32,
}

impl SearchQuery {
    /// Create a query for `keyword` with the default jurisdiction, session and limit.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if the keyword is empty or whitespace.
    pub fn new(keyword: impl AsRef<str>) -> Result<Self, SearchError> {
        let keyword = keyword.as_ref().trim();
        if keyword.is_empty() {
            return Err(SearchError::InvalidQuery(
                "keyword cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            keyword: keyword.to_string(),
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            session: DEFAULT_SESSION.to_string(),
            limit: DEFAULT_LIMIT,
        })
    }

    /// Restrict the search to a jurisdiction. A blank value keeps the current one.
    #[must_use]
    pub fn with_jurisdiction(mut self, jurisdiction: impl AsRef<str>) -> Self {
        let jurisdiction = jurisdiction.as_ref().trim();
        if !jurisdiction.is_empty() {
            self.jurisdiction = jurisdiction.to_lowercase();
        }
        self
    }

    /// Restrict the search to a legislative session (e.g. "2023-2024").
    #[must_use]
    pub fn with_session(mut self, session: impl AsRef<str>) -> Self {
        let session = session.as_ref().trim();
        if !session.is_empty() {
            self.session = session.to_string();
        }
        self
    }

    /// Cap the page size and the number of detail fetches.
    #[must_use]
    pub const fn with_limit(mut self, limit: NonZeroU32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    #[must_use]
    pub fn session(&self) -> &str {
        &self.session
    }

    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }
}

/// A bill formatted for display, built from one detail response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillSummary {
    /// Chamber-local identifier (e.g., "HB 123")
    pub identifier: String,
    pub title: String,
    /// Description of the latest action
    pub status: String,
    /// Comma-separated subject names
    pub subjects: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub openstates_url: String,
    /// Item category (e.g., "bill", "resolution")
    pub classification: String,
}

/// Detail payload from `GET /bills/{id}`.
///
/// Every field is optional; absent and `null` values both fall back to the
/// defaults applied in the `BillSummary` conversion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillDetail {
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub actions: Option<Vec<BillAction>>,
    pub subjects: Option<Vec<Subject>>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub openstates_url: Option<String>,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillAction {
    pub description: Option<String>,
}

/// A subject tag, either `{"name": ...}` or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Bare(String),
    Named { name: Option<String> },
}

impl Subject {
    fn into_name(self) -> Option<String> {
        match self {
            Self::Bare(name) => Some(name),
            Self::Named { name } => name,
        }
    }
}

/// The live API returns an array of classifications; older payloads a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Classification {
    One(String),
    Many(Vec<String>),
}

impl From<BillDetail> for BillSummary {
    fn from(detail: BillDetail) -> Self {
        let BillDetail {
            identifier,
            title,
            actions,
            subjects,
            abstract_text,
            openstates_url,
            classification,
        } = detail;

        let status = match actions.unwrap_or_default().pop() {
            Some(action) => action
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            None => NO_RECENT_ACTION.to_string(),
        };

        let subject_names: Vec<String> = subjects
            .unwrap_or_default()
            .into_iter()
            .filter_map(Subject::into_name)
            .filter(|name| !name.is_empty())
            .collect();
        let subjects = if subject_names.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            subject_names.join(", ")
        };

        let classification = match classification {
            Some(Classification::One(value)) => value,
            Some(Classification::Many(values)) if !values.is_empty() => values.join(", "),
            _ => NOT_AVAILABLE.to_string(),
        };

        Self {
            identifier: identifier.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status,
            subjects,
            abstract_text: abstract_text.unwrap_or_else(|| NO_ABSTRACT.to_string()),
            openstates_url: openstates_url.unwrap_or_else(|| NO_URL.to_string()),
            classification,
        }
    }
}
