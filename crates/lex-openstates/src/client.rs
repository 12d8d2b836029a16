use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::error::truncate_payload;
use crate::types::{BillDetail, BillSummary, SearchQuery};
use crate::SearchError;

/// Public OpenStates v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://v3.openstates.org";

/// Header carrying the static API key on every request.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Trait for bill search operations.
///
/// Use `HttpBillSearchClient` for real HTTP calls, or
/// [`mock::MockBillSearchClient`] in tests.
#[async_trait]
pub trait BillSearchClient: Send + Sync {
    /// Search bills matching `query` and fetch the detail record of each hit.
    ///
    /// Results keep the order returned by the list endpoint (latest action
    /// first). Any failed request fails the whole search.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BillSummary>, SearchError>;
}

/// HTTP-based implementation of `BillSearchClient`.
pub struct HttpBillSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    detail_concurrency: NonZeroUsize,
}

impl fmt::Debug for HttpBillSearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBillSearchClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("detail_concurrency", &self.detail_concurrency)
            .finish_non_exhaustive()
    }
}

impl HttpBillSearchClient {
    /// Create a new client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client whose requests are bounded by `timeout` overall and
    /// `connect_timeout` for establishing the connection.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Request`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn with_timeouts(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lexlearner/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            detail_concurrency: NonZeroUsize::MIN,
        }
    }

    /// Allow up to `concurrency` detail requests in flight at once.
    ///
    /// Output order is unaffected. The default of 1 fetches sequentially.
    #[must_use]
    pub const fn with_detail_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.detail_concurrency = concurrency;
        self
    }

    /// Send `request` with the API key and return the body of a non-error response.
    async fn fetch(&self, request: reqwest::RequestBuilder) -> Result<String, SearchError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;

        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            let message = if body.trim().is_empty() {
                reason.to_string()
            } else {
                format!("{reason}: {}", truncate_payload(body.trim()))
            };
            return Err(SearchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_detail(&self, id: String) -> Result<BillSummary, SearchError> {
        let url = format!("{}/bills/{}", self.base_url, id);
        tracing::debug!(bill_id = %id, "Fetching bill detail");

        let body = self.fetch(self.client.get(&url)).await?;
        let value = parse_json(&body)?;

        if !value.is_object() {
            return Err(SearchError::Unexpected(format!(
                "detail response for {id} is not a JSON object"
            )));
        }

        let detail: BillDetail =
            serde_json::from_value(value).map_err(|source| SearchError::InvalidBody {
                source,
                payload: truncate_payload(&body),
            })?;

        Ok(detail.into())
    }
}

#[async_trait]
impl BillSearchClient for HttpBillSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<BillSummary>, SearchError> {
        let jurisdiction_label = query.jurisdiction().to_uppercase();
        tracing::info!(
            keyword = query.keyword(),
            jurisdiction = %jurisdiction_label,
            session = query.session(),
            "Searching for bills using OpenStates API"
        );

        let limit = query.limit().get();
        let params = [
            ("q", query.keyword().to_string()),
            ("jurisdiction", query.jurisdiction().to_string()),
            ("session", query.session().to_string()),
            ("classification", "bill".to_string()),
            ("sort", "latest_action_desc".to_string()),
            ("page", "1".to_string()),
            ("per_page", limit.to_string()),
        ];

        let url = format!("{}/bills", self.base_url);
        let body = self.fetch(self.client.get(&url).query(&params)).await?;

        let max_results = usize::try_from(limit).unwrap_or(usize::MAX);
        let ids = result_ids(&body, max_results)?;

        if ids.is_empty() {
            tracing::info!(
                keyword = query.keyword(),
                jurisdiction = %jurisdiction_label,
                "No initial bills found"
            );
            return Ok(Vec::new());
        }

        stream::iter(ids)
            .map(|id| self.fetch_detail(id))
            .buffered(self.detail_concurrency.get())
            .try_collect()
            .await
    }
}

fn parse_json(body: &str) -> Result<Value, SearchError> {
    serde_json::from_str(body).map_err(|source| SearchError::InvalidBody {
        source,
        payload: truncate_payload(body),
    })
}

/// Pull the `id` of the first `limit` entries of a search response's `results`.
///
/// A missing or `null` `results` array means no hits.
fn result_ids(body: &str, limit: usize) -> Result<Vec<String>, SearchError> {
    let data = parse_json(body)?;

    if !data.is_object() {
        return Err(SearchError::Unexpected(
            "search response is not a JSON object".to_string(),
        ));
    }

    let results = match data.get("results") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(results)) => results,
        Some(_) => {
            return Err(SearchError::Unexpected(
                "search response `results` is not an array".to_string(),
            ))
        }
    };

    results
        .iter()
        .take(limit)
        .map(|result| {
            result
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| SearchError::MissingKey {
                    key: "id",
                    payload: truncate_payload(body),
                })
        })
        .collect()
}


#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{BillSearchClient, BillSummary, SearchError, SearchQuery};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock implementation of `BillSearchClient` for unit tests.
    ///
    /// Queue responses with `push_search_result` and verify calls
    /// with `search_calls()`. An empty queue answers with no bills.
    pub struct MockBillSearchClient {
        search_results: Mutex<VecDeque<Result<Vec<BillSummary>, SearchError>>>,
        search_calls: Mutex<Vec<SearchQuery>>,
    }

    impl MockBillSearchClient {
        pub fn new() -> Self {
            Self {
                search_results: Mutex::new(VecDeque::new()),
                search_calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue the result for the next `search` call.
        pub fn push_search_result(&self, result: Result<Vec<BillSummary>, SearchError>) {
            self.search_results.lock().unwrap().push_back(result);
        }

        /// Get all queries passed to `search`.
        pub fn search_calls(&self) -> Vec<SearchQuery> {
            self.search_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockBillSearchClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl BillSearchClient for MockBillSearchClient {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<BillSummary>, SearchError> {
            self.search_calls.lock().unwrap().push(query.clone());

            self.search_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}
