//! OpenStates v3 bill search client.
//!
//! Provides an HTTP client abstraction for searching bills by keyword and
//! jurisdiction, then enriching each hit with its detail record.
//!
//! # Architecture
//!
//! The crate uses a trait-based design for testability:
//!
//! - [`BillSearchClient`] - Trait defining the search operation
//! - [`HttpBillSearchClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockBillSearchClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use lex_openstates::{BillSearchClient, HttpBillSearchClient, SearchQuery};
//!
//! let client = HttpBillSearchClient::new("https://v3.openstates.org", "my-api-key");
//! let query = SearchQuery::new("education")?.with_jurisdiction("GA");
//! for bill in client.search(&query).await? {
//!     println!("{}: {}", bill.identifier, bill.title);
//! }
//! ```
//!
//! # Testing Patterns
//!
//! Integration tests stub the API with `wiremock` (see `tests/common/http_mock.rs`):
//!
//! ```ignore
//! server
//!     .expect_get("/bills")
//!     .with_header("X-API-KEY", "test-key")
//!     .respond_with_json(json!({ "results": [] }))
//!     .mount()
//!     .await;
//! ```

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

mod client;
mod error;
mod types;

pub use client::{BillSearchClient, HttpBillSearchClient, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use error::SearchError;
pub use types::{
    BillAction, BillDetail, BillSummary, Classification, SearchQuery, Subject,
    DEFAULT_JURISDICTION, DEFAULT_LIMIT, DEFAULT_SESSION,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
