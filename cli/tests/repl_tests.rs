//! Tests for the interactive loop, driven by scripted input.

use std::io::Cursor;
use std::sync::Arc;

use lex_openstates::mock::MockBillSearchClient;
use lex_openstates::{BillSummary, SearchError};
use lexlearner::catalog::StaticBillCatalog;
use lexlearner::config::SearchConfig;
use lexlearner::repl::{BillSource, Repl};

fn education_bill() -> BillSummary {
    BillSummary {
        identifier: "HB 42".into(),
        title: "Student Loan Reform Act".into(),
        status: "Referred to committee".into(),
        subjects: "Education".into(),
        abstract_text: "Reforms student loans. Adds oversight.".into(),
        openstates_url: "https://openstates.org/ga/bills/2025/HB42/".into(),
        classification: "senate_bill".into(),
    }
}

async fn run_live(mock: &Arc<MockBillSearchClient>, script: &str) -> String {
    let repl = Repl::new(BillSource::Live(mock.clone()), SearchConfig::default());
    let mut output = Vec::new();
    repl.run(Cursor::new(script.to_string()), &mut output)
        .await
        .expect("repl should not fail on in-memory io");
    String::from_utf8(output).expect("utf-8 output")
}

async fn run_static(script: &str) -> String {
    let repl = Repl::new(
        BillSource::Static(StaticBillCatalog),
        SearchConfig::default(),
    );
    let mut output = Vec::new();
    repl.run(Cursor::new(script.to_string()), &mut output)
        .await
        .expect("repl should not fail on in-memory io");
    String::from_utf8(output).expect("utf-8 output")
}

#[tokio::test]
async fn test_live_search_prints_result_block() {
    let mock = Arc::new(MockBillSearchClient::new());
    mock.push_search_result(Ok(vec![education_bill()]));

    let output = run_live(&mock, "education\n\nexit\n").await;

    assert!(output.starts_with("Welcome to LexLearner CLI (OpenStates v3 API)\n"));
    assert!(output.contains("--- Search Results ---"));
    assert!(output.contains("Bill ID: HB 42\n"));
    assert!(output.contains("Type: Senate Bill\n"));
    assert!(output.contains("Status: Referred to committee\n"));
    assert!(output.contains("Abstract:\n  - Reforms student loans.\n  - Adds oversight.\n"));
    assert!(output.contains("View Full Bill: https://openstates.org/ga/bills/2025/HB42/\n"));
    assert!(output.trim_end().ends_with("Exiting LexLearner. Goodbye!"));
}

#[tokio::test]
async fn test_blank_jurisdiction_defaults_to_ga() {
    let mock = Arc::new(MockBillSearchClient::new());

    run_live(&mock, "education\n\nexit\n").await;

    let calls = mock.search_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].keyword(), "education");
    assert_eq!(calls[0].jurisdiction(), "ga");
    assert_eq!(calls[0].session(), "current");
    assert_eq!(calls[0].limit().get(), 20);
}

#[tokio::test]
async fn test_jurisdiction_input_is_lowercased() {
    let mock = Arc::new(MockBillSearchClient::new());

    let output = run_live(&mock, "  tax  \nNY\nexit\n").await;

    let calls = mock.search_calls();
    assert_eq!(calls[0].keyword(), "tax");
    assert_eq!(calls[0].jurisdiction(), "ny");
    assert!(output.contains(
        "No bills found for 'tax' in NY. Please try a different keyword or jurisdiction."
    ));
}

#[tokio::test]
async fn test_blank_keyword_reprompts_without_searching() {
    let mock = Arc::new(MockBillSearchClient::new());

    let output = run_live(&mock, "\n   \nEXIT\n").await;

    assert_eq!(output.matches("Please enter a valid keyword.").count(), 2);
    assert!(mock.search_calls().is_empty());
}

#[tokio::test]
async fn test_failed_search_reports_no_bills_and_continues() {
    let mock = Arc::new(MockBillSearchClient::new());
    mock.push_search_result(Err(SearchError::Http {
        status: 401,
        message: "Unauthorized".into(),
    }));
    mock.push_search_result(Ok(vec![education_bill()]));

    let output = run_live(&mock, "education\nga\neducation\nga\nexit\n").await;

    assert_eq!(mock.search_calls().len(), 2);
    assert!(output.contains("No bills found for 'education' in GA."));
    assert!(output.contains("Bill ID: HB 42"));
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let mock = Arc::new(MockBillSearchClient::new());

    let output = run_live(&mock, "education\n").await;

    assert!(mock.search_calls().is_empty());
    assert!(output.trim_end().ends_with("Exiting LexLearner. Goodbye!"));
}

#[tokio::test]
async fn test_static_mode_prints_catalog_records() {
    let output = run_static("climate change\nexit\n").await;

    assert!(output.starts_with("Welcome to LexLearner CLI (Simulation Mode)\n"));
    assert!(output.contains(
        "Title: Clean Air Act Amendment of 2025\nStatus: Passed House, Awaiting Senate Vote\nBill ID: hr3684\n"
    ));
    assert!(output.contains("Bill ID: s1234\n"));
    assert!(!output.contains("state/territory abbreviation"));
}

#[tokio::test]
async fn test_static_mode_no_match() {
    let output = run_static("unrelated\nexit\n").await;

    assert!(output.contains("There were no bills found for 'unrelated'. Please try again."));
}
