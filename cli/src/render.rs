//! Plain-text rendering of search results.

use std::io::{self, Write};

use lex_openstates::BillSummary;

use crate::catalog::LegacyBill;

/// Separator printed between searches and after each live result.
pub const RULE: &str = "--------------------------------------------------";

/// Separator printed after each simulation result.
pub const LEGACY_RULE: &str = "--------------------";

/// Human label for a classification: underscores become spaces, words are title-cased.
///
/// `"senate_bill"` becomes `"Senate Bill"`.
#[must_use]
pub fn classification_label(classification: &str) -> String {
    title_case(&classification.replace('_', " "))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

/// Split an abstract into sentences on `.`, dropping empty fragments.
///
/// Each returned line ends with a period.
#[must_use]
pub fn abstract_lines(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{line}."))
        .collect()
}

/// Write the display block for one live result, rule included.
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_bill<W: Write>(out: &mut W, bill: &BillSummary) -> io::Result<()> {
    writeln!(out, "Bill ID: {}", bill.identifier)?;
    writeln!(out, "Title: {}", bill.title)?;
    writeln!(out, "Type: {}", classification_label(&bill.classification))?;
    writeln!(out, "Status: {}", bill.status)?;
    writeln!(out, "Subjects: {}", bill.subjects)?;
    writeln!(out, "Abstract:")?;
    for line in abstract_lines(&bill.abstract_text) {
        writeln!(out, "  - {line}")?;
    }
    writeln!(out, "View Full Bill: {}", bill.openstates_url)?;
    writeln!(out, "{RULE}")
}

/// Write the display block for one simulation result, rule included.
///
/// # Errors
/// Returns any error from the underlying writer.
pub fn write_legacy_bill<W: Write>(out: &mut W, bill: &LegacyBill) -> io::Result<()> {
    writeln!(out, "Title: {}", bill.title)?;
    writeln!(out, "Status: {}", bill.status)?;
    writeln!(out, "Bill ID: {}", bill.bill_id)?;
    writeln!(out, "{LEGACY_RULE}")
}
