//! Built-in simulation catalog.
//!
//! Answers a handful of keywords from hardcoded records so the CLI can be
//! exercised without network access or an API key.

use serde::Serialize;

/// A record from the simulation catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegacyBill {
    pub title: &'static str,
    pub status: &'static str,
    pub bill_id: &'static str,
}

const CLIMATE_BILLS: &[LegacyBill] = &[
    LegacyBill {
        title: "Clean Air Act Amendment of 2025",
        status: "Passed House, Awaiting Senate Vote",
        bill_id: "hr3684",
    },
    LegacyBill {
        title: "Climate Change Mitigation Bill",
        status: "Introduced",
        bill_id: "s1234",
    },
];

const EDUCATION_BILLS: &[LegacyBill] = &[LegacyBill {
    title: "Student Loan Forgiveness Act",
    status: "In Committee",
    bill_id: "hr5678",
}];

/// Fixed keyword-to-bills lookup with no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBillCatalog;

impl StaticBillCatalog {
    /// Bills whose category appears (case-insensitively) in `keyword`.
    ///
    /// Categories are checked in order, so a keyword containing both
    /// "climate" and "education" gets the climate bills.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<LegacyBill> {
        tracing::info!(keyword, "Searching simulation catalog");

        let keyword = keyword.to_lowercase();
        let bills: &[LegacyBill] = if keyword.contains("climate") {
            CLIMATE_BILLS
        } else if keyword.contains("education") {
            EDUCATION_BILLS
        } else {
            &[]
        };

        bills.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_returns_both_records() {
        let bills = StaticBillCatalog.search("climate change");
        let ids: Vec<&str> = bills.iter().map(|b| b.bill_id).collect();
        assert_eq!(ids, vec!["hr3684", "s1234"]);
        assert_eq!(bills[0].title, "Clean Air Act Amendment of 2025");
        assert_eq!(bills[1].status, "Introduced");
    }

    #[test]
    fn test_education_returns_one_record() {
        let bills = StaticBillCatalog.search("Higher EDUCATION funding");
        assert_eq!(
            bills,
            vec![LegacyBill {
                title: "Student Loan Forgiveness Act",
                status: "In Committee",
                bill_id: "hr5678",
            }]
        );
    }

    #[test]
    fn test_unrelated_keyword_is_empty() {
        assert!(StaticBillCatalog.search("unrelated").is_empty());
        assert!(StaticBillCatalog.search("").is_empty());
    }

    #[test]
    fn test_climate_checked_before_education() {
        let bills = StaticBillCatalog.search("education about climate");
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].bill_id, "hr3684");
    }
}
