//! Interactive read loop.
//!
//! Reads keywords (and, in live mode, a jurisdiction) until `exit` or end of
//! input, printing results or a "no bills found" line for each search. A
//! failed search is logged and reported as having no bills; it never ends
//! the loop.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use lex_openstates::{BillSearchClient, BillSummary};

use crate::catalog::StaticBillCatalog;
use crate::config::SearchConfig;
use crate::render::{write_bill, write_legacy_bill, RULE};

const KEYWORD_PROMPT: &str = "\nEnter a keyword to search for bills (e.g., 'education', 'tax', 'health', or 'exit' to quit): ";
const LEGACY_KEYWORD_PROMPT: &str =
    "\nEnter a keyword to search for bills (e.g., 'climate', 'education', or 'exit' to quit): ";
const JURISDICTION_PROMPT: &str = "Enter a state/territory abbreviation (e.g., 'ga' for Georgia, 'ny' for New York, 'all' for all available states, or leave blank for 'ga'): ";

/// The backend answering searches.
pub enum BillSource {
    Live(Arc<dyn BillSearchClient>),
    Static(StaticBillCatalog),
}

pub struct Repl {
    source: BillSource,
    search: SearchConfig,
}

impl Repl {
    #[must_use]
    pub const fn new(source: BillSource, search: SearchConfig) -> Self {
        Self { source, search }
    }

    /// Run the loop until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an error only if reading `input` or writing `output` fails.
    pub async fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        self.write_banner(&mut output)?;

        loop {
            let prompt_text = match self.source {
                BillSource::Live(_) => KEYWORD_PROMPT,
                BillSource::Static(_) => LEGACY_KEYWORD_PROMPT,
            };
            let Some(keyword) = prompt(&mut input, &mut output, prompt_text)? else {
                break;
            };

            if keyword.eq_ignore_ascii_case("exit") {
                break;
            }
            if keyword.is_empty() {
                writeln!(output, "Please enter a valid keyword.")?;
                continue;
            }

            match &self.source {
                BillSource::Live(client) => {
                    let Some(jurisdiction) = prompt(&mut input, &mut output, JURISDICTION_PROMPT)?
                    else {
                        break;
                    };
                    self.run_live_search(client.as_ref(), &keyword, &jurisdiction, &mut output)
                        .await?;
                }
                BillSource::Static(catalog) => {
                    run_static_search(catalog, &keyword, &mut output)?;
                }
            }
        }

        writeln!(output, "Exiting LexLearner. Goodbye!")?;
        output.flush()
    }

    fn write_banner<W: Write>(&self, output: &mut W) -> io::Result<()> {
        match self.source {
            BillSource::Live(_) => {
                writeln!(output, "Welcome to LexLearner CLI (OpenStates v3 API)")?;
            }
            BillSource::Static(_) => {
                writeln!(output, "Welcome to LexLearner CLI (Simulation Mode)")?;
            }
        }
        writeln!(output, "Making legal data accessible to everyone.")
    }

    async fn run_live_search<W: Write>(
        &self,
        client: &dyn BillSearchClient,
        keyword: &str,
        jurisdiction: &str,
        output: &mut W,
    ) -> io::Result<()> {
        let jurisdiction = if jurisdiction.is_empty() {
            self.search.default_jurisdiction.to_lowercase()
        } else {
            jurisdiction.to_lowercase()
        };

        writeln!(output, "{RULE}")?;
        output.flush()?;

        let bills = self.search_live(client, keyword, &jurisdiction).await;

        if bills.is_empty() {
            writeln!(
                output,
                "No bills found for '{keyword}' in {}. Please try a different keyword or jurisdiction.",
                jurisdiction.to_uppercase()
            )?;
            return Ok(());
        }

        writeln!(output, "\n--- Search Results ---")?;
        for bill in &bills {
            write_bill(output, bill)?;
        }
        Ok(())
    }

    async fn search_live(
        &self,
        client: &dyn BillSearchClient,
        keyword: &str,
        jurisdiction: &str,
    ) -> Vec<BillSummary> {
        let result = match self.search.query(keyword, jurisdiction) {
            Ok(query) => client.search(&query).await,
            Err(err) => Err(err),
        };

        result.unwrap_or_else(|err| {
            err.log();
            Vec::new()
        })
    }
}

fn run_static_search<W: Write>(
    catalog: &StaticBillCatalog,
    keyword: &str,
    output: &mut W,
) -> io::Result<()> {
    let bills = catalog.search(keyword);

    if bills.is_empty() {
        return writeln!(
            output,
            "There were no bills found for '{keyword}'. Please try again."
        );
    }

    writeln!(output, "\n--- Search Results ---")?;
    for bill in &bills {
        write_legacy_bill(output, bill)?;
    }
    Ok(())
}

/// Print `text`, then read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
