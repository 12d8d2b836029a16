#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::io;
use std::sync::Arc;

use lexlearner::{
    catalog::StaticBillCatalog,
    config::{Config, Mode},
    repl::{BillSource, Repl},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Logs go to stderr so they never interleave with the prompt on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = ?config.mode,
        "lexlearner starting up"
    );

    let source = match config.mode {
        Mode::Live => {
            tracing::debug!(openstates = ?config.openstates, "Using OpenStates API");
            BillSource::Live(Arc::new(config.build_client()?))
        }
        Mode::Static => BillSource::Static(StaticBillCatalog),
    };

    let repl = Repl::new(source, config.search.clone());
    repl.run(io::stdin().lock(), io::stdout().lock()).await?;

    Ok(())
}
