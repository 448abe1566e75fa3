//! Binary entry point: resolve the data directory, load or generate the
//! catalog, start background lookups and drive the Ratatui event loop until the
//! user exits.
use std::sync::Arc;

use anyhow::Context;
use bookshelf::enrichment::Enricher;
use bookshelf::lookup::GoogleBooksLookup;
use bookshelf::state::AppState;
use bookshelf::{
    ensure_schema, init_logging, load_or_generate, run_app, App, DataPaths, Settings,
};
use tracing::info;

/// Returning a `Result` bubbles fatal start-up problems (unwritable data
/// directory, malformed settings) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let paths = DataPaths::resolve()?;
    paths.ensure_root()?;
    let settings = Settings::load(&paths.settings)?;
    init_logging(&paths.log, &settings.log_level)?;
    info!(data_dir = %paths.root.display(), "starting bookshelf");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("bookshelf-lookup")
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let conn = ensure_schema(&paths.database)?;
    let books = load_or_generate(&conn, settings.seed_count, &mut rand::thread_rng());

    let lookup = Arc::new(GoogleBooksLookup::new(&settings.lookup_endpoint)?);
    let (enricher, events) = Enricher::new(lookup, books.len(), runtime.handle().clone());
    let mut app = App::new(AppState::new(books, settings.page_size), enricher, events);
    if settings.enrich_on_start {
        app.start_enrichment();
    }

    let result = run_app(&mut app);
    runtime.shutdown_background();
    info!("bookshelf closed");
    result
}
