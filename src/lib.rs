//! Core library surface for the Bookshelf TUI: a paginated, filterable book
//! catalog whose covers and publication dates are filled in asynchronously
//! from a remote volumes search.
pub mod catalog;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod filter;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod pagination;
pub mod state;
pub mod ui;

/// Startup helpers used by `main.rs`.
pub use catalog::load_or_generate;
pub use config::{DataPaths, Settings};
pub use db::ensure_schema;
pub use logging::init_logging;

/// Domain types manipulated by every layer.
pub use models::{Book, Category};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
