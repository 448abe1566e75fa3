//! Ratatui front-end: the controller that owns application state, the view
//! projection, and the terminal event loop.

mod app;
mod helpers;
mod terminal;
mod view;

pub use app::{App, Focus};
pub use terminal::run_app;
pub use view::{BookCard, BookView, PageLink};
