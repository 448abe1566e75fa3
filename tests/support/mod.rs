//! Shared fixtures for the integration tests.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use bookshelf::enrichment::Enricher;
use bookshelf::error::LookupError;
use bookshelf::lookup::{ImageLinks, MetadataLookup, VolumeInfo};
use bookshelf::state::AppState;
use bookshelf::{App, Book};
use tokio::runtime::Runtime;

/// In-process stand-in for the volumes search: answers from a fixed table and
/// fails for one chosen title.
#[derive(Default)]
pub struct FakeLookup {
    volumes: HashMap<String, VolumeInfo>,
    failing: Option<String>,
}

#[allow(dead_code)]
impl FakeLookup {
    pub fn with_cover(mut self, title: &str, thumbnail: &str, published: &str) -> Self {
        self.volumes.insert(
            title.to_string(),
            VolumeInfo {
                image_links: Some(ImageLinks {
                    thumbnail: Some(thumbnail.to_string()),
                }),
                published_date: Some(published.to_string()),
            },
        );
        self
    }

    pub fn failing_for(mut self, title: &str) -> Self {
        self.failing = Some(title.to_string());
        self
    }
}

#[async_trait]
impl MetadataLookup for FakeLookup {
    async fn lookup(&self, title: &str, _author: &str) -> Result<Option<VolumeInfo>, LookupError> {
        if self.failing.as_deref() == Some(title) {
            return Err(LookupError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(self.volumes.get(title).cloned())
    }
}

pub fn page_size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("page size must be non-zero")
}

/// Build a controller over `books` whose lookups run on `runtime`.
pub fn app_with(runtime: &Runtime, books: Vec<Book>, size: usize, lookup: FakeLookup) -> App {
    let (enricher, events) = Enricher::new(Arc::new(lookup), books.len(), runtime.handle().clone());
    App::new(AppState::new(books, page_size(size)), enricher, events)
}

/// Drain completions until no lookup is in flight.
#[allow(dead_code)]
pub fn settle(app: &mut App) {
    for _ in 0..500 {
        app.pump_enrichment();
        if !app.enricher().is_busy() {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("enrichment did not settle");
}
