//! Enrichment coordinator. Lookups run as independent async tasks; each one
//! reports back through a channel and the controller applies the result, so
//! the collection is only ever mutated on the UI thread.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::lookup::{MetadataLookup, VolumeInfo};
use crate::models::Book;

/// Cover reference used when the lookup fails or finds nothing.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.jpg";
/// Publication date used when the lookup fails or finds nothing.
pub const UNKNOWN_DATE: &str = "N/A";

/// Lifecycle of one record. `Enriched` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentState {
    #[default]
    Unenriched,
    InFlight,
    Enriched,
}

/// Field values written into a record once its lookup settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub image: String,
    pub publication_date: String,
}

impl Metadata {
    pub fn placeholder() -> Self {
        Self {
            image: PLACEHOLDER_IMAGE.to_string(),
            publication_date: UNKNOWN_DATE.to_string(),
        }
    }

    /// Fold any lookup outcome into metadata. A match with missing fields
    /// yields empty strings; no match and failures yield the placeholder.
    pub fn from_lookup(outcome: Result<Option<VolumeInfo>, LookupError>, title: &str) -> Self {
        match outcome {
            Ok(Some(info)) => Self {
                image: info.thumbnail().unwrap_or_default().to_string(),
                publication_date: info.published_date.unwrap_or_default(),
            },
            Ok(None) => {
                debug!(title, "no volumes found");
                Self::placeholder()
            }
            Err(err) => {
                warn!(title, "error fetching book details: {err}");
                Self::placeholder()
            }
        }
    }
}

/// Completion message posted by a lookup task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentEvent {
    /// Position of the record in the canonical collection.
    pub index: usize,
    pub metadata: Metadata,
}

pub struct Enricher {
    lookup: Arc<dyn MetadataLookup>,
    runtime: Handle,
    states: Vec<EnrichmentState>,
    events: UnboundedSender<EnrichmentEvent>,
}

impl Enricher {
    /// Create a coordinator for a collection of `len` records. The receiver is
    /// drained by the controller.
    pub fn new(
        lookup: Arc<dyn MetadataLookup>,
        len: usize,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<EnrichmentEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let enricher = Self {
            lookup,
            runtime,
            states: vec![EnrichmentState::Unenriched; len],
            events,
        };
        (enricher, receiver)
    }

    /// Spawn one lookup per record that has not been looked up yet. Returns the
    /// number of lookups started; calling it again only picks up stragglers.
    pub fn enrich_all(&mut self, books: &[Book]) -> usize {
        if self.states.len() < books.len() {
            self.states.resize(books.len(), EnrichmentState::Unenriched);
        }

        let mut started = 0;
        for (index, book) in books.iter().enumerate() {
            if self.states[index] != EnrichmentState::Unenriched {
                continue;
            }
            self.states[index] = EnrichmentState::InFlight;
            started += 1;

            let lookup = Arc::clone(&self.lookup);
            let events = self.events.clone();
            let title = book.title.clone();
            let author = book.author.clone();
            self.runtime.spawn(async move {
                let outcome = lookup.lookup(&title, &author).await;
                let metadata = Metadata::from_lookup(outcome, &title);
                if events.send(EnrichmentEvent { index, metadata }).is_err() {
                    debug!(index, "enrichment result dropped after shutdown");
                }
            });
        }
        debug!(started, "enrichment lookups started");
        started
    }

    /// Write a completed lookup into its record. Returns `false` when the event
    /// is stale (record already enriched) or points outside the collection.
    pub fn apply(&mut self, books: &mut [Book], event: EnrichmentEvent) -> bool {
        let Some(state) = self.states.get_mut(event.index) else {
            return false;
        };
        if *state == EnrichmentState::Enriched {
            return false;
        }
        let Some(book) = books.get_mut(event.index) else {
            return false;
        };

        book.image = event.metadata.image;
        book.publication_date = event.metadata.publication_date;
        *state = EnrichmentState::Enriched;
        true
    }

    pub fn state(&self, index: usize) -> Option<EnrichmentState> {
        self.states.get(index).copied()
    }

    /// `(enriched, in_flight)` counts.
    pub fn progress(&self) -> (usize, usize) {
        self.states
            .iter()
            .fold((0, 0), |(done, pending), state| match state {
                EnrichmentState::Enriched => (done + 1, pending),
                EnrichmentState::InFlight => (done, pending + 1),
                EnrichmentState::Unenriched => (done, pending),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.progress().1 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::ImageLinks;
    use crate::models::Category;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct NeverAnswers;

    #[async_trait]
    impl MetadataLookup for NeverAnswers {
        async fn lookup(&self, _: &str, _: &str) -> Result<Option<VolumeInfo>, LookupError> {
            std::future::pending().await
        }
    }

    fn books(n: usize) -> Vec<Book> {
        (0..n)
            .map(|i| Book::new(&format!("Book {i}"), "Author", Category::Education, 1))
            .collect()
    }

    #[test]
    fn match_with_fields_copies_them() {
        let info = VolumeInfo {
            image_links: Some(ImageLinks {
                thumbnail: Some("http://covers/9.jpg".to_string()),
            }),
            published_date: Some("2004".to_string()),
        };
        let metadata = Metadata::from_lookup(Ok(Some(info)), "t");
        assert_eq!(metadata.image, "http://covers/9.jpg");
        assert_eq!(metadata.publication_date, "2004");
    }

    #[test]
    fn match_without_fields_yields_empty_strings() {
        let metadata = Metadata::from_lookup(Ok(Some(VolumeInfo::default())), "t");
        assert_eq!(
            metadata,
            Metadata {
                image: String::new(),
                publication_date: String::new()
            }
        );
    }

    #[test]
    fn no_match_and_failure_share_the_placeholder() {
        assert_eq!(Metadata::from_lookup(Ok(None), "t"), Metadata::placeholder());
        let failure = Err(LookupError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(Metadata::from_lookup(failure, "t"), Metadata::placeholder());
        assert_eq!(Metadata::placeholder().image, "placeholder.jpg");
        assert_eq!(Metadata::placeholder().publication_date, "N/A");
    }

    #[tokio::test]
    async fn in_flight_records_are_not_started_twice() {
        let shelf = books(3);
        let (mut enricher, _events) =
            Enricher::new(Arc::new(NeverAnswers), shelf.len(), Handle::current());

        assert_eq!(enricher.enrich_all(&shelf), 3);
        assert_eq!(enricher.state(1), Some(EnrichmentState::InFlight));
        assert_eq!(enricher.enrich_all(&shelf), 0);
        assert_eq!(enricher.progress(), (0, 3));
        assert!(enricher.is_busy());
    }

    #[tokio::test]
    async fn apply_writes_once_and_ignores_repeats() {
        let mut shelf = books(2);
        let (mut enricher, _events) =
            Enricher::new(Arc::new(NeverAnswers), shelf.len(), Handle::current());

        let first = EnrichmentEvent {
            index: 1,
            metadata: Metadata {
                image: "http://covers/a.jpg".to_string(),
                publication_date: "2001".to_string(),
            },
        };
        assert!(enricher.apply(&mut shelf, first));
        assert_eq!(enricher.state(1), Some(EnrichmentState::Enriched));

        let repeat = EnrichmentEvent {
            index: 1,
            metadata: Metadata::placeholder(),
        };
        assert!(!enricher.apply(&mut shelf, repeat));
        assert_eq!(shelf[1].image, "http://covers/a.jpg");
        assert_eq!(shelf[1].publication_date, "2001");
        assert_eq!(shelf[0].image, "");

        let outside = EnrichmentEvent {
            index: 9,
            metadata: Metadata::placeholder(),
        };
        assert!(!enricher.apply(&mut shelf, outside));

        assert_eq!(enricher.enrich_all(&shelf), 1);
        assert_eq!(enricher.state(1), Some(EnrichmentState::Enriched));
    }
}
