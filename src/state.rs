//! Application state owned by the controller: the canonical collection plus
//! the transient filter and pagination inputs.

use std::num::NonZeroUsize;

use crate::filter::{CategoryFilter, FilterState};
use crate::models::Book;
use crate::pagination::paginate;

/// Result of one filter + paginate pass.
#[derive(Debug, PartialEq, Eq)]
pub struct VisiblePage<'a> {
    pub books: Vec<&'a Book>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Size of the filtered view, across all pages.
    pub matching: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub books: Vec<Book>,
    pub filter: FilterState,
    /// 1-based page requested by the user; replaced by the effective page on
    /// every recompute.
    pub current_page: usize,
    pub page_size: NonZeroUsize,
}

impl AppState {
    pub fn new(books: Vec<Book>, page_size: NonZeroUsize) -> Self {
        Self {
            books,
            filter: FilterState::default(),
            current_page: 1,
            page_size,
        }
    }

    /// Changing the search text starts over from page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
        self.current_page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.current_page = 1;
    }

    pub fn request_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Derive the visible page from the current inputs and remember the
    /// effective page number.
    pub fn visible(&mut self) -> VisiblePage<'_> {
        let filtered = self.filter.apply(&self.books);
        let page = paginate(&filtered, self.page_size, self.current_page);
        self.current_page = page.number;

        VisiblePage {
            books: page.items.to_vec(),
            current_page: page.number,
            total_pages: page.total_pages,
            matching: filtered.len(),
        }
    }
}
