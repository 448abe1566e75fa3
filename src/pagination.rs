//! Pagination engine: slices a filtered view into pages.

use std::num::NonZeroUsize;

/// One page of a filtered view.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Visible slice, at most `page_size` long.
    pub items: &'a [T],
    /// Effective 1-based page number.
    pub number: usize,
    /// Zero when the view is empty.
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Select the requested page. Requests outside `1..=total_pages` fall back to
/// page 1 rather than being clamped to the last page.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, requested_page: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let number = if requested_page == 0 || requested_page > total_pages {
        1
    } else {
        requested_page
    };

    let start = ((number - 1) * page_size.get()).min(items.len());
    let end = (start + page_size.get()).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages,
    }
}
