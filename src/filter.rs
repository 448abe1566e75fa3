//! Filter engine: derives the filtered view from the canonical collection.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownCategory;
use crate::models::{Book, Category};

/// Category selector value: the wildcard or one concrete category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector options in display order, wildcard first.
    pub const OPTIONS: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Programming),
        CategoryFilter::Only(Category::Environment),
        CategoryFilter::Only(Category::Education),
        CategoryFilter::Only(Category::Motivation),
    ];

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Step through [`Self::OPTIONS`], wrapping at both ends.
    pub fn cycle(self, offset: isize) -> Self {
        let len = Self::OPTIONS.len() as isize;
        let current = Self::OPTIONS
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0) as isize;
        Self::OPTIONS[(current + offset).rem_euclid(len) as usize]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            value.parse().map(CategoryFilter::Only)
        }
    }
}

/// Transient filter inputs owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        apply_filters(books, &self.search_text, self.category)
    }
}

/// Keep books whose title contains `search_text` (ignoring case) and whose
/// category passes the selector. Order is preserved.
pub fn apply_filters<'a>(
    books: &'a [Book],
    search_text: &str,
    category: CategoryFilter,
) -> Vec<&'a Book> {
    let needle = search_text.to_lowercase();
    books
        .iter()
        .filter(|book| category.matches(book.category))
        .filter(|book| book.title.to_lowercase().contains(&needle))
        .collect()
}
