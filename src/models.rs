//! Domain models shared by the catalog, the filter/pagination engines and the
//! TUI. These stay plain data holders; persistence and presentation live in
//! their own modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategory;

/// Shelf section a book belongs to. Serialized lower-case so stored snapshots
/// read naturally (`"category": "education"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Programming,
    Environment,
    Education,
    Motivation,
}

impl Category {
    /// Every category in selector order.
    pub const ALL: [Category; 4] = [
        Category::Programming,
        Category::Environment,
        Category::Education,
        Category::Motivation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Programming => "programming",
            Category::Environment => "environment",
            Category::Education => "education",
            Category::Motivation => "motivation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single record of the canonical collection. Identity is the position in
/// that collection; there is no separate key.
pub struct Book {
    pub title: String,
    pub author: String,
    pub category: Category,
    /// Cover reference. Empty until enrichment runs, then a thumbnail URL, an
    /// empty string, or the placeholder sentinel.
    pub image: String,
    /// Free-form date text from the lookup, empty, or `N/A`.
    pub publication_date: String,
    pub copies_available: u32,
}

impl Book {
    /// Fresh, not yet enriched record.
    pub fn new(title: &str, author: &str, category: Category, copies_available: u32) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            category,
            image: String::new(),
            publication_date: String::new(),
            copies_available,
        }
    }
}
