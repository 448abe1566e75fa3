//! Catalog store: produces the canonical collection at startup, either from the
//! stored snapshot or by generating a fresh one.

use anyhow::{Context, Result};
use rand::Rng;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{read_value, write_value};
use crate::models::{Book, Category};

/// Storage key holding the JSON snapshot of the collection.
pub const BOOKS_KEY: &str = "books";

const TITLES: [&str; 10] = [
    "The Pragmatic Programmer",
    "Clean Code",
    "JavaScript: The Good Parts",
    "Design Patterns",
    "The C Programming Language",
    "Cracking the Coding Interview",
    "Refactoring",
    "Head First Java",
    "Eloquent JavaScript",
    "Introduction to Algorithms",
];

const AUTHORS: [&str; 10] = [
    "Andrew Hunt, David Thomas",
    "Robert C. Martin",
    "Douglas Crockford",
    "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides",
    "Brian W. Kernighan, Dennis M. Ritchie",
    "Gayle Laakmann McDowell",
    "Martin Fowler",
    "Kathy Sierra, Bert Bates",
    "Marijn Haverbeke",
    "Thomas H. Cormen, Charles E. Leiserson, Ronald L. Rivest, Clifford Stein",
];

const MIN_COPIES: u32 = 1;
const MAX_COPIES: u32 = 10;

/// Return the stored collection, or generate and store `count` new records when
/// the snapshot is missing, unreadable or corrupt. Never fails: storage
/// problems are logged and the caller always gets a collection.
pub fn load_or_generate<R: Rng + ?Sized>(conn: &Connection, count: usize, rng: &mut R) -> Vec<Book> {
    match read_value(conn, BOOKS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Book>>(&raw) {
            Ok(books) => {
                info!(count = books.len(), "loaded catalog snapshot");
                return books;
            }
            Err(err) => warn!("discarding corrupt catalog snapshot: {err}"),
        },
        Ok(None) => debug!("no catalog snapshot stored yet"),
        Err(err) => warn!("failed to read catalog snapshot: {err:#}"),
    }

    let books = generate_books(count, rng);
    match persist_books(conn, &books) {
        Ok(()) => info!(count = books.len(), "generated and stored a new catalog"),
        Err(err) => warn!("generated catalog could not be stored: {err:#}"),
    }
    books
}

/// Synthesize `count` records. Title, author and category are drawn
/// independently, so a title may appear with an unrelated author.
pub fn generate_books<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Book> {
    (0..count)
        .map(|_| {
            let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
            Book::new(
                TITLES[rng.gen_range(0..TITLES.len())],
                AUTHORS[rng.gen_range(0..AUTHORS.len())],
                category,
                rng.gen_range(MIN_COPIES..=MAX_COPIES),
            )
        })
        .collect()
}

/// Write the full collection under [`BOOKS_KEY`].
pub fn persist_books(conn: &Connection, books: &[Book]) -> Result<()> {
    let raw = serde_json::to_string(books).context("failed to serialize catalog")?;
    write_value(conn, BOOKS_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generation_draws_from_the_fixed_pools() {
        let mut rng = StdRng::seed_from_u64(7);
        let books = generate_books(50, &mut rng);
        assert_eq!(books.len(), 50);
        for book in &books {
            assert!(TITLES.contains(&book.title.as_str()));
            assert!(AUTHORS.contains(&book.author.as_str()));
            assert!((MIN_COPIES..=MAX_COPIES).contains(&book.copies_available));
            assert!(book.image.is_empty());
            assert!(book.publication_date.is_empty());
        }
    }

    #[test]
    fn missing_snapshot_generates_and_persists() {
        let conn = open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let books = load_or_generate(&conn, 12, &mut rng);
        assert_eq!(books.len(), 12);

        let stored = read_value(&conn, BOOKS_KEY).unwrap().unwrap();
        let stored: Vec<Book> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, books);
    }

    #[test]
    fn existing_snapshot_is_returned_without_rewriting() {
        let conn = open_in_memory().unwrap();
        let original = vec![Book::new("Refactoring", "Martin Fowler", Category::Education, 4)];
        let raw = serde_json::to_string(&original).unwrap();
        write_value(&conn, BOOKS_KEY, &raw).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        let books = load_or_generate(&conn, 100, &mut rng);
        assert_eq!(books, original);
        assert_eq!(read_value(&conn, BOOKS_KEY).unwrap(), Some(raw));
    }

    #[test]
    fn corrupt_snapshot_is_replaced() {
        let conn = open_in_memory().unwrap();
        write_value(&conn, BOOKS_KEY, "{not json").unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let books = load_or_generate(&conn, 5, &mut rng);
        assert_eq!(books.len(), 5);

        let stored = read_value(&conn, BOOKS_KEY).unwrap().unwrap();
        let stored: Vec<Book> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, books);
    }
}
