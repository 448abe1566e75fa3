//! Persistence module: an embedded SQLite file used as a small key-value store.

mod connection;
mod storage;

pub use connection::{ensure_schema, open_in_memory};
pub use storage::{read_value, write_value};
