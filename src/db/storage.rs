use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Fetch the raw value stored under `key`, if any.
pub fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM storage WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("failed to read storage key `{key}`"))
}

/// Insert or overwrite the value stored under `key`.
pub fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO storage (key, value) VALUES (?1, ?2)",
        params![key, value],
    )
    .with_context(|| format!("failed to write storage key `{key}`"))?;
    Ok(())
}
