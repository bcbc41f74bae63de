use rusqlite::{Connection, Result};

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS draft (
            slot INTEGER PRIMARY KEY CHECK(slot = 1),
            selections_json TEXT NOT NULL,
            images_json TEXT NOT NULL,
            step_index INTEGER NOT NULL,
            catalog_fingerprint TEXT NOT NULL,
            saved_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id TEXT PRIMARY KEY,
            restaurant_name TEXT NOT NULL,
            body TEXT NOT NULL,
            selections_json TEXT NOT NULL,
            images_json TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at);
        ",
    )?;

    Ok(())
}
