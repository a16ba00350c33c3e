//! Database bootstrap: connection pragmas and the canonical tables

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) the recipe database with foreign keys enforced
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(&path)
        .with_context(|| format!("failed to open database: {}", path.as_ref().display()))?;
    configure(&conn)?;
    Ok(conn)
}

/// In-memory database with the same pragmas applied
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .context("failed to enable foreign keys")?;
    Ok(())
}

/// Create the canonical tables if they do not already exist.
///
/// Safe to run against a populated database: existing tables and their rows
/// are left untouched.
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS recipe (
            id INTEGER PRIMARY KEY,
            title TEXT,
            time INTEGER,
            url TEXT,
            photourl TEXT
        );

        CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY,
            name TEXT
        );

        CREATE TABLE IF NOT EXISTS ingredient_recipe (
            recipe_id INTEGER,
            description TEXT,
            FOREIGN KEY (recipe_id) REFERENCES recipe (id)
        );

        CREATE TABLE IF NOT EXISTS instruction_recipe (
            recipe_id INTEGER,
            ord INTEGER,
            description TEXT,
            FOREIGN KEY (recipe_id) REFERENCES recipe (id)
        );

        CREATE TABLE IF NOT EXISTS tag_recipe (
            tag_id INTEGER,
            recipe_id INTEGER,
            FOREIGN KEY (tag_id) REFERENCES tag (id),
            FOREIGN KEY (recipe_id) REFERENCES recipe (id)
        );
        ",
    )
    .context("failed to create schema")
}
