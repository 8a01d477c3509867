//! Versioned schema migrations tracked via sqlite's `user_version`.

mod column_helpers;
mod v1;
mod v3;

use column_helpers::add_column_if_not_exists;
use rusqlite::Connection;
use trove_core::format_inventory_number;

pub const SCHEMA_VERSION: i32 = 3;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "busy_timeout", 5000i32)?;

    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: initial artifacts table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: material, dimensions, storage location");
        add_column_if_not_exists(conn, "artifacts", "material", "TEXT")?;
        add_column_if_not_exists(conn, "artifacts", "dimensions", "TEXT")?;
        add_column_if_not_exists(conn, "artifacts", "storage_location", "TEXT")?;
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: inventory numbering and QR references");
        add_column_if_not_exists(conn, "artifacts", "inventory_number", "TEXT")?;
        add_column_if_not_exists(conn, "artifacts", "qr_path", "TEXT")?;
        conn.execute_batch(v3::SQL)?;
        backfill_inventory_numbers(conn)?;
        conn.execute_batch(v3::INDEX_SQL)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}

/// Assigns inventory numbers to rows created before v3, in id order, and
/// leaves the counter at the highest issued sequence.
fn backfill_inventory_numbers(conn: &Connection) -> Result<(), rusqlite::Error> {
    let ids: Vec<i64> = conn
        .prepare("SELECT id FROM artifacts WHERE inventory_number IS NULL ORDER BY id")?
        .query_map([], |row| row.get(0))?
        .collect::<Result<_, _>>()?;

    for id in ids {
        conn.execute("UPDATE inventory_counter SET value = value + 1", [])?;
        let seq: i64 =
            conn.query_row("SELECT value FROM inventory_counter", [], |row| row.get(0))?;
        conn.execute(
            "UPDATE artifacts SET inventory_number = ?1 WHERE id = ?2",
            rusqlite::params![format_inventory_number(seq), id],
        )?;
    }

    Ok(())
}
