//! Migration v3: inventory counter and numbering
//!
//! The counter is a single row bumped inside the insert transaction, so
//! numbers are strictly increasing and never reused after deletes.

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS inventory_counter (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    value INTEGER NOT NULL
);
INSERT OR IGNORE INTO inventory_counter (id, value) VALUES (1, 0);
";

pub(super) const INDEX_SQL: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS idx_artifacts_inventory ON artifacts(inventory_number);
";
