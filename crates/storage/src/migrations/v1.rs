//! Migration v1: initial artifacts table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS artifacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    era TEXT,
    original_location TEXT,
    gps_location TEXT,
    description TEXT,
    image_path TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_artifacts_created ON artifacts(created_at);
CREATE INDEX IF NOT EXISTS idx_artifacts_era ON artifacts(era);
";
