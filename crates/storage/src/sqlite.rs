//! SQLite storage implementation

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, Row};
use trove_core::constants::MAX_QUERY_LIMIT;
use trove_core::{format_inventory_number, Artifact, ArtifactDraft, ArtifactFilter, Coordinate};

use crate::{migrations, Result, StorageError};

pub struct Storage {
    conn: Arc<Mutex<Connection>>,
}

fn lock_conn(mutex: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    mutex.lock().map_err(|_| StorageError::LockPoisoned)
}

fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

const ARTIFACT_COLUMNS: &str = "id, inventory_number, name, era, material, dimensions, \
     storage_location, original_location, gps_location, description, image_path, qr_path, \
     created_at";

fn map_artifact(row: &Row<'_>) -> rusqlite::Result<Artifact> {
    let created_at_str: String = row.get(12)?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(12, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    // Malformed stored coordinates are skipped, not surfaced: the row
    // stays usable, it just produces no map marker.
    let gps = row
        .get::<_, Option<String>>(8)?
        .as_deref()
        .and_then(Coordinate::parse_stored);

    Ok(Artifact {
        id: row.get(0)?,
        inventory_number: row.get(1)?,
        name: row.get(2)?,
        era: row.get(3)?,
        material: row.get(4)?,
        dimensions: row.get(5)?,
        storage_location: row.get(6)?,
        original_location: row.get(7)?,
        gps,
        description: row.get(9)?,
        image_path: row.get(10)?,
        qr_path: row.get(11)?,
        created_at,
    })
}

impl Storage {
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let storage = Self { conn: Arc::new(Mutex::new(conn)) };

        let conn = lock_conn(&storage.conn)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        Ok(storage)
    }

    /// Inserts a new artifact, assigning the next inventory number.
    ///
    /// The counter bump and the insert share one transaction: two racing
    /// create requests serialize on the counter row and cannot issue the
    /// same number.
    pub fn create_artifact(
        &self,
        draft: &ArtifactDraft,
        gps: Option<Coordinate>,
        image_path: Option<String>,
    ) -> Result<Artifact> {
        let mut conn = lock_conn(&self.conn)?;
        let tx = conn.transaction()?;

        tx.execute("UPDATE inventory_counter SET value = value + 1", [])?;
        let seq: i64 = tx.query_row("SELECT value FROM inventory_counter", [], |row| row.get(0))?;
        let inventory_number = format_inventory_number(seq);
        let created_at = Utc::now();

        tx.execute(
            r#"INSERT INTO artifacts
               (inventory_number, name, era, material, dimensions, storage_location,
                original_location, gps_location, description, image_path, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
            params![
                inventory_number,
                draft.name,
                draft.era,
                draft.material,
                draft.dimensions,
                draft.storage_location,
                draft.original_location,
                gps.map(|c| c.to_string()),
                draft.description,
                image_path,
                created_at.to_rfc3339(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Artifact {
            id,
            inventory_number,
            name: draft.name.clone(),
            era: draft.era.clone(),
            material: draft.material.clone(),
            dimensions: draft.dimensions.clone(),
            storage_location: draft.storage_location.clone(),
            original_location: draft.original_location.clone(),
            gps,
            description: draft.description.clone(),
            image_path,
            qr_path: None,
            created_at,
        })
    }

    pub fn get_artifact(&self, id: i64) -> Result<Option<Artifact>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn
            .prepare(&format!("SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_artifact(row)?)),
            None => Ok(None),
        }
    }

    /// Lists artifacts newest first, with optional substring search and
    /// era/material filters.
    pub fn list_artifacts(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut bind: Vec<String> = Vec::new();

        if let Some(q) = filter.query.as_deref().filter(|q| !q.trim().is_empty()) {
            conditions
                .push("(name LIKE ?{n} OR description LIKE ?{n} OR original_location LIKE ?{n})");
            bind.push(format!("%{}%", q.trim()));
        }
        if let Some(era) = filter.era.as_deref().filter(|e| !e.is_empty()) {
            conditions.push("era = ?{n}");
            bind.push(era.to_owned());
        }
        if let Some(material) = filter.material.as_deref().filter(|m| !m.is_empty()) {
            conditions.push("material = ?{n}");
            bind.push(material.to_owned());
        }

        let mut sql = format!("SELECT {ARTIFACT_COLUMNS} FROM artifacts");
        for (i, cond) in conditions.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&cond.replace("{n}", &(i + 1).to_string()));
        }
        let limit = if filter.limit == 0 { MAX_QUERY_LIMIT } else { filter.limit.min(MAX_QUERY_LIMIT) };
        sql.push_str(&format!(" ORDER BY created_at DESC, id DESC LIMIT {limit}"));

        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt
            .query_map(params_from_iter(bind.iter()), map_artifact)?
            .filter_map(log_row_error)
            .collect();
        Ok(results)
    }

    /// All artifacts carrying a stored coordinate, unbounded: the map
    /// renders every located record, so this query takes no limit.
    /// Rows whose stored value no longer parses still come back with
    /// `gps: None` and are dropped by the marker builder.
    pub fn marker_artifacts(&self) -> Result<Vec<Artifact>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE gps_location IS NOT NULL \
             ORDER BY created_at DESC, id DESC"
        ))?;
        let results = stmt.query_map([], map_artifact)?.filter_map(log_row_error).collect();
        Ok(results)
    }

    /// Deletes an artifact and returns the removed row, or `None` when
    /// the id does not exist. Callers use the returned paths to clean up
    /// the record's files.
    pub fn delete_artifact(&self, id: i64) -> Result<Option<Artifact>> {
        let mut conn = lock_conn(&self.conn)?;
        let tx = conn.transaction()?;

        let artifact = {
            let mut stmt = tx
                .prepare(&format!("SELECT {ARTIFACT_COLUMNS} FROM artifacts WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => Some(map_artifact(row)?),
                None => None,
            }
        };

        if artifact.is_some() {
            tx.execute("DELETE FROM artifacts WHERE id = ?1", params![id])?;
        }
        tx.commit()?;
        Ok(artifact)
    }

    /// Fills the QR reference right after creation. Not an edit flow:
    /// rows are otherwise immutable.
    pub fn set_qr_path(&self, id: i64, qr_path: &str) -> Result<()> {
        let conn = lock_conn(&self.conn)?;
        let changed =
            conn.execute("UPDATE artifacts SET qr_path = ?1 WHERE id = ?2", params![qr_path, id])?;
        if changed == 0 {
            return Err(StorageError::NotFound { entity: "artifact", id: id.to_string() });
        }
        Ok(())
    }

    pub fn count_artifacts(&self) -> Result<i64> {
        let conn = lock_conn(&self.conn)?;
        Ok(conn.query_row("SELECT COUNT(*) FROM artifacts", [], |row| row.get(0))?)
    }

    /// Inventory number of the most recently created record, if any.
    pub fn last_inventory_number(&self) -> Result<Option<String>> {
        let conn = lock_conn(&self.conn)?;
        let mut stmt =
            conn.prepare("SELECT inventory_number FROM artifacts ORDER BY id DESC LIMIT 1")?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }
}
