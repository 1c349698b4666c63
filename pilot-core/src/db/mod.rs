mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::*;

/// Idempotent key-based persistence of workspace snapshots.
///
/// Every operation returns the stored record and whether this call created it.
/// Calling an operation again with the same key returns the existing record
/// unchanged.
pub trait RecordStore {
    fn get_or_create_development_step(&self, key: &str) -> Result<(DevelopmentStep, bool)>;

    fn get_or_create_file(
        &self,
        path: &str,
        name: &str,
        full_path: &str,
    ) -> Result<(FileRecord, bool)>;

    fn get_or_create_file_snapshot(
        &self,
        file: &FileRecord,
        step: &DevelopmentStep,
        content: &str,
    ) -> Result<(FileSnapshot, bool)>;
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Development step operations
    // ============================================================

    pub fn get_development_step(&self, key: &str) -> Result<Option<DevelopmentStep>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_development_step(&conn, key)
    }

    // ============================================================
    // File operations
    // ============================================================

    pub fn get_files(&self) -> Result<Vec<FileRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, path, name, full_path, created_at FROM files ORDER BY path, name",
        )?;

        let files = stmt
            .query_map([], |row| file_from_row(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }

    pub fn get_file(&self, path: &str, name: &str) -> Result<Option<FileRecord>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_file(&conn, path, name)
    }

    // ============================================================
    // File snapshot operations
    // ============================================================

    /// All snapshots captured at the step identified by `key`, ordered by file location.
    pub fn get_file_snapshots(&self, key: &str) -> Result<Vec<FileSnapshotWithFile>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT f.id, f.path, f.name, f.full_path, f.created_at,
                    s.id, s.file_id, s.development_step_id, s.content, s.created_at
             FROM file_snapshots s
             JOIN files f ON f.id = s.file_id
             JOIN development_steps d ON d.id = s.development_step_id
             WHERE d.key = ?
             ORDER BY f.path, f.name",
        )?;

        let snapshots = stmt
            .query_map([key], |row| {
                Ok(FileSnapshotWithFile {
                    file: file_from_row(row, 0)?,
                    snapshot: snapshot_from_row(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(snapshots)
    }
}

impl RecordStore for Database {
    fn get_or_create_development_step(&self, key: &str) -> Result<(DevelopmentStep, bool)> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let inserted = conn.execute(
            "INSERT INTO development_steps (id, key, created_at) VALUES (?, ?, ?)
             ON CONFLICT (key) DO NOTHING",
            (Uuid::new_v4().to_string(), key, Utc::now().to_rfc3339()),
        )?;

        let step = query_development_step(&conn, key)?
            .ok_or_else(|| anyhow::anyhow!("Development step '{}' missing after insert", key))?;

        Ok((step, inserted > 0))
    }

    fn get_or_create_file(
        &self,
        path: &str,
        name: &str,
        full_path: &str,
    ) -> Result<(FileRecord, bool)> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let inserted = conn.execute(
            "INSERT INTO files (id, path, name, full_path, created_at) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (path, name) DO NOTHING",
            (
                Uuid::new_v4().to_string(),
                path,
                name,
                full_path,
                Utc::now().to_rfc3339(),
            ),
        )?;

        let file = query_file(&conn, path, name)?
            .ok_or_else(|| anyhow::anyhow!("File '{}' in '{}' missing after insert", name, path))?;

        if inserted > 0 {
            tracing::debug!(path, name, "Created file record");
        }

        Ok((file, inserted > 0))
    }

    fn get_or_create_file_snapshot(
        &self,
        file: &FileRecord,
        step: &DevelopmentStep,
        content: &str,
    ) -> Result<(FileSnapshot, bool)> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let inserted = conn.execute(
            "INSERT INTO file_snapshots (id, file_id, development_step_id, content, created_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT (file_id, development_step_id) DO NOTHING",
            (
                Uuid::new_v4().to_string(),
                file.id.to_string(),
                step.id.to_string(),
                content,
                Utc::now().to_rfc3339(),
            ),
        )?;

        let snapshot = conn
            .query_row(
                "SELECT id, file_id, development_step_id, content, created_at
                 FROM file_snapshots WHERE file_id = ? AND development_step_id = ?",
                (file.id.to_string(), step.id.to_string()),
                |row| snapshot_from_row(row, 0),
            )
            .optional()?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Snapshot of '{}' at step '{}' missing after insert",
                    file.relative_path(),
                    step.key
                )
            })?;

        Ok((snapshot, inserted > 0))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn query_development_step(conn: &Connection, key: &str) -> Result<Option<DevelopmentStep>> {
    let step = conn
        .query_row(
            "SELECT id, key, created_at FROM development_steps WHERE key = ?",
            [key],
            |row| {
                Ok(DevelopmentStep {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    key: row.get(1)?,
                    created_at: parse_datetime(row.get::<_, String>(2)?),
                })
            },
        )
        .optional()?;
    Ok(step)
}

fn query_file(conn: &Connection, path: &str, name: &str) -> Result<Option<FileRecord>> {
    let file = conn
        .query_row(
            "SELECT id, path, name, full_path, created_at FROM files WHERE path = ? AND name = ?",
            [path, name],
            |row| file_from_row(row, 0),
        )
        .optional()?;
    Ok(file)
}

fn file_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<FileRecord> {
    Ok(FileRecord {
        id: parse_uuid(row.get::<_, String>(offset)?),
        path: row.get(offset + 1)?,
        name: row.get(offset + 2)?,
        full_path: row.get(offset + 3)?,
        created_at: parse_datetime(row.get::<_, String>(offset + 4)?),
    })
}

fn snapshot_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<FileSnapshot> {
    Ok(FileSnapshot {
        id: parse_uuid(row.get::<_, String>(offset)?),
        file_id: parse_uuid(row.get::<_, String>(offset + 1)?),
        development_step_id: parse_uuid(row.get::<_, String>(offset + 2)?),
        content: row.get(offset + 3)?,
        created_at: parse_datetime(row.get::<_, String>(offset + 4)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
