use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::model::{NewWorkflow, Workflow, WorkflowPatch};

use super::{StoreError, WorkflowStore, check_new, now};

const COLUMNS: &str = "id, name, description, nodes, edges, created, updated";

/// SQLite-backed store. Nodes and edges are stored as JSON text.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Invalid(format!("creating {}: {e}", parent.display())))?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn migrate(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS workflows (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            description TEXT,
            nodes       TEXT NOT NULL,
            edges       TEXT NOT NULL,
            created     TEXT NOT NULL,
            updated     TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Raw row; JSON columns are decoded outside the rusqlite callback.
struct StoredRow {
    id: i64,
    name: String,
    description: Option<String>,
    nodes: String,
    edges: String,
    created: String,
    updated: String,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            nodes: row.get(3)?,
            edges: row.get(4)?,
            created: row.get(5)?,
            updated: row.get(6)?,
        })
    }

    fn decode(self) -> Result<Workflow, StoreError> {
        Ok(Workflow {
            id: self.id,
            name: self.name,
            description: self.description,
            nodes: serde_json::from_str(&self.nodes)?,
            edges: serde_json::from_str(&self.edges)?,
            created: self.created,
            updated: self.updated,
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Workflow>, StoreError> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM workflows WHERE id = ?1"),
            [id],
            StoredRow::from_row,
        )
        .optional()?;
    row.map(StoredRow::decode).transpose()
}

impl WorkflowStore for SqliteStore {
    fn list(&self) -> Result<Vec<Workflow>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM workflows ORDER BY id"))?;
        let rows = stmt
            .query_map([], StoredRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(StoredRow::decode).collect()
    }

    fn get(&self, id: i64) -> Result<Option<Workflow>, StoreError> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    fn create(&self, workflow: NewWorkflow) -> Result<Workflow, StoreError> {
        check_new(&workflow)?;
        let nodes = serde_json::to_string(&workflow.nodes)?;
        let edges = serde_json::to_string(&workflow.edges)?;
        let stamp = now();

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO workflows (name, description, nodes, edges, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![workflow.name, workflow.description, nodes, edges, stamp],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %workflow.name, "created workflow");

        Ok(Workflow {
            id,
            name: workflow.name,
            description: workflow.description,
            nodes: workflow.nodes,
            edges: workflow.edges,
            created: stamp.clone(),
            updated: stamp,
        })
    }

    fn update(&self, id: i64, patch: WorkflowPatch) -> Result<Option<Workflow>, StoreError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(StoreError::Invalid("Name is required".to_string()));
        }
        let conn = self.lock()?;
        let Some(mut workflow) = fetch(&conn, id)? else {
            return Ok(None);
        };
        patch.apply(&mut workflow)?;
        workflow.updated = now();

        conn.execute(
            "UPDATE workflows
             SET name = ?1, description = ?2, nodes = ?3, edges = ?4, updated = ?5
             WHERE id = ?6",
            params![
                workflow.name,
                workflow.description,
                serde_json::to_string(&workflow.nodes)?,
                serde_json::to_string(&workflow.edges)?,
                workflow.updated,
                id
            ],
        )?;
        Ok(Some(workflow))
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.lock()?;
        let n = conn.execute("DELETE FROM workflows WHERE id = ?1", [id])?;
        Ok(n > 0)
    }
}
