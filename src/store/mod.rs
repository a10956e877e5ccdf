//! Workflow persistence. The graph core only touches storage when a
//! workflow is loaded or saved.

pub mod memory;
pub mod sqlite;

use thiserror::Error;

use crate::model::{GraphError, NewWorkflow, Workflow, WorkflowPatch};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored JSON is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid workflow graph: {0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Invalid(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// CRUD over saved workflows. Missing ids are `None`/`false`, not errors.
pub trait WorkflowStore: Send + Sync {
    fn list(&self) -> Result<Vec<Workflow>, StoreError>;
    fn get(&self, id: i64) -> Result<Option<Workflow>, StoreError>;
    fn create(&self, workflow: NewWorkflow) -> Result<Workflow, StoreError>;
    fn update(&self, id: i64, patch: WorkflowPatch) -> Result<Option<Workflow>, StoreError>;
    fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// Checks shared by every backend before a workflow is written.
fn check_new(workflow: &NewWorkflow) -> Result<(), StoreError> {
    if workflow.name.trim().is_empty() {
        return Err(StoreError::Invalid("Name is required".to_string()));
    }
    workflow.graph()?;
    Ok(())
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
