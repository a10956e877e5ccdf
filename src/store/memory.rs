use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::model::{NewWorkflow, Workflow, WorkflowPatch};

use super::{StoreError, WorkflowStore, check_new, now};

/// Process-local store for `--in-memory` servers and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    workflows: BTreeMap<i64, Workflow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl WorkflowStore for MemoryStore {
    fn list(&self) -> Result<Vec<Workflow>, StoreError> {
        Ok(self.lock()?.workflows.values().cloned().collect())
    }

    fn get(&self, id: i64) -> Result<Option<Workflow>, StoreError> {
        Ok(self.lock()?.workflows.get(&id).cloned())
    }

    fn create(&self, workflow: NewWorkflow) -> Result<Workflow, StoreError> {
        check_new(&workflow)?;
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let stamp = now();
        let saved = Workflow {
            id: inner.next_id,
            name: workflow.name,
            description: workflow.description,
            nodes: workflow.nodes,
            edges: workflow.edges,
            created: stamp.clone(),
            updated: stamp,
        };
        inner.workflows.insert(saved.id, saved.clone());
        Ok(saved)
    }

    fn update(&self, id: i64, patch: WorkflowPatch) -> Result<Option<Workflow>, StoreError> {
        let mut inner = self.lock()?;
        let Some(existing) = inner.workflows.get_mut(&id) else {
            return Ok(None);
        };
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(StoreError::Invalid("Name is required".to_string()));
        }
        patch.apply(existing)?;
        existing.updated = now();
        Ok(Some(existing.clone()))
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.lock()?.workflows.remove(&id).is_some())
    }
}
