use defi_canvas::example::example_workflow;
use defi_canvas::model::{Edge, NewWorkflow, Node, WorkflowPatch};
use defi_canvas::store::{MemoryStore, SqliteStore, StoreError, WorkflowStore};

// ── Shared behavior ─────────────────────────────────────────────────

fn exercise_crud(store: &dyn WorkflowStore) {
    assert!(store.list().unwrap().is_empty());

    let saved = store.create(example_workflow().unwrap()).unwrap();
    assert_eq!(saved.name, "SOL to USDC swap");
    assert_eq!(saved.nodes.len(), 3);
    assert_eq!(saved.created, saved.updated);

    let fetched = store.get(saved.id).unwrap().unwrap();
    assert_eq!(fetched, saved);
    assert_eq!(fetched.graph().unwrap().edge_count(), 2);

    let second = store
        .create(NewWorkflow {
            name: "blank".into(),
            ..Default::default()
        })
        .unwrap();
    assert_ne!(second.id, saved.id);
    let ids: Vec<i64> = store.list().unwrap().iter().map(|w| w.id).collect();
    assert_eq!(ids, [saved.id, second.id]);

    let updated = store
        .update(
            saved.id,
            WorkflowPatch {
                name: Some("renamed".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.nodes, saved.nodes);
    assert_eq!(updated.created, saved.created);
    assert_eq!(updated.description, saved.description);

    let cleared: WorkflowPatch = serde_json::from_str(r#"{ "description": null }"#).unwrap();
    let updated = store.update(saved.id, cleared).unwrap().unwrap();
    assert_eq!(updated.name, "renamed");
    assert!(updated.description.is_none());
    assert!(store.get(saved.id).unwrap().unwrap().description.is_none());

    assert!(store.delete(saved.id).unwrap());
    assert!(!store.delete(saved.id).unwrap());
    assert!(store.get(saved.id).unwrap().is_none());
    assert!(store.update(saved.id, WorkflowPatch::default()).unwrap().is_none());
}

fn exercise_rejections(store: &dyn WorkflowStore) {
    let unnamed = NewWorkflow {
        name: "  ".into(),
        ..Default::default()
    };
    assert!(matches!(store.create(unnamed), Err(StoreError::Invalid(_))));

    let dangling = NewWorkflow {
        name: "broken".into(),
        nodes: vec![Node::start("s")],
        edges: vec![Edge::new("e", "s", "ghost")],
        ..Default::default()
    };
    assert!(matches!(store.create(dangling), Err(StoreError::Graph(_))));

    let saved = store.create(example_workflow().unwrap()).unwrap();
    let bad_patch = WorkflowPatch {
        edges: Some(vec![Edge::new("e", "start", "ghost")]),
        ..Default::default()
    };
    assert!(matches!(store.update(saved.id, bad_patch), Err(StoreError::Graph(_))));
    assert_eq!(store.get(saved.id).unwrap().unwrap().edges, saved.edges);

    let blank_name = WorkflowPatch {
        name: Some(String::new()),
        ..Default::default()
    };
    assert!(matches!(store.update(saved.id, blank_name), Err(StoreError::Invalid(_))));
}

// ── Patch wire format ───────────────────────────────────────────────

#[test]
fn patch_distinguishes_absent_from_null_description() {
    let absent: WorkflowPatch = serde_json::from_str(r#"{ "name": "x" }"#).unwrap();
    assert_eq!(absent.description, None);

    let null: WorkflowPatch = serde_json::from_str(r#"{ "description": null }"#).unwrap();
    assert_eq!(null.description, Some(None));

    let set: WorkflowPatch = serde_json::from_str(r#"{ "description": "d" }"#).unwrap();
    assert_eq!(set.description, Some(Some("d".to_string())));

    let json = serde_json::to_value(&null).unwrap();
    assert_eq!(json, serde_json::json!({ "description": null }));
}

// ── Backends ────────────────────────────────────────────────────────

#[test]
fn memory_store_crud() {
    exercise_crud(&MemoryStore::new());
    exercise_rejections(&MemoryStore::new());
}

#[test]
fn sqlite_in_memory_crud() {
    exercise_crud(&SqliteStore::open_in_memory().unwrap());
    exercise_rejections(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("canvas.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        store.create(example_workflow().unwrap()).unwrap().id
    };

    let store = SqliteStore::open(&path).unwrap();
    let workflow = store.get(id).unwrap().unwrap();
    assert_eq!(workflow.name, "SOL to USDC swap");
    assert_eq!(workflow.nodes, example_workflow().unwrap().nodes);
}
