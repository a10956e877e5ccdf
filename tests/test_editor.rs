use defi_canvas::editor::{EditorError, EditorSession};
use defi_canvas::model::{ActionType, Config, Position, Workflow};
use defi_canvas::validate::ErrorKind;

fn origin() -> Position {
    Position::default()
}

/// Start -> Token Swap -> End, built the way the canvas does it.
fn swap_session() -> (EditorSession, String, String, String) {
    let mut session = EditorSession::new("Swap");
    let start = session.drop_template("startEndNode-start", origin()).unwrap();
    let swap = session.drop_template("actionNode-defiSwap", Position::new(200.0, 0.0)).unwrap();
    let end = session.drop_template("startEndNode-end", Position::new(400.0, 0.0)).unwrap();
    session.connect(&start, &swap, None).unwrap();
    session.connect(&swap, &end, None).unwrap();
    (session, start, swap, end)
}

fn swap_config() -> Config {
    let mut config = Config::new();
    config.insert("inputToken".into(), "SOL".into());
    config.insert("outputToken".into(), "USDC".into());
    config.insert("amount".into(), "1".into());
    config
}

#[test]
fn dropped_nodes_get_fresh_ids_and_defaults() {
    let (session, start, swap, end) = swap_session();
    assert_ne!(start, swap);
    assert_ne!(swap, end);

    let node = session.graph().node(&swap).unwrap();
    assert_eq!(node.action_type(), Some(ActionType::DefiSwap));
    assert_eq!(node.label, "Token Swap");
    assert_eq!(node.position, Position::new(200.0, 0.0));
    assert_eq!(node.config().unwrap()["slippageBps"], "50");
    assert!(session.is_dirty());
}

#[test]
fn unknown_template_is_rejected() {
    let mut session = EditorSession::new("x");
    assert!(matches!(
        session.drop_template("actionNode-teleport", origin()),
        Err(EditorError::UnknownTemplate(_))
    ));
    assert!(session.graph().is_empty());
}

#[test]
fn config_edits_clear_property_errors() {
    let (mut session, _, swap, _) = swap_session();
    let before = session.validate();
    assert_eq!(before.errors_of(ErrorKind::Property).count(), 3);

    session.update_config(&swap, swap_config()).unwrap();
    let after = session.validate();
    assert!(after.valid(), "{:?}", after.errors);

    let steps = session.preview().unwrap();
    assert_eq!(steps.len(), 2);
    assert!(steps[0].details.contains("Amount: 1"));
}

#[test]
fn deleting_selected_node_clears_selection_and_edges() {
    let (mut session, start, swap, end) = swap_session();
    session.select(&swap).unwrap();
    assert_eq!(session.selected_node().unwrap().id, swap);

    session.delete_node(&swap).unwrap();
    assert!(session.selected_node().is_none());
    assert!(session.graph().outgoing_edges(&start).is_empty());
    assert!(session.graph().incoming_edges(&end).is_empty());
    assert_eq!(session.graph().edge_count(), 0);
}

#[test]
fn select_unknown_node_fails() {
    let mut session = EditorSession::new("x");
    assert!(session.select("node-99").is_err());
}

#[test]
fn connect_rejects_unknown_endpoints() {
    let (mut session, start, _, _) = swap_session();
    let edges = session.graph().edge_count();
    assert!(session.connect(&start, "node-404", None).is_err());
    assert_eq!(session.graph().edge_count(), edges);
}

#[test]
fn condition_branches_keep_their_handles() {
    let mut session = EditorSession::new("branch");
    let start = session.drop_template("startEndNode-start", origin()).unwrap();
    let cond = session.drop_template("conditionNode", origin()).unwrap();
    let claim = session.drop_template("actionNode-claim", origin()).unwrap();
    session.connect(&start, &cond, None).unwrap();
    let edge = session.connect(&cond, &claim, Some("true".into())).unwrap();
    session.set_condition(&cond, Some("price > 100".into())).unwrap();

    assert_eq!(session.graph().edge(&edge).unwrap().source_handle.as_deref(), Some("true"));
    let steps = session.preview().unwrap();
    assert_eq!(steps[0].details, "price > 100");

    // Only condition nodes take an expression.
    assert!(session.set_condition(&claim, Some("x".into())).is_err());
}

#[test]
fn moving_is_not_an_edit() {
    let (mut session, _, swap, _) = swap_session();
    session.mark_saved(7);
    assert!(!session.is_dirty());

    session.move_node(&swap, Position::new(5.0, 5.0)).unwrap();
    assert!(!session.is_dirty());

    session.rename_node(&swap, "Buy USDC").unwrap();
    assert!(session.is_dirty());
    assert_eq!(session.workflow_id(), Some(7));
}

#[test]
fn save_and_reload_round_trip() {
    let (mut session, _, swap, _) = swap_session();
    session.update_config(&swap, swap_config()).unwrap();
    session.set_description(Some("demo".into()));

    let new = session.to_new_workflow();
    assert_eq!(new.name, "Swap");
    assert_eq!(new.description.as_deref(), Some("demo"));

    let saved = Workflow {
        id: 3,
        name: new.name,
        description: new.description,
        nodes: new.nodes,
        edges: new.edges,
        created: "2026-01-01T00:00:00Z".into(),
        updated: "2026-01-01T00:00:00Z".into(),
    };
    let mut reloaded = EditorSession::load(&saved).unwrap();
    assert_eq!(reloaded.workflow_id(), Some(3));
    assert!(!reloaded.is_dirty());
    assert_eq!(reloaded.graph().to_parts(), session.graph().to_parts());

    // Ids handed out after a reload never collide with loaded ones.
    let extra = reloaded.drop_template("actionNode-stake", origin()).unwrap();
    assert!(!session.graph().contains_node(&extra));

    let patch = reloaded.to_patch();
    assert_eq!(patch.nodes.as_ref().unwrap().len(), 4);
    assert_eq!(patch.description, Some(Some("demo".to_string())));

    // Clearing the description in the editor clears it on save.
    reloaded.set_description(None);
    let mut stored = saved.clone();
    reloaded.to_patch().apply(&mut stored).unwrap();
    assert!(stored.description.is_none());
}
