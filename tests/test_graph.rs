use defi_canvas::model::{ActionType, Edge, GraphError, Node, NodeCategory, Position, WorkflowGraph};

// ── Helpers ─────────────────────────────────────────────────────────

fn chain() -> WorkflowGraph {
    WorkflowGraph::from_parts(
        vec![
            Node::start("x"),
            Node::action("a", ActionType::DefiSwap),
            Node::end("y"),
        ],
        vec![Edge::new("x-a", "x", "a"), Edge::new("a-y", "a", "y")],
    )
    .unwrap()
}

// ── Cascade delete ──────────────────────────────────────────────────

#[test]
fn remove_node_cascades_to_incident_edges() {
    let mut graph = chain();
    assert_eq!(graph.incoming_edges("y").len(), 1);

    let removed = graph.remove_node("a").unwrap();
    assert_eq!(removed.id, "a");

    assert!(graph.incoming_edges("y").iter().all(|e| e.source != "a"));
    assert!(graph.outgoing_edges("x").is_empty());
    assert!(graph.edges().iter().all(|e| !e.touches("a")));
    assert!(!graph.contains_edge("x-a"));
    assert!(!graph.contains_edge("a-y"));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn remove_missing_node_is_none() {
    let mut graph = chain();
    assert!(graph.remove_node("nope").is_none());
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn removed_ids_can_be_reused() {
    let mut graph = chain();
    graph.remove_node("a");
    graph.add_node(Node::action("a", ActionType::Stake)).unwrap();
    graph.add_edge(Edge::new("x-a", "x", "a")).unwrap();
    assert_eq!(graph.node("a").unwrap().action_type(), Some(ActionType::Stake));
    assert_eq!(graph.outgoing_edges("x").len(), 1);
}

// ── Referential integrity ───────────────────────────────────────────

#[test]
fn dangling_edge_is_rejected() {
    let mut graph = chain();
    let err = graph.add_edge(Edge::new("bad", "a", "ghost")).unwrap_err();
    assert!(matches!(err, GraphError::InvalidEdge { node_id, .. } if node_id == "ghost"));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut graph = chain();
    assert!(matches!(
        graph.add_node(Node::end("y")),
        Err(GraphError::DuplicateNode { .. })
    ));
    assert!(matches!(
        graph.add_edge(Edge::new("a-y", "x", "y")),
        Err(GraphError::DuplicateEdge { .. })
    ));
}

#[test]
fn from_parts_rejects_dangling_edges() {
    let result = WorkflowGraph::from_parts(vec![Node::start("s")], vec![Edge::new("e", "s", "missing")]);
    assert!(result.is_err());
}

// ── Lookups ─────────────────────────────────────────────────────────

#[test]
fn edges_keep_insertion_order() {
    let mut graph = WorkflowGraph::new();
    graph.add_node(Node::start("s")).unwrap();
    for id in ["c", "a", "b"] {
        graph.add_node(Node::action(id, ActionType::Claim)).unwrap();
        graph.add_edge(Edge::new(format!("s-{id}"), "s", id)).unwrap();
    }
    let targets: Vec<&str> = graph.outgoing_edges("s").iter().map(|e| e.target.as_str()).collect();
    assert_eq!(targets, ["c", "a", "b"]);

    let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["s", "c", "a", "b"]);
}

#[test]
fn nodes_of_kind_and_start_nodes() {
    let graph = chain();
    assert_eq!(graph.nodes_of_kind(NodeCategory::Action).len(), 1);
    assert_eq!(graph.nodes_of_kind(NodeCategory::StartEnd).len(), 2);
    assert_eq!(graph.nodes_of_kind(NodeCategory::Condition).len(), 0);
    let starts = graph.start_nodes();
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].id, "x");
}

#[test]
fn reachable_from_follows_edges() {
    let mut graph = chain();
    graph.add_node(Node::action("island", ActionType::Lightning)).unwrap();
    let reach = graph.reachable_from("x");
    assert!(reach.contains("a"));
    assert!(reach.contains("y"));
    assert!(!reach.contains("island"));
}

// ── Edits ───────────────────────────────────────────────────────────

#[test]
fn merge_config_only_on_action_nodes() {
    let mut graph = chain();
    let mut patch = serde_json::Map::new();
    patch.insert("amount".into(), "2.5".into());
    graph.merge_config("a", patch.clone()).unwrap();
    assert_eq!(graph.node("a").unwrap().config().unwrap()["amount"], "2.5");

    assert!(matches!(
        graph.merge_config("x", patch.clone()),
        Err(GraphError::NotConfigurable { .. })
    ));
    assert!(matches!(
        graph.merge_config("ghost", patch),
        Err(GraphError::UnknownNode { .. })
    ));
}

#[test]
fn label_and_position_updates() {
    let mut graph = chain();
    graph.set_label("a", "Big swap").unwrap();
    graph.set_position("a", Position::new(10.0, 20.0)).unwrap();
    let node = graph.node("a").unwrap();
    assert_eq!(node.label, "Big swap");
    assert_eq!(node.position, Position::new(10.0, 20.0));
}

#[test]
fn serde_goes_through_the_document() {
    let graph = chain();
    let json = serde_json::to_string(&graph).unwrap();
    let back: WorkflowGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_parts(), graph.to_parts());

    let dangling = r#"{"nodes":[{"id":"s","label":"Start","kind":"startEnd","subType":"start"}],
                       "edges":[{"id":"e","source":"s","target":"nowhere"}]}"#;
    assert!(serde_json::from_str::<WorkflowGraph>(dangling).is_err());
}
