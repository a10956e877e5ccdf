use crate::model::{ActionType, Edge, GraphError, NewWorkflow, Node, Position, WorkflowGraph};

/// Start → swap 1 SOL for USDC → End.
pub fn example_graph() -> Result<WorkflowGraph, GraphError> {
    let nodes = vec![
        Node::start("start").with_position(Position::new(100.0, 200.0)),
        Node::action("swap", ActionType::DefiSwap)
            .with_label("Swap SOL to USDC")
            .with_position(Position::new(350.0, 200.0))
            .with_config("inputToken", "SOL")
            .with_config("outputToken", "USDC")
            .with_config("amount", "1")
            .with_config("protocol", "jupiter"),
        Node::end("end").with_position(Position::new(600.0, 200.0)),
    ];
    let edges = vec![
        Edge::new("e-start-swap", "start", "swap"),
        Edge::new("e-swap-end", "swap", "end"),
    ];
    WorkflowGraph::from_parts(nodes, edges)
}

pub fn example_workflow() -> Result<NewWorkflow, GraphError> {
    Ok(NewWorkflow::from_graph(
        "SOL to USDC swap",
        Some("Swap 1 SOL for USDC on devnet with 0.5% slippage tolerance.".to_string()),
        &example_graph()?,
    ))
}

/// Print an example workflow JSON to stdout.
pub fn run() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&example_workflow()?)?;
    println!("{json}");
    Ok(())
}
