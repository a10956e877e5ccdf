use crate::engine::build_preview;
use crate::model::{GraphDocument, NodeTemplate, WorkflowGraph};
use crate::validate;
use wasm_bindgen::prelude::*;

fn parse_graph(json: &str) -> Result<WorkflowGraph, String> {
    let doc: GraphDocument = serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
    WorkflowGraph::try_from(doc).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn validate_workflow_json(json: &str) -> String {
    let graph = match parse_graph(json) {
        Ok(g) => g,
        Err(e) => {
            return serde_json::json!({
                "valid": false,
                "errors": [{ "kind": "general", "message": e }],
                "warnings": []
            })
            .to_string();
        }
    };
    let report = validate::validate(&graph).report();
    serde_json::to_string(&report).unwrap_or_default()
}

#[wasm_bindgen]
pub fn preview_workflow_json(json: &str) -> String {
    let result = parse_graph(json).and_then(|g| build_preview(&g).map_err(|e| e.to_string()));
    match result {
        Ok(steps) => serde_json::json!({ "steps": steps }).to_string(),
        Err(e) => serde_json::json!({ "error": e }).to_string(),
    }
}

#[wasm_bindgen]
pub fn list_templates() -> String {
    serde_json::to_string(&NodeTemplate::all()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_schema() -> String {
    crate::schema::get_schema_json()
}
