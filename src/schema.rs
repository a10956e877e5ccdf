use schemars::schema_for;

use crate::model::NewWorkflow;

/// JSON Schema of a workflow document, pretty-printed.
pub fn get_schema_json() -> String {
    let schema = schema_for!(NewWorkflow);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

/// Generate and print the JSON Schema for workflow documents.
pub fn run() -> anyhow::Result<()> {
    println!("{}", get_schema_json());
    Ok(())
}
