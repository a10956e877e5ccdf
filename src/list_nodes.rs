use std::fmt::Write;

use crate::model::action::{ParamType, Preset};
use crate::model::{ActionType, NodeTemplate, TemplateKind};

/// Human-readable listing of every node template and, for actions, its
/// parameters.
pub fn listing() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available Node Types");
    let _ = writeln!(out, "====================");

    for (i, template) in NodeTemplate::all().iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {} [{}]", i + 1, template.label, template.id);
        let _ = writeln!(out, "   {}", template.description);

        let TemplateKind::Action(action) = template.kind else {
            continue;
        };
        write_params(&mut out, action);
    }
    out
}

fn write_params(out: &mut String, action: ActionType) {
    let _ = writeln!(out, "   Parameters:");
    for p in action.params() {
        let kind = match p.param_type {
            ParamType::Text => "text",
            ParamType::Textarea => "textarea",
            ParamType::Select => "select",
            ParamType::Switch => "switch",
            ParamType::Json => "json",
        };
        let mut line = format!("     - {:<16} {:<9}", p.key, kind);
        if p.required {
            line.push_str(" required");
        }
        if !p.options.is_empty() {
            let _ = write!(line, " ({})", p.options.join(" | "));
        }
        match p.default {
            Some(Preset::Text(v)) => {
                let _ = write!(line, " default: {v:?}");
            }
            Some(Preset::Flag(v)) => {
                let _ = write!(line, " default: {v}");
            }
            None => {}
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Print a human-readable listing of all available node types and their parameters.
pub fn run() -> anyhow::Result<()> {
    print!("{}", listing());
    Ok(())
}
