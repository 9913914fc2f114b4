//! The `explain` use case: look up rule documentation.

use regelguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes available tree keys and rule tags.
    NotFound {
        identifier: String,
        available_tree_keys: &'static [&'static str],
        available_tags: &'static [&'static str],
    },
}

/// Look up an explanation for a tree key or rule tag.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_tree_keys: explain::all_tree_keys(),
            available_tags: explain::all_tags(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Hjemmel\n");
    out.push_str("-------\n");
    if exp.hjemmel.is_empty() {
        out.push_str("None; administrative rule.");
    } else {
        out.push_str(exp.hjemmel);
    }
    out.push_str("\n\n");
    out.push_str("Guidance\n");
    out.push_str("--------\n");
    out.push_str(exp.guidance);
    out.push('\n');

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    tree_keys: &[&'static str],
    tags: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown tree key or rule tag: {}\n\n", identifier));
    out.push_str("Available tree keys:\n");
    for key in tree_keys {
        out.push_str(&format!("  - {}\n", key));
    }
    out.push_str("\nAvailable rule tags:\n");
    for tag in tags {
        out.push_str(&format!("  - {}\n", tag));
    }

    out
}
