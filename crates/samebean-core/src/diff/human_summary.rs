//! Human-readable summary renderer for diff results.

use crate::diff::model::{DiffResult, Divergence};

/// Render a human-readable summary of a [`DiffResult`].
///
/// One line per divergence: path, classification, then the expected and
/// actual fragments as compact JSON (`<absent>` for a missing side).
pub fn render_human_summary(result: &DiffResult) -> String {
    let divergences = match result {
        DiffResult::Equal => return "Values are equivalent\n".to_string(),
        DiffResult::Diverged(divergences) => divergences,
    };

    let mut out = String::new();
    let noun = if divergences.len() == 1 {
        "divergence"
    } else {
        "divergences"
    };
    out.push_str(&format!("{} {}\n", divergences.len(), noun));
    for divergence in divergences {
        out.push_str(&render_divergence(divergence));
        out.push('\n');
    }
    out
}

/// Render one divergence on a single line.
pub fn render_divergence(divergence: &Divergence) -> String {
    format!(
        "  at {}: {} (expected: {}, actual: {})",
        divergence.path,
        divergence.kind,
        fragment(divergence.expected.as_ref()),
        fragment(divergence.actual.as_ref()),
    )
}

fn fragment(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<absent>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{DiffPath, DivergenceKind, PathSegment};
    use serde_json::json;

    #[test]
    fn test_equal_summary() {
        assert_eq!(
            render_human_summary(&DiffResult::Equal),
            "Values are equivalent\n"
        );
    }

    #[test]
    fn test_divergence_lines() {
        let result = DiffResult::Diverged(vec![
            Divergence {
                path: DiffPath(vec![PathSegment::Field("name".to_string())]),
                kind: DivergenceKind::ValueMismatch,
                expected: Some(json!("parent")),
                actual: Some(json!("child")),
            },
            Divergence {
                path: DiffPath(vec![PathSegment::Field("extra".to_string())]),
                kind: DivergenceKind::UnexpectedEntry,
                expected: None,
                actual: Some(json!(1)),
            },
        ]);
        let text = render_human_summary(&result);
        assert_eq!(
            text,
            "2 divergences\n\
             \x20 at $.name: values differ (expected: \"parent\", actual: \"child\")\n\
             \x20 at $.extra: unexpected in actual (expected: <absent>, actual: 1)\n"
        );
    }
}
