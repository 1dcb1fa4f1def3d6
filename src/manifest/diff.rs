use crate::declaration::Category;
use crate::error::ManifestError;
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

/// Builds the error raised when two nodes of one category share an id.
pub(super) fn duplicate_identifier<F: Serialize>(
    category: Category,
    id: &str,
    existing: &F,
    conflicting: &F,
) -> ManifestError {
    let rendered = serde_json::to_value(existing)
        .and_then(|left| serde_json::to_value(conflicting).map(|right| (left, right)));
    match rendered {
        Ok((left, right)) => ManifestError::DuplicateIdentifier {
            category,
            id: id.to_string(),
            diff: render_diff(&left, &right),
        },
        Err(e) => ManifestError::Serialization {
            category,
            id: id.to_string(),
            message: e.to_string(),
        },
    }
}

/// Lists the top-level fields that differ between two fragments, in the
/// order they first appear.
pub(super) fn render_diff(existing: &Value, conflicting: &Value) -> String {
    if existing == conflicting {
        return "  (both definitions are identical)".to_string();
    }
    match (existing.as_object(), conflicting.as_object()) {
        (Some(left), Some(right)) => left
            .keys()
            .chain(right.keys())
            .unique()
            .filter(|key| left.get(*key) != right.get(*key))
            .map(|key| {
                format!(
                    "  {}:\n    - {}\n    + {}",
                    key,
                    show(left.get(key)),
                    show(right.get(key))
                )
            })
            .join("\n"),
        _ => format!("    - {}\n    + {}", existing, conflicting),
    }
}

fn show(value: Option<&Value>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
