//! JSON rendering of canonical nodes.
//!
//! Used for mapping-key labels, divergence fragments and assertion messages.
//! Nothing rendered here can carry an identity: cycle markers become a fixed
//! string and objects are rendered by content only.

use serde_json::{Map, Number, Value as Json};

use super::tree::{CanonId, CanonNode};
use crate::model::Scalar;

/// Rendering of a cycle marker.
pub const CYCLE_MARKER: &str = "<circular reference>";

/// Rendering of anything below [`RENDER_DEPTH_LIMIT`].
pub const TRUNCATED_MARKER: &str = "<truncated>";

/// Deepest level rendered. Bounds native recursion here and in `serde_json`.
pub const RENDER_DEPTH_LIMIT: usize = 256;

pub(crate) fn render(nodes: &[CanonNode], id: CanonId) -> Json {
    render_at(nodes, id, 0)
}

/// Compact single-line rendering.
pub(crate) fn render_compact(nodes: &[CanonNode], id: CanonId) -> String {
    render(nodes, id).to_string()
}

fn render_at(nodes: &[CanonNode], id: CanonId, depth: usize) -> Json {
    if depth >= RENDER_DEPTH_LIMIT {
        return Json::String(TRUNCATED_MARKER.to_string());
    }
    match &nodes[id.0] {
        CanonNode::Null => Json::Null,
        CanonNode::Scalar(scalar) => scalar_to_json(scalar),
        CanonNode::Opaque(json) => json.clone(),
        CanonNode::Cycle => Json::String(CYCLE_MARKER.to_string()),
        CanonNode::Composite { fields, .. } => {
            let mut map = Map::new();
            for (name, child) in fields {
                map.insert(name.clone(), render_at(nodes, *child, depth + 1));
            }
            Json::Object(map)
        }
        CanonNode::Sequence { items } => Json::Array(
            items
                .iter()
                .map(|child| render_at(nodes, *child, depth + 1))
                .collect(),
        ),
        CanonNode::Mapping { entries } => {
            let mut map = Map::new();
            for entry in entries {
                let mut label = entry.label.clone();
                let mut n = 2;
                while map.contains_key(&label) {
                    label = format!("{}#{}", entry.label, n);
                    n += 1;
                }
                map.insert(label, render_at(nodes, entry.value, depth + 1));
            }
            Json::Object(map)
        }
    }
}

fn scalar_to_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::Bool(v) => Json::Bool(*v),
        Scalar::Int(v) => Json::from(*v),
        Scalar::UInt(v) => Json::from(*v),
        Scalar::Float(v) => Number::from_f64(*v)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(v.to_string())),
        Scalar::Char(v) => Json::String(v.to_string()),
        Scalar::Str(v) => Json::String(v.clone()),
        Scalar::Enum { type_name, variant } => {
            Json::String(format!("{}.{}", type_name, variant))
        }
    }
}

/// Label of a mapping key: a string key is its own label, anything else is
/// its compact JSON.
pub(crate) fn key_label(nodes: &[CanonNode], id: CanonId) -> String {
    match &nodes[id.0] {
        CanonNode::Scalar(Scalar::Str(s)) => s.clone(),
        _ => render_compact(nodes, id),
    }
}

/// Type-preserving signature of a subtree.
///
/// Unlike the plain rendering it keeps scalar type tags and composite type
/// names, so two subtrees have the same signature only when they compare
/// equal. Used to order mapping entries whose labels collide.
pub(crate) fn signature(nodes: &[CanonNode], id: CanonId) -> String {
    signature_at(nodes, id, 0).to_string()
}

fn signature_at(nodes: &[CanonNode], id: CanonId, depth: usize) -> Json {
    if depth >= RENDER_DEPTH_LIMIT {
        return Json::String(TRUNCATED_MARKER.to_string());
    }
    match &nodes[id.0] {
        CanonNode::Null => Json::Null,
        CanonNode::Scalar(scalar) => Json::Array(vec![
            Json::String(scalar.type_tag().to_string()),
            scalar_to_json(scalar),
        ]),
        CanonNode::Opaque(json) => Json::Array(vec![Json::String("custom".into()), json.clone()]),
        CanonNode::Cycle => Json::Array(vec![Json::String("cycle".into())]),
        CanonNode::Composite { type_name, fields } => {
            let mut map = Map::new();
            for (name, child) in fields {
                map.insert(name.clone(), signature_at(nodes, *child, depth + 1));
            }
            Json::Array(vec![Json::String(type_name.clone()), Json::Object(map)])
        }
        CanonNode::Sequence { items } => Json::Array(vec![
            Json::String("sequence".into()),
            Json::Array(
                items
                    .iter()
                    .map(|child| signature_at(nodes, *child, depth + 1))
                    .collect(),
            ),
        ]),
        CanonNode::Mapping { entries } => Json::Array(vec![
            Json::String("mapping".into()),
            Json::Array(
                entries
                    .iter()
                    .map(|e| {
                        Json::Array(vec![
                            signature_at(nodes, e.key, depth + 1),
                            signature_at(nodes, e.value, depth + 1),
                        ])
                    })
                    .collect(),
            ),
        ]),
    }
}
