//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Fragments are canonical JSON and never contain identity material.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::Result;

/// One step from the root to a divergence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "at")]
pub enum PathSegment {
    /// Composite field name
    Field(String),
    /// Sequence index
    Index(usize),
    /// Mapping key label
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Key(label) => write!(f, "[{:?}]", label),
        }
    }
}

/// Location of a divergence, rendered as `$.field[3]["key"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DiffPath(pub Vec<PathSegment>);

impl DiffPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiffPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Classification of a divergence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum DivergenceKind {
    /// Different shapes, e.g. null vs object or sequence vs mapping
    KindMismatch { expected: String, actual: String },
    /// Same shape, different runtime types
    TypeMismatch { expected: String, actual: String },
    /// Same type, different value
    ValueMismatch,
    /// Sequences of different lengths
    LengthMismatch { expected: usize, actual: usize },
    /// Present in expected only
    MissingEntry,
    /// Present in actual only
    UnexpectedEntry,
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceKind::KindMismatch { expected, actual } => {
                write!(f, "expected {} but was {}", expected, actual)
            }
            DivergenceKind::TypeMismatch { expected, actual } => {
                write!(f, "expected type {} but was {}", expected, actual)
            }
            DivergenceKind::ValueMismatch => f.write_str("values differ"),
            DivergenceKind::LengthMismatch { expected, actual } => {
                write!(f, "expected {} items but was {}", expected, actual)
            }
            DivergenceKind::MissingEntry => f.write_str("missing in actual"),
            DivergenceKind::UnexpectedEntry => f.write_str("unexpected in actual"),
        }
    }
}

/// A point of structural disagreement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Divergence {
    pub path: DiffPath,
    pub kind: DivergenceKind,
    /// Expected fragment; `None` when absent on the expected side
    pub expected: Option<serde_json::Value>,
    /// Actual fragment; `None` when absent on the actual side
    pub actual: Option<serde_json::Value>,
}

/// Outcome of one comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", content = "divergences")]
pub enum DiffResult {
    Equal,
    /// Divergences in depth-first order; never empty
    Diverged(Vec<Divergence>),
}

impl DiffResult {
    pub fn is_equal(&self) -> bool {
        matches!(self, DiffResult::Equal)
    }

    pub fn divergences(&self) -> &[Divergence] {
        match self {
            DiffResult::Equal => &[],
            DiffResult::Diverged(divergences) => divergences,
        }
    }

    /// The first divergence in depth-first order, if any.
    pub fn first(&self) -> Option<&Divergence> {
        self.divergences().first()
    }

    /// Pretty JSON form, e.g. for attaching to a test report.
    ///
    /// # Errors
    ///
    /// `Serialization` if a fragment cannot be encoded.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read back a result written by [`DiffResult::to_json_string`].
    ///
    /// # Errors
    ///
    /// `Serialization` if `json` is not a valid diff result document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_display() {
        let path = DiffPath(vec![
            PathSegment::Field("children".to_string()),
            PathSegment::Index(2),
            PathSegment::Key("name".to_string()),
        ]);
        assert_eq!(path.to_string(), r#"$.children[2]["name"]"#);
        assert_eq!(DiffPath::root().to_string(), "$");
    }

    #[test]
    fn test_diff_result_accessors() {
        assert!(DiffResult::Equal.is_equal());
        assert!(DiffResult::Equal.first().is_none());

        let result = DiffResult::Diverged(vec![Divergence {
            path: DiffPath::root(),
            kind: DivergenceKind::ValueMismatch,
            expected: Some(json!(1)),
            actual: Some(json!(2)),
        }]);
        assert!(!result.is_equal());
        assert_eq!(result.divergences().len(), 1);
    }

    #[test]
    fn test_json_string_roundtrip_and_malformed_input() {
        let result = DiffResult::Diverged(vec![Divergence {
            path: DiffPath(vec![PathSegment::Field("name".to_string())]),
            kind: DivergenceKind::ValueMismatch,
            expected: Some(json!("a")),
            actual: Some(json!("b")),
        }]);
        let text = result.to_json_string().unwrap();
        assert_eq!(DiffResult::from_json_str(&text).unwrap(), result);

        let err = DiffResult::from_json_str("{\"result\": ").unwrap_err();
        assert!(matches!(err, crate::errors::SameBeanError::Serialization { .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let result = DiffResult::Diverged(vec![Divergence {
            path: DiffPath(vec![PathSegment::Index(0)]),
            kind: DivergenceKind::LengthMismatch {
                expected: 1,
                actual: 2,
            },
            expected: None,
            actual: Some(json!(true)),
        }]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "result": "Diverged",
                "divergences": [{
                    "path": [{"kind": "Index", "at": 0}],
                    "kind": {"kind": "LengthMismatch", "expected": 1, "actual": 2},
                    "expected": null,
                    "actual": true
                }]
            })
        );
        let back: DiffResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
