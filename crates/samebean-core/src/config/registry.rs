//! Type Registry: runtime type name to custom adapter.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::{Result, SameBeanError};
use crate::model::{Obj, Value};

/// Custom encoder/decoder pair for one type.
///
/// When an adapter is registered for an object's type, the traverser hands the
/// object to [`TypeAdapter::serialize`] instead of walking it. The returned
/// JSON is an opaque leaf of the canonical tree: the engine does not look
/// inside it, follow references from it, or track cycles through it.
pub trait TypeAdapter: Send + Sync {
    /// Encode a value of the registered type.
    fn serialize(&self, value: &Value) -> serde_json::Value;

    /// Decode a previously encoded value.
    ///
    /// Never called during comparison.
    fn deserialize(&self, _json: &serde_json::Value) -> Option<Value> {
        None
    }
}

/// Adapter built from a closure.
///
/// ```
/// use samebean_core::config::{FnAdapter, TypeAdapter};
/// use samebean_core::model::Value;
///
/// let adapter = FnAdapter::new(|_: &Value| serde_json::json!("fixed"));
/// assert_eq!(adapter.serialize(&Value::Null), serde_json::json!("fixed"));
/// ```
pub struct FnAdapter<F> {
    encode: F,
}

impl<F> FnAdapter<F>
where
    F: Fn(&Value) -> serde_json::Value + Send + Sync,
{
    pub fn new(encode: F) -> Self {
        Self { encode }
    }
}

impl<F> TypeAdapter for FnAdapter<F>
where
    F: Fn(&Value) -> serde_json::Value + Send + Sync,
{
    fn serialize(&self, value: &Value) -> serde_json::Value {
        (self.encode)(value)
    }
}

/// Flat capability lookup from type name to adapter.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    adapters: HashMap<String, Arc<dyn TypeAdapter>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `type_name` with `adapter`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// `InvalidTypeName` if `type_name` is empty or whitespace.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        adapter: Arc<dyn TypeAdapter>,
    ) -> Result<()> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(SameBeanError::InvalidTypeName { type_name });
        }
        if self.adapters.insert(type_name.clone(), adapter).is_some() {
            tracing::debug!(type_name = %type_name, "replaced type adapter");
        }
        Ok(())
    }

    /// Exact-type lookup.
    pub fn lookup(&self, type_name: &str) -> Option<&Arc<dyn TypeAdapter>> {
        self.adapters.get(type_name)
    }

    /// Most specific adapter for an object: its own type first, then its
    /// declared supertypes nearest-first.
    pub fn resolve(&self, obj: &Obj) -> Option<&Arc<dyn TypeAdapter>> {
        if self.adapters.is_empty() {
            return None;
        }
        if let Some(adapter) = self.lookup(&obj.type_name()) {
            return Some(adapter);
        }
        obj.supertypes().iter().find_map(|s| self.lookup(s))
    }

    /// Run the decoder registered for `type_name`.
    pub fn decode(&self, type_name: &str, json: &serde_json::Value) -> Option<Value> {
        self.lookup(type_name)?.deserialize(json)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constant(tag: &'static str) -> Arc<dyn TypeAdapter> {
        Arc::new(FnAdapter::new(move |_: &Value| json!(tag)))
    }

    #[test]
    fn test_register_rejects_blank_type_name() {
        let mut registry = TypeRegistry::new();
        let err = registry.register("  ", constant("x")).unwrap_err();
        assert!(matches!(err, SameBeanError::InvalidTypeName { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_previous_adapter() {
        let mut registry = TypeRegistry::new();
        registry.register("One", constant("first")).unwrap();
        registry.register("One", constant("second")).unwrap();
        assert_eq!(registry.len(), 1);
        let adapter = registry.lookup("One").unwrap();
        assert_eq!(adapter.serialize(&Value::Null), json!("second"));
    }

    #[test]
    fn test_exact_type_beats_supertype() {
        let mut registry = TypeRegistry::new();
        registry.register("Throwable", constant("throwable")).unwrap();
        registry.register("Exception", constant("exception")).unwrap();

        let exact = Obj::composite("Exception").extends(["Throwable"]);
        let adapter = registry.resolve(&exact).unwrap();
        assert_eq!(adapter.serialize(&Value::Null), json!("exception"));

        let nearest = Obj::composite("RuntimeException").extends(["Exception", "Throwable"]);
        let adapter = registry.resolve(&nearest).unwrap();
        assert_eq!(adapter.serialize(&Value::Null), json!("exception"));

        assert!(registry.resolve(&Obj::composite("Other")).is_none());
    }

    #[test]
    fn test_decode_uses_adapter_decoder() {
        struct Roundtrip;
        impl TypeAdapter for Roundtrip {
            fn serialize(&self, _value: &Value) -> serde_json::Value {
                json!("one")
            }
            fn deserialize(&self, json: &serde_json::Value) -> Option<Value> {
                json.as_str().map(Value::from)
            }
        }

        let mut registry = TypeRegistry::new();
        registry.register("One", Arc::new(Roundtrip)).unwrap();
        registry.register("Fixed", constant("fixed")).unwrap();

        let decoded = registry.decode("One", &json!("one")).unwrap();
        assert_eq!(decoded.type_name().as_deref(), Some("string"));
        assert!(registry.decode("Fixed", &json!("fixed")).is_none());
        assert!(registry.decode("Missing", &json!(1)).is_none());
    }
}
