use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::scalar::Scalar;

/// A node in an arbitrary object graph.
///
/// Cloning a `Value` is shallow: objects are shared handles, so a clone of an
/// `Object` refers to the same node (and has the same [`Identity`]).
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Object(Obj),
}

impl Value {
    /// Build an enum constant, e.g. `Value::enumeration("Element", "ONE")`.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_obj(&self) -> Option<&Obj> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Runtime type name: the object's type, a scalar's type tag, or `None`
    /// for null.
    pub fn type_name(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Scalar(s) => Some(s.type_tag().to_string()),
            Value::Object(obj) => Some(obj.type_name()),
        }
    }

    /// True when this value is an object of `type_name` or declares it as a
    /// supertype.
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        self.as_obj().is_some_and(|obj| obj.is_instance_of(type_name))
    }
}

/// Shape of an object node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    Composite,
    Sequence,
    Mapping,
}

/// Contents of an object node.
#[derive(Debug, Clone)]
pub enum Body {
    /// Named fields in declaration order
    Composite(Vec<(String, Value)>),
    /// Ordered items
    Sequence(Vec<Value>),
    /// Key/value entries in insertion order
    Mapping(Vec<(Value, Value)>),
}

impl Body {
    fn kind(&self) -> ObjKind {
        match self {
            Body::Composite(_) => ObjKind::Composite,
            Body::Sequence(_) => ObjKind::Sequence,
            Body::Mapping(_) => ObjKind::Mapping,
        }
    }

    fn len(&self) -> usize {
        match self {
            Body::Composite(fields) => fields.len(),
            Body::Sequence(items) => items.len(),
            Body::Mapping(entries) => entries.len(),
        }
    }
}

struct ObjData {
    type_name: String,
    supertypes: Vec<String>,
    body: Body,
}

/// Shared, reference-typed object node.
///
/// Objects can point at each other (or themselves) freely; the comparison
/// engine detects the resulting cycles. `Rc` cycles are not reclaimed on their
/// own: call [`Obj::clear`] on a node of the cycle to release it.
#[derive(Clone)]
pub struct Obj(Rc<RefCell<ObjData>>);

/// Opaque handle identifying one object allocation.
///
/// Only meaningful while the object is alive. It is never rendered: its
/// `Debug` output deliberately omits the underlying value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity(..)")
    }
}

impl Obj {
    fn with_body(type_name: impl Into<String>, body: Body) -> Self {
        Obj(Rc::new(RefCell::new(ObjData {
            type_name: type_name.into(),
            supertypes: Vec::new(),
            body,
        })))
    }

    /// New composite object with no fields.
    pub fn composite(type_name: impl Into<String>) -> Self {
        Self::with_body(type_name, Body::Composite(Vec::new()))
    }

    /// New sequence object.
    pub fn sequence<I, V>(type_name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_body(
            type_name,
            Body::Sequence(items.into_iter().map(Into::into).collect()),
        )
    }

    /// New mapping object.
    pub fn mapping<I, K, V>(type_name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::with_body(
            type_name,
            Body::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        )
    }

    /// Declare supertypes, nearest first.
    pub fn extends<I, S>(self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.borrow_mut().supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder form of [`Obj::set`].
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field on a composite, replacing an existing field of the same
    /// name in place. Returns `false` (and does nothing) for other kinds.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let mut data = self.0.borrow_mut();
        let Body::Composite(fields) = &mut data.body else {
            return false;
        };
        let name = name.into();
        let value = value.into();
        match fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => fields.push((name, value)),
        }
        true
    }

    /// Append to a sequence. Returns `false` for other kinds.
    pub fn push(&self, item: impl Into<Value>) -> bool {
        let mut data = self.0.borrow_mut();
        let Body::Sequence(items) = &mut data.body else {
            return false;
        };
        items.push(item.into());
        true
    }

    /// Append an entry to a mapping. Returns `false` for other kinds.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> bool {
        let mut data = self.0.borrow_mut();
        let Body::Mapping(entries) = &mut data.body else {
            return false;
        };
        entries.push((key.into(), value.into()));
        true
    }

    /// Field value of a composite.
    pub fn get(&self, name: &str) -> Option<Value> {
        match &self.0.borrow().body {
            Body::Composite(fields) => fields
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Direct children: field values, items, or keys and values in entry
    /// order.
    pub fn children(&self) -> Vec<Value> {
        match &self.0.borrow().body {
            Body::Composite(fields) => fields.iter().map(|(_, v)| v.clone()).collect(),
            Body::Sequence(items) => items.clone(),
            Body::Mapping(entries) => entries
                .iter()
                .flat_map(|(k, v)| [k.clone(), v.clone()])
                .collect(),
        }
    }

    /// Remove all children, breaking any cycle running through this node.
    pub fn clear(&self) {
        let mut data = self.0.borrow_mut();
        data.body = match data.body.kind() {
            ObjKind::Composite => Body::Composite(Vec::new()),
            ObjKind::Sequence => Body::Sequence(Vec::new()),
            ObjKind::Mapping => Body::Mapping(Vec::new()),
        };
    }

    pub fn type_name(&self) -> String {
        self.0.borrow().type_name.clone()
    }

    pub fn supertypes(&self) -> Vec<String> {
        self.0.borrow().supertypes.clone()
    }

    pub fn is_instance_of(&self, type_name: &str) -> bool {
        let data = self.0.borrow();
        data.type_name == type_name || data.supertypes.iter().any(|s| s == type_name)
    }

    pub fn kind(&self) -> ObjKind {
        self.0.borrow().body.kind()
    }

    /// Number of fields, items or entries.
    pub fn len(&self) -> usize {
        self.0.borrow().body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &Obj) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Shallow copy of the body. The borrow is released before returning, so
    /// callers may run arbitrary code against the children.
    pub(crate) fn snapshot(&self) -> Body {
        self.0.borrow().body.clone()
    }
}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Children are not printed: the graph may be cyclic.
        let data = self.0.borrow();
        f.debug_struct("Obj")
            .field("type_name", &data.type_name)
            .field("kind", &data.body.kind())
            .field("len", &data.body.len())
            .finish()
    }
}

// ========== Conversions ==========

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Obj> for Value {
    fn from(obj: Obj) -> Self {
        Value::Object(obj)
    }
}

impl From<&Obj> for Value {
    fn from(obj: &Obj) -> Self {
        Value::Object(obj.clone())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(Scalar::$variant(<$target>::from(v)))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);
impl_from_int!(Float, f64, f32, f64);

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Scalar(Scalar::Char(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(Scalar::Str(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Describe a caller type as a [`Value`] graph.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Obj {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Object(Obj::sequence("Vec", self.iter().map(ToValue::to_value)))
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Object(Obj::mapping(
            "BTreeMap",
            self.iter().map(|(k, v)| (k.to_value(), v.to_value())),
        ))
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
