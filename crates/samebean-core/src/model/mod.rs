//! Value Node model: the object graphs being compared.

pub mod scalar;
pub mod value;

pub use scalar::Scalar;
pub use value::{Body, Identity, Obj, ObjKind, ToValue, Value};
