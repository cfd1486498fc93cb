use std::fmt;

/// Terminal, identity-free values.
///
/// Equality is type-sensitive: `Int(1)` and `UInt(1)` differ because their
/// type tags differ. Floats compare by total order so that a NaN is equal to
/// itself and self-comparison of any graph stays reflexive.
#[derive(Debug, Clone)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// A constant of a named enumeration, e.g. `Element.ONE`
    Enum { type_name: String, variant: String },
}

impl Scalar {
    /// Type tag used for type-sensitive equality.
    ///
    /// Enum constants are tagged with their enumeration's type name, so two
    /// variants of different enums never compare equal even if they share a
    /// variant name.
    pub fn type_tag(&self) -> &str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::UInt(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "string",
            Scalar::Enum { type_name, .. } => type_name,
        }
    }

    /// Compare payloads, assuming the type tags already agree.
    fn same_payload(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::UInt(a), Scalar::UInt(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b).is_eq(),
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Enum { variant: a, .. }, Scalar::Enum { variant: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.type_tag() == other.type_tag() && self.same_payload(other)
    }
}

impl Eq for Scalar {}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Char(v) => write!(f, "{:?}", v),
            Scalar::Str(v) => write!(f, "{:?}", v),
            Scalar::Enum { type_name, variant } => write!(f, "{}.{}", type_name, variant),
        }
    }
}
