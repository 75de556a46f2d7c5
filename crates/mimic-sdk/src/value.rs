//! Value — dynamic value representation
//!
//! Every property read, property write, and call argument that crosses a shim
//! is carried as a [`Value`]. Primitives and strings are stored inline; any
//! other Rust value travels as an [`OpaqueValue`] (reference-counted, tagged
//! with its [`TypeKey`]).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::types::{TypeKey, ValueType};

/// Dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value. Has no runtime type.
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit float
    F64(f64),
    /// UTF-8 string
    Str(String),
    /// List of values
    List(Vec<Value>),
    /// Any other Rust value
    Opaque(OpaqueValue),
}

impl Value {
    /// Create a string value
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Wrap an arbitrary Rust value
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }

    /// Check if this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type of the value; `None` for `Null`.
    pub fn runtime_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::I32(_) => Some(ValueType::I32),
            Value::I64(_) => Some(ValueType::I64),
            Value::F64(_) => Some(ValueType::F64),
            Value::Str(_) => Some(ValueType::Str),
            Value::List(_) => Some(ValueType::List),
            Value::Opaque(o) => Some(ValueType::Opaque(o.type_key())),
        }
    }

    /// Name of the runtime type ("null" for `Null`)
    pub fn type_name(&self) -> &'static str {
        self.runtime_type().map_or("null", |t| t.type_name())
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i32 if this is an i32
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i64 if this is an i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is an f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow as a string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list elements if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    f64 => F64,
    String => Str,
    Vec<Value> => List,
    OpaqueValue => Opaque,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Bool(b) => write!(f, "Value::Bool({b})"),
            Value::I32(i) => write!(f, "Value::I32({i})"),
            Value::I64(i) => write!(f, "Value::I64({i})"),
            Value::F64(x) => write!(f, "Value::F64({x})"),
            Value::Str(s) => write!(f, "Value::Str({s:?})"),
            Value::List(items) => f.debug_tuple("Value::List").field(items).finish(),
            Value::Opaque(o) => write!(f, "Value::Opaque({})", o.type_key().name()),
        }
    }
}

// ============================================================================
// OpaqueValue
// ============================================================================

/// Reference-counted Rust value tagged with its concrete type.
#[derive(Clone)]
pub struct OpaqueValue {
    key: TypeKey,
    data: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Wrap `value`
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value without re-allocating
    pub fn from_arc<T: Any + Send + Sync>(data: Arc<T>) -> Self {
        OpaqueValue {
            key: TypeKey::of::<T>(),
            data,
        }
    }

    /// Concrete type of the wrapped value
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Downcast to a shared handle of `T`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.data).downcast::<T>().ok()
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &OpaqueValue) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("type", &self.key.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Token(u32);

    #[test]
    fn test_runtime_types() {
        assert_eq!(Value::Null.runtime_type(), None);
        assert_eq!(Value::Bool(true).runtime_type(), Some(ValueType::Bool));
        assert_eq!(Value::I32(1).runtime_type(), Some(ValueType::I32));
        assert_eq!(Value::I64(1).runtime_type(), Some(ValueType::I64));
        assert_eq!(Value::F64(1.5).runtime_type(), Some(ValueType::F64));
        assert_eq!(Value::str("x").runtime_type(), Some(ValueType::Str));
        assert_eq!(Value::List(vec![]).runtime_type(), Some(ValueType::List));
        assert_eq!(
            Value::opaque(Token(3)).runtime_type(),
            Some(ValueType::Opaque(TypeKey::of::<Token>()))
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::I32(42).as_i32(), Some(42));
        assert_eq!(Value::I32(42).as_i64(), None);
        assert_eq!(Value::str("hi").as_str(), Some("hi"));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert!(Value::Null.is_null());
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_opaque_downcast_and_identity() {
        let v = OpaqueValue::new(Token(7));
        assert_eq!(*v.downcast::<Token>().unwrap(), Token(7));
        assert!(v.downcast::<String>().is_none());

        let copy = v.clone();
        assert!(v.ptr_eq(&copy));
        assert_ne!(Value::Opaque(v), Value::opaque(Token(7)));
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(3), Value::I32(3));
        assert_eq!(Value::from(3i64), Value::I64(3));
        assert_eq!(Value::from("a"), Value::str("a"));
        assert_eq!(Value::from(String::from("b")), Value::str("b"));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(vec![Value::Null]), Value::List(vec![Value::Null]));
    }

    #[test]
    fn test_equality_is_type_strict() {
        assert_eq!(Value::I32(5), Value::I32(5));
        assert_ne!(Value::I32(5), Value::I64(5));
        assert_eq!(
            Value::List(vec![Value::I32(1), Value::str("a")]),
            Value::List(vec![Value::I32(1), Value::str("a")])
        );
    }
}
