//! Traits for converting between dynamic values and Rust types.
//!
//! The derive macros in `mimic-derive` lean on these three traits: fields and
//! parameters are read with [`FromValue`], written out with [`ToValue`], and
//! described to the metadata cache with [`Typed`].
//!
//! # Example
//!
//! ```ignore
//! use mimic_sdk::{FromValue, ToValue, Typed, Value, ValueType};
//!
//! let v = 42i32.to_value();
//! assert_eq!(i32::from_value(v).unwrap(), 42);
//! assert_eq!(i32::value_type(), ValueType::I32);
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::error::{ValueError, ValueResult};
use crate::types::{TypeKey, ValueType};
use crate::value::{OpaqueValue, Value};

/// Convert from a [`Value`] into a Rust type, checking the runtime type.
pub trait FromValue: Sized {
    /// Convert, returning an error if the type doesn't match.
    fn from_value(value: Value) -> ValueResult<Self>;
}

/// Convert a Rust value into a [`Value`].
pub trait ToValue {
    /// Produce a dynamic copy of `self`.
    fn to_value(&self) -> Value;
}

/// Static type description used for declared property and parameter types.
pub trait Typed {
    /// Declared type of values of `Self`.
    fn value_type() -> ValueType;

    /// Whether `Null` converts into `Self`.
    fn nullable() -> bool {
        false
    }
}

fn mismatch(expected: &str, got: &Value) -> ValueError {
    ValueError::mismatch(expected, got.type_name())
}

macro_rules! primitive_conversions {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> ValueResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch($name, &other)),
                    }
                }
            }

            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }

            impl Typed for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }
            }
        )*
    };
}

primitive_conversions! {
    bool => Bool, "bool";
    i32 => I32, "i32";
    i64 => I64, "i64";
    f64 => F64, "f64";
}

impl FromValue for String {
    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Typed for String {
    fn value_type() -> ValueType {
        ValueType::Str
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T> Typed for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::List
    }
}

// `Option<T>` maps `None` to `Null` and keeps the declared type of `T`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> ValueResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Typed> Typed for Option<T> {
    fn value_type() -> ValueType {
        T::value_type()
    }

    fn nullable() -> bool {
        true
    }
}

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    fn from_value(value: Value) -> ValueResult<Self> {
        match &value {
            Value::Opaque(o) => o
                .downcast::<T>()
                .ok_or_else(|| mismatch(TypeKey::of::<T>().short_name(), &value)),
            _ => Err(mismatch(TypeKey::of::<T>().short_name(), &value)),
        }
    }
}

impl<T: Any + Send + Sync> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        Value::Opaque(OpaqueValue::from_arc(Arc::clone(self)))
    }
}

impl<T: Any + Send + Sync> Typed for Arc<T> {
    fn value_type() -> ValueType {
        ValueType::Opaque(TypeKey::of::<T>())
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> ValueResult<Self> {
        Ok(value)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

// Unit type (for methods that return nothing)
impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl Typed for () {
    fn value_type() -> ValueType {
        ValueType::Unit
    }
}
