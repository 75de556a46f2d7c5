//! Runtime type identities
//!
//! [`TypeKey`] names a concrete Rust type and is the identity used to key
//! metadata caches. [`ValueType`] is the declared or runtime type of a
//! dynamic [`Value`](crate::Value).

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a concrete Rust type.
///
/// Equality and hashing only consider the `TypeId`; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declared or runtime type of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Boolean
    Bool,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 64-bit float
    F64,
    /// UTF-8 string
    Str,
    /// Heterogeneous list
    List,
    /// Opaque Rust value of the given type
    Opaque(TypeKey),
    /// No value (return type of void methods)
    Unit,
}

impl ValueType {
    /// Whether this is a non-nullable primitive.
    ///
    /// A null argument can never satisfy a parameter of such a type.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::I32 | ValueType::I64 | ValueType::F64
        )
    }

    /// Human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F64 => "f64",
            ValueType::Str => "string",
            ValueType::List => "list",
            ValueType::Opaque(key) => key.short_name(),
            ValueType::Unit => "unit",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn test_type_key_identity() {
        assert_eq!(TypeKey::of::<Widget>(), TypeKey::of::<Widget>());
        assert_ne!(TypeKey::of::<Widget>(), TypeKey::of::<String>());
    }

    #[test]
    fn test_type_key_short_name() {
        assert_eq!(TypeKey::of::<Widget>().short_name(), "Widget");
        assert_eq!(TypeKey::of::<i32>().short_name(), "i32");
        assert_eq!(TypeKey::of::<Vec<String>>().short_name(), "Vec<alloc::string::String>");
    }

    #[test]
    fn test_value_type_classification() {
        assert!(ValueType::I32.is_value_type());
        assert!(ValueType::Bool.is_value_type());
        assert!(!ValueType::Str.is_value_type());
        assert!(!ValueType::List.is_value_type());
        assert!(!ValueType::Opaque(TypeKey::of::<Widget>()).is_value_type());
    }
}
