//! Introspection capability
//!
//! Rust has no runtime reflection, so a type opts in by implementing
//! [`Introspect`] (usually via `#[derive(Introspect)]`). The trait lists a
//! type's members as plain descriptors and exposes slot-addressed accessors;
//! everything above it (metadata cache, shim) is type-agnostic.
//!
//! ## Member families
//!
//! | Family     | Descriptor       | Accessors                         |
//! |------------|------------------|-----------------------------------|
//! | Properties | [`PropertyInfo`] | `read_property`, `write_property` |
//! | Methods    | [`MethodInfo`]   | `invoke_method`                   |
//! | Fields     | [`FieldInfo`]    | `read_field`, `write_field`       |

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{TypeKey, Value, ValueError, ValueResult, ValueType};

/// Property information for reflection
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// Property name
    pub name: String,
    /// Declared property type
    pub value_type: ValueType,
    /// Slot passed to `read_property` / `write_property`
    pub slot: usize,
    /// Whether the property has a read accessor
    pub readable: bool,
    /// Whether the property has a write accessor
    pub writable: bool,
}

impl PropertyInfo {
    /// Create a readable and writable property
    pub fn new(name: impl Into<String>, value_type: ValueType, slot: usize) -> Self {
        Self {
            name: name.into(),
            value_type,
            slot,
            readable: true,
            writable: true,
        }
    }

    /// Set read/write accessibility
    pub fn with_access(mut self, readable: bool, writable: bool) -> Self {
        self.readable = readable;
        self.writable = writable;
        self
    }
}

/// Method information for reflection
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Parameter infos, in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Return type
    pub return_type: ValueType,
    /// Slot passed to `invoke_method`
    pub slot: usize,
}

impl MethodInfo {
    /// Create a method descriptor
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: ValueType,
        slot: usize,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            slot,
        }
    }

    /// Declared parameter types, in declaration order
    pub fn parameter_types(&self) -> Vec<ValueType> {
        self.parameters.iter().map(|p| p.value_type).collect()
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// Parameter information for reflection
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Declared parameter type
    pub value_type: ValueType,
    /// Position in the parameter list
    pub position: usize,
    /// Whether the parameter accepts `Null` (e.g. `Option<i32>`)
    pub nullable: bool,
}

impl ParameterInfo {
    /// Create a non-nullable parameter descriptor
    pub fn new(name: impl Into<String>, value_type: ValueType, position: usize) -> Self {
        Self {
            name: name.into(),
            value_type,
            position,
            nullable: false,
        }
    }

    /// Set nullability
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether a `Null` argument may fill this parameter.
    ///
    /// True for nullable parameters and for every declared type that is not a
    /// primitive value type.
    pub fn accepts_null(&self) -> bool {
        self.nullable || !self.value_type.is_value_type()
    }
}

/// Non-public field information for reflection
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared field type
    pub value_type: ValueType,
    /// Slot passed to `read_field` / `write_field`
    pub slot: usize,
}

impl FieldInfo {
    /// Create a field descriptor
    pub fn new(name: impl Into<String>, value_type: ValueType, slot: usize) -> Self {
        Self {
            name: name.into(),
            value_type,
            slot,
        }
    }
}

/// Runtime introspection of a concrete type.
///
/// The `list_*` methods must describe the type, not the instance: every
/// value of the same type returns the same descriptors, because the metadata
/// cache computes them once per [`TypeKey`].
pub trait Introspect: Send + Sync + 'static {
    /// Identity of the concrete type
    fn type_key(&self) -> TypeKey;

    /// Whether this type is a synthesized placeholder ("duck") whose
    /// properties live in conventionally named backing fields
    fn is_synthesized(&self) -> bool {
        false
    }

    /// Public instance properties
    fn list_properties(&self) -> Vec<PropertyInfo>;

    /// Public instance methods
    fn list_methods(&self) -> Vec<MethodInfo> {
        Vec::new()
    }

    /// Non-public instance fields
    fn list_fields(&self) -> Vec<FieldInfo> {
        Vec::new()
    }

    /// Read the property at `slot`
    fn read_property(&self, slot: usize) -> ValueResult<Value>;

    /// Write the property at `slot`
    fn write_property(&mut self, slot: usize, value: Value) -> ValueResult<()>;

    /// Invoke the method at `slot` with arguments in declared order
    fn invoke_method(&mut self, slot: usize, args: Vec<Value>) -> ValueResult<Value> {
        let _ = args;
        Err(ValueError::NoSuchSlot {
            kind: "method",
            index: slot,
        })
    }

    /// Read the non-public field at `slot`
    fn read_field(&self, slot: usize) -> ValueResult<Value> {
        Err(ValueError::NoSuchSlot {
            kind: "field",
            index: slot,
        })
    }

    /// Write the non-public field at `slot`
    fn write_field(&mut self, slot: usize, value: Value) -> ValueResult<()> {
        let _ = value;
        Err(ValueError::NoSuchSlot {
            kind: "field",
            index: slot,
        })
    }
}

/// Method half of the introspection capability, generated by
/// `#[introspect_methods]` and picked up by `#[introspect(methods)]`.
pub trait IntrospectMethods {
    /// Public instance methods of `Self`
    fn method_infos() -> Vec<MethodInfo>;

    /// Invoke the method at `slot`
    fn invoke_method_slot(&mut self, slot: usize, args: Vec<Value>) -> ValueResult<Value>;
}

/// Shared handle to a wrapped object.
///
/// Shims wrapping the same `ObjectRef` observe each other's writes.
pub type ObjectRef = Arc<RwLock<dyn Introspect>>;

/// Wrap `value` in a fresh [`ObjectRef`]
pub fn object_ref<T: Introspect>(value: T) -> ObjectRef {
    Arc::new(RwLock::new(value))
}
