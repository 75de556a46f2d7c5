//! Shim errors
//!
//! Every failing shim operation returns exactly one [`ShimError`]. Each
//! variant names the wrapped type and the member involved; none are retried
//! or swallowed inside the shim.

use thiserror::Error;

use crate::ValueError;
use crate::ValueType;

/// Errors raised by [`Shim`](crate::Shim) operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShimError {
    /// Property name absent from the selected (exact or fuzzy) property table
    #[error("Property '{property}' not found on type {type_name}")]
    PropertyNotFound {
        /// Wrapped type
        type_name: &'static str,
        /// Requested property name
        property: String,
    },

    /// Read of a property without a read accessor
    #[error("Property '{property}' on type {type_name} is write-only")]
    WriteOnlyProperty {
        /// Wrapped type
        type_name: &'static str,
        /// Property name
        property: String,
    },

    /// Write of a property without a write accessor
    #[error("Property '{property}' on type {type_name} is read-only")]
    ReadOnlyProperty {
        /// Wrapped type
        type_name: &'static str,
        /// Property name
        property: String,
    },

    /// Method name absent from the selected method table
    #[error("Method '{method}' not found on type {type_name}")]
    MethodNotFound {
        /// Wrapped type
        type_name: &'static str,
        /// Requested method name
        method: String,
    },

    /// Call-through attempted on a synthesized (duck) object
    #[error("Cannot call-through '{method}': {type_name} is a synthesized object with no wrapped methods")]
    CallThroughUnsupported {
        /// Wrapped type
        type_name: &'static str,
        /// Requested method name
        method: String,
    },

    /// Fuzzy call supplied a different number of arguments than declared
    #[error("Method '{method}' on type {type_name} expects {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Wrapped type
        type_name: &'static str,
        /// Method name
        method: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Fuzzy call needs reordering but declared parameter types repeat
    #[error("Cannot reorder arguments for '{method}' on type {type_name}: parameter types {parameter_types:?} are not distinct")]
    UnresolveableParameterOrderMismatch {
        /// Wrapped type
        type_name: &'static str,
        /// Method name
        method: String,
        /// Declared parameter types, in declaration order
        parameter_types: Vec<ValueType>,
    },

    /// Reordering found no argument of a declared parameter's type
    #[error("No argument of type {expected} for parameter '{parameter}' of '{method}' on type {type_name}")]
    NoArgumentForParameter {
        /// Wrapped type
        type_name: &'static str,
        /// Method name
        method: String,
        /// Parameter that could not be filled
        parameter: String,
        /// Declared parameter type
        expected: ValueType,
    },

    /// Synthesized object has no conventionally named backing field
    #[error("No backing field '{field}' for property '{property}' on type {type_name}")]
    BackingFieldNotFound {
        /// Wrapped type
        type_name: &'static str,
        /// Requested property name
        property: String,
        /// Field name that was looked up
        field: String,
    },

    /// A resolved member rejected the value or arguments handed to it
    #[error("Access to '{member}' on type {type_name} failed: {source}")]
    AccessFailed {
        /// Wrapped type
        type_name: &'static str,
        /// Member name
        member: String,
        /// Underlying conversion failure
        #[source]
        source: ValueError,
    },
}

/// Fieldless discriminant of [`ShimError`], for matching on the kind alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShimErrorKind {
    /// See [`ShimError::PropertyNotFound`]
    PropertyNotFound,
    /// See [`ShimError::WriteOnlyProperty`]
    WriteOnlyProperty,
    /// See [`ShimError::ReadOnlyProperty`]
    ReadOnlyProperty,
    /// See [`ShimError::MethodNotFound`]
    MethodNotFound,
    /// See [`ShimError::CallThroughUnsupported`]
    CallThroughUnsupported,
    /// See [`ShimError::ParameterCountMismatch`]
    ParameterCountMismatch,
    /// See [`ShimError::UnresolveableParameterOrderMismatch`]
    UnresolveableParameterOrderMismatch,
    /// See [`ShimError::NoArgumentForParameter`]
    NoArgumentForParameter,
    /// See [`ShimError::BackingFieldNotFound`]
    BackingFieldNotFound,
    /// See [`ShimError::AccessFailed`]
    AccessFailed,
}

impl ShimError {
    /// The error kind
    pub fn kind(&self) -> ShimErrorKind {
        match self {
            ShimError::PropertyNotFound { .. } => ShimErrorKind::PropertyNotFound,
            ShimError::WriteOnlyProperty { .. } => ShimErrorKind::WriteOnlyProperty,
            ShimError::ReadOnlyProperty { .. } => ShimErrorKind::ReadOnlyProperty,
            ShimError::MethodNotFound { .. } => ShimErrorKind::MethodNotFound,
            ShimError::CallThroughUnsupported { .. } => ShimErrorKind::CallThroughUnsupported,
            ShimError::ParameterCountMismatch { .. } => ShimErrorKind::ParameterCountMismatch,
            ShimError::UnresolveableParameterOrderMismatch { .. } => {
                ShimErrorKind::UnresolveableParameterOrderMismatch
            }
            ShimError::NoArgumentForParameter { .. } => ShimErrorKind::NoArgumentForParameter,
            ShimError::BackingFieldNotFound { .. } => ShimErrorKind::BackingFieldNotFound,
            ShimError::AccessFailed { .. } => ShimErrorKind::AccessFailed,
        }
    }

    /// Name of the wrapped type the failure occurred on
    pub fn type_name(&self) -> &'static str {
        match self {
            ShimError::PropertyNotFound { type_name, .. }
            | ShimError::WriteOnlyProperty { type_name, .. }
            | ShimError::ReadOnlyProperty { type_name, .. }
            | ShimError::MethodNotFound { type_name, .. }
            | ShimError::CallThroughUnsupported { type_name, .. }
            | ShimError::ParameterCountMismatch { type_name, .. }
            | ShimError::UnresolveableParameterOrderMismatch { type_name, .. }
            | ShimError::NoArgumentForParameter { type_name, .. }
            | ShimError::BackingFieldNotFound { type_name, .. }
            | ShimError::AccessFailed { type_name, .. } => type_name,
        }
    }

    /// Name of the member the failure occurred on
    pub fn member(&self) -> &str {
        match self {
            ShimError::PropertyNotFound { property, .. }
            | ShimError::WriteOnlyProperty { property, .. }
            | ShimError::ReadOnlyProperty { property, .. }
            | ShimError::BackingFieldNotFound { property, .. } => property,
            ShimError::MethodNotFound { method, .. }
            | ShimError::CallThroughUnsupported { method, .. }
            | ShimError::ParameterCountMismatch { method, .. }
            | ShimError::UnresolveableParameterOrderMismatch { method, .. }
            | ShimError::NoArgumentForParameter { method, .. } => method,
            ShimError::AccessFailed { member, .. } => member,
        }
    }
}

/// Result type for shim operations
pub type ShimResult<T> = Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_accessors() {
        let err = ShimError::PropertyNotFound {
            type_name: "app::Person",
            property: "Nmae".to_string(),
        };
        assert_eq!(err.kind(), ShimErrorKind::PropertyNotFound);
        assert_eq!(err.type_name(), "app::Person");
        assert_eq!(err.member(), "Nmae");
        assert_eq!(
            err.to_string(),
            "Property 'Nmae' not found on type app::Person"
        );
    }

    #[test]
    fn test_access_failed_keeps_source() {
        use std::error::Error as _;

        let err = ShimError::AccessFailed {
            type_name: "app::Person",
            member: "Age".to_string(),
            source: ValueError::mismatch("i32", "string"),
        };
        assert_eq!(err.kind(), ShimErrorKind::AccessFailed);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("expected i32, got string"));
    }

    #[test]
    fn test_parameter_type_list_in_message() {
        let err = ShimError::UnresolveableParameterOrderMismatch {
            type_name: "app::Greeter",
            method: "Greet".to_string(),
            parameter_types: vec![ValueType::Str, ValueType::Str],
        };
        assert_eq!(err.member(), "Greet");
        assert!(err.to_string().contains("[Str, Str]"));
    }
}
