//! Mimic engine: runtime duck-typing shims
//!
//! A [`Shim`] lets code written against one shape drive an object of a
//! different type, as long as the object's members can be found by name.
//! Member metadata comes from the [`Introspect`] capability (usually derived)
//! and is cached per type in a [`MetadataCache`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`reflect`] | Introspection capability, member descriptors, name tables, metadata cache |
//! | [`shim`] | Shim objects, argument reordering, backing-field resolution |
//! | [`options`] | Shim configuration |
//! | [`error`] | Shim error taxonomy |
//!
//! ## Example
//!
//! ```ignore
//! use mimic_engine::{object_ref, Introspect, MetadataCache, Shim, ShimOptions, Value};
//!
//! #[derive(Introspect, Default)]
//! struct Person {
//!     #[introspect(rename = "Name")]
//!     pub name: String,
//! }
//!
//! let cache = MetadataCache::new();
//! let shim = Shim::with_options(object_ref(Person::default()), &cache, ShimOptions::fuzzy());
//! shim.set_property("name", "Ada")?;
//! assert_eq!(shim.get_property("NAME")?, Value::str("Ada"));
//! ```

#![warn(missing_docs)]

// Lets the derive macros' `::mimic_engine::...` paths resolve inside this crate.
extern crate self as mimic_engine;

pub mod defaults;
pub mod error;
pub mod options;
pub mod reflect;
pub mod shim;

pub use error::{ShimError, ShimErrorKind, ShimResult};
pub use mimic_derive::{introspect_methods, Introspect};
pub use mimic_sdk::{
    FromValue, OpaqueValue, ToValue, TypeKey, Typed, Value, ValueError, ValueResult, ValueType,
};
pub use options::ShimOptions;
pub use reflect::{
    object_ref, FieldInfo, Introspect, IntrospectMethods, MatchMode, MetadataCache, MethodInfo,
    NameIndex, ObjectRef, ParameterInfo, PropertyInfo, TypeMetadata,
};
pub use shim::{reorder_arguments, BackingFieldResolver, Shim};
