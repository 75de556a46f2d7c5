//! Reflection support for shims
//!
//! This module provides the introspection capability types implement, the
//! name-keyed member tables, and the per-type metadata cache shims consult.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = MetadataCache::new();
//! let person = object_ref(Person::default());
//!
//! // First request enumerates the type's members, later ones hit the cache
//! let meta = cache.metadata_for(&*person.read());
//! assert!(meta.properties(MatchMode::Fuzzy).contains("name"));
//! ```

mod introspect;
mod name_index;
mod type_metadata;

pub use introspect::{
    object_ref, FieldInfo, Introspect, IntrospectMethods, MethodInfo, ObjectRef, ParameterInfo,
    PropertyInfo,
};
pub use name_index::{MatchMode, NameIndex};
pub use type_metadata::{MetadataCache, TypeMetadata};
