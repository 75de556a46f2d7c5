//! Shim Objects
//!
//! A [`Shim`] makes a wrapped object usable through a different shape: the
//! caller names properties and methods of the shape it coded against, and the
//! shim resolves them against the wrapped object's real members by name.
//!
//! ## Resolution
//!
//! - **Exact** shims match member names case-sensitively and pass call
//!   arguments through untouched.
//! - **Fuzzy** shims match case-insensitively and reorder call arguments by
//!   declared parameter type (see [`reorder_arguments`]).
//! - **Synthesized** objects ("ducks") redirect property access to backing
//!   fields named `<prefix><Property>` and reject every call-through.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = MetadataCache::new();
//! let shim = Shim::with_options(object_ref(person), &cache, ShimOptions::fuzzy());
//!
//! shim.set_property("name", Value::str("Ada"))?;
//! assert_eq!(shim.get_property("NAME")?, Value::str("Ada"));
//! let greeting = shim.call("greet", vec![Value::str("Hi"), Value::I32(2)])?;
//! ```

mod duck;
mod reorder;

pub use duck::BackingFieldResolver;
pub use reorder::reorder_arguments;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{ShimError, ShimResult};
use crate::options::ShimOptions;
use crate::reflect::{FieldInfo, MetadataCache, MethodInfo, ObjectRef, PropertyInfo, TypeMetadata};
use crate::{FromValue, TypeKey, Value, ValueError};

/// Adapter forwarding member access to a wrapped object.
///
/// The member tables are taken from the cache when the shim is built and
/// never change afterwards.
pub struct Shim {
    target: ObjectRef,
    type_key: TypeKey,
    options: ShimOptions,
    metadata: Arc<TypeMetadata>,
}

impl Shim {
    /// Create an exact-matching shim over `target`
    pub fn new(target: ObjectRef, cache: &MetadataCache) -> Self {
        Self::with_options(target, cache, ShimOptions::default())
    }

    /// Create a shim with custom options
    pub fn with_options(target: ObjectRef, cache: &MetadataCache, options: ShimOptions) -> Self {
        let metadata = {
            let object = target.read();
            cache.metadata_for(&*object)
        };
        let type_key = metadata.type_key();
        trace!(
            type_name = type_key.name(),
            mode = ?options.match_mode,
            synthesized = metadata.is_synthesized(),
            "constructed shim"
        );

        Shim {
            target,
            type_key,
            options,
            metadata,
        }
    }

    /// Whether names are matched case-insensitively
    pub fn is_fuzzy(&self) -> bool {
        self.options.is_fuzzy()
    }

    /// Whether the wrapped object is a synthesized placeholder
    pub fn is_synthesized(&self) -> bool {
        self.metadata.is_synthesized()
    }

    /// Identity of the wrapped type
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Options this shim was built with
    pub fn options(&self) -> &ShimOptions {
        &self.options
    }

    /// The wrapped object
    pub fn target(&self) -> &ObjectRef {
        &self.target
    }

    // ========================================================================
    // Property access
    // ========================================================================

    /// Read a property
    pub fn get_property(&self, name: &str) -> ShimResult<Value> {
        if self.is_synthesized() {
            let field = self.backing_field(name)?;
            return self
                .target
                .read()
                .read_field(field.slot)
                .map_err(|e| self.access_failed(name, e));
        }

        let property = self.find_property(name)?;
        if !property.readable {
            return Err(ShimError::WriteOnlyProperty {
                type_name: self.type_key.name(),
                property: name.to_string(),
            });
        }
        self.target
            .read()
            .read_property(property.slot)
            .map_err(|e| self.access_failed(name, e))
    }

    /// Read a property and convert it to `T`
    pub fn get<T: FromValue>(&self, name: &str) -> ShimResult<T> {
        let value = self.get_property(name)?;
        T::from_value(value).map_err(|e| self.access_failed(name, e))
    }

    /// Write a property
    pub fn set_property(&self, name: &str, value: impl Into<Value>) -> ShimResult<()> {
        let value = value.into();
        if self.is_synthesized() {
            let field = self.backing_field(name)?;
            return self
                .target
                .write()
                .write_field(field.slot, value)
                .map_err(|e| self.access_failed(name, e));
        }

        let property = self.find_property(name)?;
        if !property.writable {
            return Err(ShimError::ReadOnlyProperty {
                type_name: self.type_key.name(),
                property: name.to_string(),
            });
        }
        self.target
            .write()
            .write_property(property.slot, value)
            .map_err(|e| self.access_failed(name, e))
    }

    // ========================================================================
    // Call-through
    // ========================================================================

    /// Call a method on the wrapped object and return its result
    pub fn call(&self, name: &str, args: Vec<Value>) -> ShimResult<Value> {
        if self.is_synthesized() {
            return Err(ShimError::CallThroughUnsupported {
                type_name: self.type_key.name(),
                method: name.to_string(),
            });
        }

        let method = self.find_method(name)?;
        let args = if self.is_fuzzy() {
            reorder_arguments(self.type_key, method, args)?
        } else {
            args
        };

        self.target
            .write()
            .invoke_method(method.slot, args)
            .map_err(|e| self.access_failed(name, e))
    }

    /// Call a method on the wrapped object, discarding its result
    pub fn call_void(&self, name: &str, args: Vec<Value>) -> ShimResult<()> {
        self.call(name, args).map(|_| ())
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    fn find_property(&self, name: &str) -> ShimResult<&PropertyInfo> {
        self.metadata
            .properties(self.options.match_mode)
            .get(name)
            .ok_or_else(|| {
                debug!(type_name = self.type_key.name(), property = name, "property not found");
                ShimError::PropertyNotFound {
                    type_name: self.type_key.name(),
                    property: name.to_string(),
                }
            })
    }

    fn find_method(&self, name: &str) -> ShimResult<&MethodInfo> {
        self.metadata
            .methods(self.options.match_mode)
            .get(name)
            .ok_or_else(|| {
                debug!(type_name = self.type_key.name(), method = name, "method not found");
                ShimError::MethodNotFound {
                    type_name: self.type_key.name(),
                    method: name.to_string(),
                }
            })
    }

    fn backing_field(&self, property: &str) -> ShimResult<&FieldInfo> {
        BackingFieldResolver::new(
            self.type_key,
            self.metadata.fields(),
            &self.options.backing_field_prefix,
        )
        .resolve(property)
    }

    fn access_failed(&self, member: &str, source: ValueError) -> ShimError {
        ShimError::AccessFailed {
            type_name: self.type_key.name(),
            member: member.to_string(),
            source,
        }
    }
}

impl std::fmt::Debug for Shim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shim")
            .field("type", &self.type_key.name())
            .field("match_mode", &self.options.match_mode)
            .field("synthesized", &self.is_synthesized())
            .finish_non_exhaustive()
    }
}
