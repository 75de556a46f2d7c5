//! Type Metadata for Shims
//!
//! Stores the member tables of one wrapped type: exact and fuzzy property
//! tables, exact and fuzzy method tables and, for synthesized types, the
//! non-public field table. [`MetadataCache`] computes each type's metadata
//! at most once and shares it between all shims of that type.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::introspect::{FieldInfo, Introspect, MethodInfo, PropertyInfo};
use super::name_index::{MatchMode, NameIndex};
use crate::TypeKey;

/// Member tables for a single wrapped type
#[derive(Debug, Clone)]
pub struct TypeMetadata {
    key: TypeKey,
    synthesized: bool,
    exact_properties: NameIndex<PropertyInfo>,
    fuzzy_properties: NameIndex<PropertyInfo>,
    exact_methods: NameIndex<MethodInfo>,
    fuzzy_methods: NameIndex<MethodInfo>,
    /// Indexed by literal name, only for synthesized types
    fields: Option<NameIndex<FieldInfo>>,
}

impl TypeMetadata {
    /// Enumerate the members of `object`'s type
    pub fn from_object(object: &dyn Introspect) -> Self {
        let synthesized = object.is_synthesized();
        let properties = object.list_properties();
        let methods = object.list_methods();

        let fields = synthesized.then(|| {
            NameIndex::from_entries(
                MatchMode::Exact,
                object
                    .list_fields()
                    .into_iter()
                    .map(|f| (f.name.clone(), f)),
            )
        });

        Self {
            key: object.type_key(),
            synthesized,
            exact_properties: index_by_name(MatchMode::Exact, &properties, |p| &p.name),
            fuzzy_properties: index_by_name(MatchMode::Fuzzy, &properties, |p| &p.name),
            exact_methods: index_by_name(MatchMode::Exact, &methods, |m| &m.name),
            fuzzy_methods: index_by_name(MatchMode::Fuzzy, &methods, |m| &m.name),
            fields,
        }
    }

    /// Identity of the described type
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Whether the type is a synthesized placeholder
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Property table for the given match mode
    pub fn properties(&self, mode: MatchMode) -> &NameIndex<PropertyInfo> {
        match mode {
            MatchMode::Exact => &self.exact_properties,
            MatchMode::Fuzzy => &self.fuzzy_properties,
        }
    }

    /// Method table for the given match mode
    pub fn methods(&self, mode: MatchMode) -> &NameIndex<MethodInfo> {
        match mode {
            MatchMode::Exact => &self.exact_methods,
            MatchMode::Fuzzy => &self.fuzzy_methods,
        }
    }

    /// Non-public field table (synthesized types only)
    pub fn fields(&self) -> Option<&NameIndex<FieldInfo>> {
        self.fields.as_ref()
    }
}

fn index_by_name<T: Clone>(
    mode: MatchMode,
    members: &[T],
    name: impl Fn(&T) -> &String,
) -> NameIndex<T> {
    NameIndex::from_entries(
        mode,
        members.iter().map(|m| (name(m).clone(), m.clone())),
    )
}

/// Cache of type metadata, shared by every shim built against it.
///
/// Lookups of populated types take a shared read lock. Population runs under
/// the upgradable lock, which admits one populator at a time across all
/// types, so no type's metadata is ever computed twice.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: RwLock<FxHashMap<TypeKey, Arc<TypeMetadata>>>,
    populations: AtomicUsize,
}

impl MetadataCache {
    /// Create new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the metadata of `object`'s type, computing it on first request
    pub fn metadata_for(&self, object: &dyn Introspect) -> Arc<TypeMetadata> {
        let key = object.type_key();
        if let Some(metadata) = self.entries.read().get(&key) {
            return Arc::clone(metadata);
        }

        let entries = self.entries.upgradable_read();
        // Another thread may have populated it while we waited.
        if let Some(metadata) = entries.get(&key) {
            return Arc::clone(metadata);
        }

        let metadata = Arc::new(TypeMetadata::from_object(object));
        self.populations.fetch_add(1, Ordering::Relaxed);
        debug!(
            type_name = key.name(),
            properties = metadata.exact_properties.len(),
            methods = metadata.exact_methods.len(),
            synthesized = metadata.synthesized,
            "populated type metadata"
        );

        let mut entries = RwLockUpgradableReadGuard::upgrade(entries);
        entries.insert(key, Arc::clone(&metadata));
        metadata
    }

    /// Get metadata for a type if it has been populated
    pub fn get(&self, key: &TypeKey) -> Option<Arc<TypeMetadata>> {
        self.entries.read().get(key).cloned()
    }

    /// Check if a type has been populated
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Get number of types with metadata
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Number of times metadata has been computed
    pub fn populations(&self) -> usize {
        self.populations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::introspect::ParameterInfo;
    use crate::{Value, ValueError, ValueResult, ValueType};

    struct Sample;

    impl Introspect for Sample {
        fn type_key(&self) -> TypeKey {
            TypeKey::of::<Self>()
        }

        fn list_properties(&self) -> Vec<PropertyInfo> {
            vec![
                PropertyInfo::new("Name", ValueType::Str, 0),
                PropertyInfo::new("Age", ValueType::I32, 1),
            ]
        }

        fn list_methods(&self) -> Vec<MethodInfo> {
            vec![MethodInfo::new(
                "Greet",
                vec![ParameterInfo::new("name", ValueType::Str, 0)],
                ValueType::Str,
                0,
            )]
        }

        fn list_fields(&self) -> Vec<FieldInfo> {
            vec![FieldInfo::new("_secret", ValueType::Str, 0)]
        }

        fn read_property(&self, slot: usize) -> ValueResult<Value> {
            Err(ValueError::NoSuchSlot {
                kind: "property",
                index: slot,
            })
        }

        fn write_property(&mut self, slot: usize, _value: Value) -> ValueResult<()> {
            Err(ValueError::NoSuchSlot {
                kind: "property",
                index: slot,
            })
        }
    }

    struct SampleDuck;

    impl Introspect for SampleDuck {
        fn type_key(&self) -> TypeKey {
            TypeKey::of::<Self>()
        }

        fn is_synthesized(&self) -> bool {
            true
        }

        fn list_properties(&self) -> Vec<PropertyInfo> {
            Vec::new()
        }

        fn list_fields(&self) -> Vec<FieldInfo> {
            vec![
                FieldInfo::new("_Name", ValueType::Str, 0),
                FieldInfo::new("_name", ValueType::Str, 1),
            ]
        }

        fn read_property(&self, slot: usize) -> ValueResult<Value> {
            Err(ValueError::NoSuchSlot {
                kind: "property",
                index: slot,
            })
        }

        fn write_property(&mut self, slot: usize, _value: Value) -> ValueResult<()> {
            Err(ValueError::NoSuchSlot {
                kind: "property",
                index: slot,
            })
        }
    }

    #[test]
    fn test_metadata_tables() {
        let meta = TypeMetadata::from_object(&Sample);
        assert_eq!(meta.type_key(), TypeKey::of::<Sample>());
        assert!(!meta.is_synthesized());

        let exact = meta.properties(MatchMode::Exact);
        assert!(exact.contains("Name"));
        assert!(!exact.contains("name"));

        let fuzzy = meta.properties(MatchMode::Fuzzy);
        assert_eq!(fuzzy.get("name").map(|p| p.slot), Some(0));
        assert_eq!(fuzzy.get("AGE").map(|p| p.slot), Some(1));

        assert!(meta.methods(MatchMode::Exact).contains("Greet"));
        assert!(meta.methods(MatchMode::Fuzzy).contains("greet"));
        assert!(!meta.methods(MatchMode::Exact).contains("greet"));
    }

    #[test]
    fn test_fields_only_indexed_for_synthesized_types() {
        assert!(TypeMetadata::from_object(&Sample).fields().is_none());

        let meta = TypeMetadata::from_object(&SampleDuck);
        assert!(meta.is_synthesized());
        let fields = meta.fields().unwrap();
        // Literal names, no case folding
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("_Name").map(|f| f.slot), Some(0));
        assert_eq!(fields.get("_name").map(|f| f.slot), Some(1));
        assert!(fields.get("_NAME").is_none());
    }

    #[test]
    fn test_cache_populates_once_per_type() {
        let cache = MetadataCache::new();
        assert!(cache.is_empty());

        let first = cache.metadata_for(&Sample);
        let second = cache.metadata_for(&Sample);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.populations(), 1);
        assert_eq!(cache.len(), 1);

        cache.metadata_for(&SampleDuck);
        assert_eq!(cache.populations(), 2);
        assert!(cache.contains(&TypeKey::of::<SampleDuck>()));
        assert!(cache.get(&TypeKey::of::<Sample>()).is_some());
        assert!(cache.get(&TypeKey::of::<String>()).is_none());
    }

    #[test]
    fn test_cache_concurrent_population() {
        let cache = MetadataCache::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        cache.metadata_for(&Sample);
                        cache.metadata_for(&SampleDuck);
                    }
                });
            }
        });
        assert_eq!(cache.populations(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_separate_caches_are_isolated() {
        let a = MetadataCache::new();
        let b = MetadataCache::new();
        a.metadata_for(&Sample);
        assert!(a.contains(&TypeKey::of::<Sample>()));
        assert!(!b.contains(&TypeKey::of::<Sample>()));
    }
}
