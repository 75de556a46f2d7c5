//! Backing-field resolution for synthesized objects
//!
//! A synthesized ("duck") object has no usable properties of its own. Each
//! property `P` is stored in a non-public field named `<prefix>P`, with the
//! prefix defaulting to `_`. Field names are matched literally.

use crate::error::{ShimError, ShimResult};
use crate::reflect::{FieldInfo, NameIndex};
use crate::TypeKey;

/// Resolves property names to backing fields
#[derive(Debug, Clone, Copy)]
pub struct BackingFieldResolver<'a> {
    type_key: TypeKey,
    fields: Option<&'a NameIndex<FieldInfo>>,
    prefix: &'a str,
}

impl<'a> BackingFieldResolver<'a> {
    /// Create a resolver over a type's field table
    pub fn new(
        type_key: TypeKey,
        fields: Option<&'a NameIndex<FieldInfo>>,
        prefix: &'a str,
    ) -> Self {
        Self {
            type_key,
            fields,
            prefix,
        }
    }

    /// Conventional backing field name for `property`
    pub fn field_name(&self, property: &str) -> String {
        format!("{}{}", self.prefix, property)
    }

    /// Find the backing field of `property`
    pub fn resolve(&self, property: &str) -> ShimResult<&'a FieldInfo> {
        let field = self.field_name(property);
        self.fields
            .and_then(|fields| fields.get(&field))
            .ok_or_else(|| ShimError::BackingFieldNotFound {
                type_name: self.type_key.name(),
                property: property.to_string(),
                field,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShimErrorKind;
    use crate::reflect::MatchMode;
    use crate::ValueType;

    struct Duck;

    fn fields() -> NameIndex<FieldInfo> {
        NameIndex::from_entries(
            MatchMode::Exact,
            vec![
                ("_Name".to_string(), FieldInfo::new("_Name", ValueType::Str, 0)),
                ("m_Age".to_string(), FieldInfo::new("m_Age", ValueType::I32, 1)),
            ],
        )
    }

    #[test]
    fn test_resolves_prefixed_field() {
        let table = fields();
        let resolver = BackingFieldResolver::new(TypeKey::of::<Duck>(), Some(&table), "_");
        assert_eq!(resolver.field_name("Name"), "_Name");
        assert_eq!(resolver.resolve("Name").unwrap().slot, 0);
    }

    #[test]
    fn test_literal_matching() {
        let table = fields();
        let resolver = BackingFieldResolver::new(TypeKey::of::<Duck>(), Some(&table), "_");
        let err = resolver.resolve("name").unwrap_err();
        assert_eq!(err.kind(), ShimErrorKind::BackingFieldNotFound);
        assert_eq!(err.member(), "name");
        match err {
            ShimError::BackingFieldNotFound { field, .. } => assert_eq!(field, "_name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_prefix() {
        let table = fields();
        let resolver = BackingFieldResolver::new(TypeKey::of::<Duck>(), Some(&table), "m_");
        assert_eq!(resolver.resolve("Age").unwrap().slot, 1);
        assert!(resolver.resolve("Name").is_err());
    }

    #[test]
    fn test_missing_field_table() {
        let resolver = BackingFieldResolver::new(TypeKey::of::<Duck>(), None, "_");
        assert_eq!(
            resolver.resolve("Name").unwrap_err().kind(),
            ShimErrorKind::BackingFieldNotFound
        );
    }
}
