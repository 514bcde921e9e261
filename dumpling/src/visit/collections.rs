//! Keyed and sequential collection emission.

use super::{KnownTypeVisitor, VisitScope, truncation_marker};
use crate::descriptor::TypeDescriptor;
use crate::inspector::TypeSchema;
use crate::reflect::Reflect;
use crate::writer::{Emit, emit};

/// Renders keyed collections as builder constructs of key/value entries.
///
/// When the writer has an implicit key→value shorthand the entries use it;
/// otherwise each entry falls back to a 2-tuple.
pub struct DictionaryVisitor;

impl KnownTypeVisitor for DictionaryVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| s.map.is_some())
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let Some(map) = scope.schema.and_then(|s| s.map.clone()) else {
            return;
        };
        let ty = scope.type_descriptor();
        let max = scope.options().max_collection_size;
        let implicit = scope.writer.supports_implicit_key_value();

        let pairs = (map.pairs)(scope.value);
        let total = pairs.len();
        let mut items: Vec<Emit<'_>> = Vec::with_capacity(total.min(max));
        for (key, value) in pairs.into_iter().take(max) {
            let key_emit = scope.defer(key);
            let value_emit = scope.defer(value);
            items.push(if implicit {
                emit(move |w| w.key_value(key_emit, value_emit))
            } else {
                emit(move |w| w.tuple(vec![key_emit, value_emit]))
            });
        }
        if total > max {
            items.push(truncation_marker(total, max));
        }

        let single_line = items.is_empty();
        scope.writer.array_create(Some(&ty), items, single_line, None);
    }
}

/// Renders sequences and arrays as builder constructs of elements.
pub struct CollectionVisitor;

impl KnownTypeVisitor for CollectionVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| s.sequence.is_some())
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let Some(sequence) = scope.schema.and_then(|s| s.sequence.clone()) else {
            return;
        };
        let ty = scope.type_descriptor();
        let max = scope.options().max_collection_size;

        let elements = (sequence.items)(scope.value);
        let total = elements.len();
        let mut items: Vec<Emit<'_>> = elements
            .into_iter()
            .take(max)
            .map(|element| scope.defer(element))
            .collect();
        if total > max {
            items.push(truncation_marker(total, max));
        }

        let size = matches!(ty, TypeDescriptor::Array { .. }).then(|| total.min(max));
        let single_line = items.is_empty();
        scope.writer.array_create(Some(&ty), items, single_line, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::{SchemaInspector, TypeInspector};
    use std::collections::BTreeMap;

    #[test]
    fn test_dictionary_claims_maps_only() {
        let inspector = SchemaInspector::builder()
            .btree_map_of::<String, i32>()
            .vec_of::<i32>()
            .build();
        let visitor = DictionaryVisitor;
        let map: BTreeMap<String, i32> = BTreeMap::new();
        let list = vec![1i32];
        assert!(visitor.is_suitable_for(&map, inspector.schema(&map as &dyn Reflect)));
        assert!(!visitor.is_suitable_for(&list, inspector.schema(&list as &dyn Reflect)));
    }

    #[test]
    fn test_collection_claims_sequences() {
        let inspector = SchemaInspector::builder()
            .vec_of::<i32>()
            .array_of::<u8, 3>()
            .build();
        let visitor = CollectionVisitor;
        let list = vec![1i32, 2];
        let bytes = [1u8, 2, 3];
        assert!(visitor.is_suitable_for(&list, inspector.schema(&list as &dyn Reflect)));
        assert!(visitor.is_suitable_for(&bytes, inspector.schema(&bytes as &dyn Reflect)));
        assert!(!visitor.is_suitable_for(&1u8, inspector.schema(&1u8 as &dyn Reflect)));
    }
}
