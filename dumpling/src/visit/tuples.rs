//! Tuple and grouping emission.
//!
//! A grouping (one key, many elements) renders as a `(key, [elements])`
//! pair, which round-trips its shape without inventing a dedicated type.

use super::{KnownTypeVisitor, VisitScope, truncation_marker};
use crate::inspector::TypeSchema;
use crate::reflect::Reflect;
use crate::writer::{Emit, emit};

/// Renders tuples and groupings as value-tuple constructs.
pub struct TupleVisitor;

impl KnownTypeVisitor for TupleVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| s.tuple.is_some() || s.grouping.is_some())
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let max = scope.options().max_collection_size;

        if let Some(grouping) = scope.schema.and_then(|s| s.grouping.clone()) {
            let (key, elements) = (grouping.parts)(scope.value);
            let total = elements.len();
            let mut items: Vec<Emit<'_>> = elements
                .into_iter()
                .take(max)
                .map(|element| scope.defer(element))
                .collect();
            if total > max {
                items.push(truncation_marker(total, max));
            }
            let key_emit = scope.defer(key);
            let elements_emit = emit(move |w| w.array_create(None, items, false, None));
            scope.writer.tuple(vec![key_emit, elements_emit]);
            return;
        }

        if let Some(tuple) = scope.schema.and_then(|s| s.tuple.clone()) {
            let items: Vec<Emit<'_>> = (tuple.items)(scope.value)
                .into_iter()
                .map(|item| scope.defer(item))
                .collect();
            scope.writer.tuple(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::{SchemaInspector, TypeInspector};

    #[test]
    fn test_claims_tuples_and_groupings() {
        let inspector = SchemaInspector::builder().tuple2_of::<i32, String>().build();
        let visitor = TupleVisitor;
        let pair = (1i32, String::from("one"));
        assert!(visitor.is_suitable_for(&pair, inspector.schema(&pair as &dyn Reflect)));
        assert!(!visitor.is_suitable_for(&1i32, inspector.schema(&1i32 as &dyn Reflect)));
    }
}
