//! Anonymous (structurally-typed) shape emission.

use super::{KnownTypeVisitor, VisitScope};
use crate::descriptor::base_description;
use crate::inspector::{BindingPolicy, TypeSchema};
use crate::reflect::Reflect;

/// Renders anonymous shapes as typeless object-create constructs.
///
/// Members come from a property-only enumeration that keeps read-only
/// properties, independent of the main pipeline's binding policy: an
/// anonymous shape has no settable surface to filter by.
pub struct AnonymousVisitor;

impl KnownTypeVisitor for AnonymousVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| s.anonymous)
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let description = base_description(
            scope.value,
            scope.engine.inspector(),
            BindingPolicy::public_instance(),
            false,
            false,
            BindingPolicy::public_instance(),
        );
        let initializers = scope.member_initializers(description.members);
        let single_line = initializers.len() <= 1;
        scope
            .writer
            .object_create(None, Vec::new(), initializers, single_line);
    }
}
