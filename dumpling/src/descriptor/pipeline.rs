//! The object descriptor pipeline.
//!
//! Produces an [`ObjectDescription`] for a value: properties first (under the
//! configured binding policy), then fields when enabled, in declaration
//! order. A chain of [`DescriptorMiddleware`] stages can rewrite the result;
//! the last-registered stage wraps all previous ones, and each stage receives
//! the rest of the pipeline as a lazy callable it may choose not to force.

use std::sync::Arc;

use super::member::{MemberDescriptor, MemberKind};
use super::type_descriptor::TypeDescriptor;
use crate::inspector::{BindingPolicy, TypeInspector};
use crate::options::DumpOptions;
use crate::reflect::Reflect;

/// The extracted shape of one object: constructor arguments and members.
///
/// Produced per object instance at visit time; immutable once returned to
/// the visitor; never persisted.
pub struct ObjectDescription<'a> {
    /// Resolved type of the object.
    pub type_descriptor: TypeDescriptor,
    /// Ordered constructor-argument descriptors. The generic pipeline always
    /// reports an empty list; record-like visitors and middleware fill it.
    pub ctor_args: Vec<MemberDescriptor<'a>>,
    /// Ordered member descriptors (properties first, then fields).
    pub members: Vec<MemberDescriptor<'a>>,
}

impl<'a> ObjectDescription<'a> {
    /// An empty description with just a type.
    pub fn new(type_descriptor: TypeDescriptor) -> Self {
        Self {
            type_descriptor,
            ctor_args: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// An interceptor that can rewrite an [`ObjectDescription`] before use.
///
/// Stages registered `[A, B]` compose so that `B` sees `A`'s
/// already-transformed result and `A` sees the base description; `next` is
/// lazy, so a stage that replaces the description wholesale never pays for
/// the stages beneath it.
pub trait DescriptorMiddleware: Send + Sync {
    /// Describe `value`, optionally delegating to the rest of the pipeline.
    fn describe<'a>(
        &self,
        value: &'a dyn Reflect,
        type_descriptor: &TypeDescriptor,
        next: &mut dyn FnMut() -> ObjectDescription<'a>,
    ) -> ObjectDescription<'a>;
}

/// Produce the base (middleware-free) description of a value.
///
/// `property_binding` selects properties; `writable_only` drops read-only
/// properties; fields are appended after properties when `include_fields`,
/// selected by the independent `field_binding` policy.
pub fn base_description<'a>(
    value: &'a dyn Reflect,
    inspector: &'a dyn TypeInspector,
    property_binding: BindingPolicy,
    writable_only: bool,
    include_fields: bool,
    field_binding: BindingPolicy,
) -> ObjectDescription<'a> {
    let mut description = ObjectDescription::new(inspector.describe_type(value));
    let Some(schema) = inspector.schema(value) else {
        return description;
    };

    for property in &schema.properties {
        if !property_binding.admits(property.visibility, property.is_static) {
            continue;
        }
        if writable_only && !property.writable {
            continue;
        }
        let get = Arc::clone(&property.get);
        description.members.push(MemberDescriptor::new(
            MemberKind::Property,
            &property.name,
            &property.declared_type,
            Box::new(move || get(value)),
        ));
    }

    if include_fields {
        for field in &schema.fields {
            if !field_binding.admits(field.visibility, field.is_static) {
                continue;
            }
            let get = Arc::clone(&field.get);
            description.members.push(MemberDescriptor::new(
                MemberKind::Field,
                &field.name,
                &field.declared_type,
                Box::new(move || get(value)),
            ));
        }
    }

    description
}

/// Describe a value through the full pipeline configured in `options`.
pub fn describe_object<'a>(
    value: &'a dyn Reflect,
    inspector: &'a dyn TypeInspector,
    options: &DumpOptions,
) -> ObjectDescription<'a> {
    let type_descriptor = inspector.describe_type(value);
    let property_binding = options.property_binding;
    let field_binding = options.field_binding;
    let writable_only = options.writable_properties_only;
    let include_fields = options.include_fields;

    let mut chain: Box<dyn FnMut() -> ObjectDescription<'a> + '_> = Box::new(move || {
        base_description(
            value,
            inspector,
            property_binding,
            writable_only,
            include_fields,
            field_binding,
        )
    });

    // Registration order [A, B] composes as B(A(base)).
    for middleware in &options.middleware {
        let middleware = Arc::clone(middleware);
        let ty = type_descriptor.clone();
        let mut prev = chain;
        chain = Box::new(move || middleware.describe(value, &ty, prev.as_mut()));
    }

    chain()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::SchemaInspector;
    use crate::reflect::FieldValue;

    struct Point {
        x: i32,
        y: i32,
    }

    fn point_inspector() -> SchemaInspector {
        SchemaInspector::builder()
            .object::<Point>(|s| {
                s.property("X", |p: &Point| &p.x)
                    .property("Y", |p: &Point| &p.y)
                    .field("tag", |_: &Point| &0i32)
            })
            .build()
    }

    #[test]
    fn test_base_description_order() {
        let inspector = point_inspector();
        let point = Point { x: 1, y: 2 };
        let description = base_description(
            &point as &dyn Reflect,
            &inspector,
            BindingPolicy::public_instance(),
            true,
            true,
            BindingPolicy::public_instance(),
        );
        let names: Vec<_> = description.members.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["X", "Y", "tag"]);
        assert_eq!(description.members[2].kind(), MemberKind::Field);
        assert!(description.ctor_args.is_empty());
    }

    #[test]
    fn test_fields_excluded_by_default() {
        let inspector = point_inspector();
        let point = Point { x: 1, y: 2 };
        let description = describe_object(
            &point as &dyn Reflect,
            &inspector,
            &DumpOptions::default(),
        );
        let names: Vec<_> = description.members.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }

    struct DropY;

    impl DescriptorMiddleware for DropY {
        fn describe<'a>(
            &self,
            _value: &'a dyn Reflect,
            _type_descriptor: &TypeDescriptor,
            next: &mut dyn FnMut() -> ObjectDescription<'a>,
        ) -> ObjectDescription<'a> {
            let mut description = next();
            description.members.retain(|m| m.name() != "Y");
            description
        }
    }

    struct RenameX;

    impl DescriptorMiddleware for RenameX {
        fn describe<'a>(
            &self,
            _value: &'a dyn Reflect,
            _type_descriptor: &TypeDescriptor,
            next: &mut dyn FnMut() -> ObjectDescription<'a>,
        ) -> ObjectDescription<'a> {
            let mut description = next();
            description.members = description
                .members
                .drain(..)
                .map(|m| if m.name() == "X" { m.renamed("Renamed") } else { m })
                .collect();
            description
        }
    }

    #[test]
    fn test_middleware_order_last_wraps_previous() {
        let inspector = point_inspector();
        let point = Point { x: 1, y: 2 };
        let options = DumpOptions::default()
            .with_middleware(Arc::new(DropY))
            .with_middleware(Arc::new(RenameX));
        let description = describe_object(&point as &dyn Reflect, &inspector, &options);
        let names: Vec<_> = description.members.iter().map(|m| m.name()).collect();
        // DropY ran first (saw the base), RenameX saw DropY's output.
        assert_eq!(names, vec!["Renamed"]);
    }

    struct Replace;

    impl DescriptorMiddleware for Replace {
        fn describe<'a>(
            &self,
            _value: &'a dyn Reflect,
            type_descriptor: &TypeDescriptor,
            _next: &mut dyn FnMut() -> ObjectDescription<'a>,
        ) -> ObjectDescription<'a> {
            let mut description = ObjectDescription::new(type_descriptor.clone());
            description.members.push(MemberDescriptor::new(
                MemberKind::Property,
                "Synthetic",
                "bool",
                Box::new(|| Ok(FieldValue::owned(true))),
            ));
            description
        }
    }

    #[test]
    fn test_middleware_may_skip_next() {
        let inspector = point_inspector();
        let point = Point { x: 1, y: 2 };
        let options = DumpOptions::default().with_middleware(Arc::new(Replace));
        let description = describe_object(&point as &dyn Reflect, &inspector, &options);
        assert_eq!(description.members.len(), 1);
        assert_eq!(description.members[0].name(), "Synthetic");
    }
}
