//! Record emission: types constructed through a declared constructor.

use super::{KnownTypeVisitor, VisitScope, error_marker};
use crate::descriptor::{MemberDescriptor, base_description};
use crate::inspector::TypeSchema;
use crate::reflect::Reflect;
use crate::writer::{Emit, emit};

/// Renders types whose schema names constructor-covered properties.
///
/// Members covered by the constructor become positional (or named)
/// arguments in parameter order; everything else stays in the initializer
/// list. Constructor-covered properties are typically read-only, so they
/// are enumerated without the writable filter; the filter is re-applied to
/// the leftover initializer members. Constructor arguments are never
/// suppressed, since dropping a positional argument would shift the rest.
pub struct RecordVisitor;

impl KnownTypeVisitor for RecordVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| !s.ctor_params.is_empty())
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let ctor_names = scope
            .schema
            .map(|s| s.ctor_params.clone())
            .unwrap_or_default();
        let options = scope.options();
        let use_named = options.use_named_arguments;
        let description = base_description(
            scope.value,
            scope.engine.inspector(),
            options.property_binding,
            false,
            options.include_fields,
            options.field_binding,
        );
        let ty = description.type_descriptor.clone();
        let mut members = description.members;

        let mut ctor_args: Vec<Emit<'_>> = Vec::with_capacity(ctor_names.len());
        for name in &ctor_names {
            let Some(position) = members.iter().position(|m| m.name() == name) else {
                continue;
            };
            let member = members.remove(position);
            ctor_args.push(read_arg(scope, member, use_named));
        }
        if options.writable_properties_only {
            if let Some(schema) = scope.schema {
                members.retain(|m| {
                    schema
                        .properties
                        .iter()
                        .find(|p| p.name == m.name())
                        .is_none_or(|p| p.writable)
                });
            }
        }

        let initializers = scope.member_initializers(members);
        let single_line = initializers.len() <= 1;
        scope
            .writer
            .object_create(Some(&ty), ctor_args, initializers, single_line);
    }
}

fn read_arg<'a>(
    scope: &VisitScope<'a, '_>,
    member: MemberDescriptor<'a>,
    use_named: bool,
) -> Emit<'a> {
    let name = member.name().to_string();
    let value = match member.read() {
        Ok(value) => scope.defer(value),
        Err(error) => {
            tracing::warn!(member = %name, %error, "constructor argument read failed");
            error_marker(error)
        }
    };
    if use_named {
        emit(move |w| w.named_argument(&name, value))
    } else {
        value
    }
}
