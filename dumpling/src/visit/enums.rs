//! Enum emission: variant references, flag chains, and raw-value casts.

use super::{KnownTypeVisitor, VisitScope};
use crate::inspector::TypeSchema;
use crate::reflect::Reflect;
use crate::writer::{Emit, Literal, emit};

/// Renders values of types with a registered variant table.
pub struct EnumVisitor;

impl KnownTypeVisitor for EnumVisitor {
    fn is_suitable_for(&self, _value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool {
        schema.is_some_and(|s| s.enumeration.is_some())
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let Some(enumeration) = scope.schema.and_then(|s| s.enumeration.clone()) else {
            return;
        };
        let ty = scope.type_descriptor();
        let format = scope.options().integer_format;
        let discriminant = (enumeration.discriminant)(scope.value);

        // Exact variant wins even for flags enums.
        if let Some((name, _)) = enumeration
            .variants
            .iter()
            .find(|(_, v)| *v == discriminant)
        {
            scope.writer.member_reference(Some(&ty), name);
            return;
        }

        if enumeration.flags && discriminant != 0 {
            let mut covered = 0u64;
            let mut names = Vec::new();
            for (name, bits) in &enumeration.variants {
                if *bits != 0 && discriminant & *bits == *bits {
                    covered |= *bits;
                    names.push(name.clone());
                }
            }
            if covered == discriminant && !names.is_empty() {
                let operands: Vec<Emit<'_>> = names
                    .into_iter()
                    .map(|name| {
                        let ty = ty.clone();
                        emit(move |w| w.member_reference(Some(&ty), &name))
                    })
                    .collect();
                scope.writer.flags_or(operands);
                return;
            }
        }

        // No variant covers the value; keep it honest with a cast.
        let raw = emit(move |w| w.literal(&Literal::UInt(u128::from(discriminant)), &format));
        scope.writer.cast(&ty, raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::{SchemaInspector, TypeInspector};

    #[derive(Clone, Copy)]
    #[allow(dead_code)]
    enum Color {
        Red,
        Green,
    }

    fn color_inspector() -> SchemaInspector {
        SchemaInspector::builder()
            .enumeration::<Color>(&[("Red", 0), ("Green", 1)], false, |c| *c as u64)
            .build()
    }

    #[test]
    fn test_claims_registered_enums_only() {
        let inspector = color_inspector();
        let visitor = EnumVisitor;
        let color = Color::Green;
        let schema = inspector.schema(&color as &dyn Reflect);
        assert!(visitor.is_suitable_for(&color, schema));
        assert!(!visitor.is_suitable_for(&1u64, inspector.schema(&1u64 as &dyn Reflect)));
    }

    #[test]
    fn test_flag_decomposition_covers_bits() {
        // Mirror of the visitor's bit loop on a known table.
        let variants = [("Read", 1u64), ("Write", 2u64), ("Execute", 4u64)];
        let discriminant = 5u64;
        let mut covered = 0u64;
        let mut names = Vec::new();
        for (name, bits) in &variants {
            if discriminant & bits == *bits {
                covered |= bits;
                names.push(*name);
            }
        }
        assert_eq!(covered, discriminant);
        assert_eq!(names, vec!["Read", "Execute"]);
    }
}
