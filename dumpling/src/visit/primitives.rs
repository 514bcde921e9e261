//! Literal emission for primitive scalars and strings.

use super::{KnownTypeVisitor, VisitScope};
use crate::inspector::TypeSchema;
use crate::reflect::Reflect;
use crate::writer::Literal;

/// Renders booleans, characters, integers, floats, and strings as literals.
pub struct PrimitivesVisitor;

impl KnownTypeVisitor for PrimitivesVisitor {
    fn is_suitable_for(&self, value: &dyn Reflect, _schema: Option<&TypeSchema>) -> bool {
        literal_of(value).is_some()
    }

    fn visit(&self, scope: &mut VisitScope<'_, '_>) {
        let format = scope.options().integer_format;
        if let Some(literal) = literal_of(scope.value) {
            scope.writer.literal(&literal, &format);
        }
    }
}

fn literal_of(value: &dyn Reflect) -> Option<Literal> {
    if let Some(v) = value.downcast_ref::<bool>() {
        return Some(Literal::Bool(*v));
    }
    if let Some(v) = value.downcast_ref::<char>() {
        return Some(Literal::Char(*v));
    }
    if let Some(v) = value.downcast_ref::<String>() {
        return Some(Literal::Str(v.clone()));
    }
    if let Some(v) = value.downcast_ref::<&str>() {
        return Some(Literal::Str((*v).to_string()));
    }
    signed_of(value).or_else(|| unsigned_of(value)).or_else(|| float_of(value))
}

fn signed_of(value: &dyn Reflect) -> Option<Literal> {
    if let Some(v) = value.downcast_ref::<i8>() {
        return Some(Literal::Int(i128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i16>() {
        return Some(Literal::Int(i128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i32>() {
        return Some(Literal::Int(i128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i64>() {
        return Some(Literal::Int(i128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<i128>() {
        return Some(Literal::Int(*v));
    }
    if let Some(v) = value.downcast_ref::<isize>() {
        return Some(Literal::Int(*v as i128));
    }
    None
}

fn unsigned_of(value: &dyn Reflect) -> Option<Literal> {
    if let Some(v) = value.downcast_ref::<u8>() {
        return Some(Literal::UInt(u128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u16>() {
        return Some(Literal::UInt(u128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u32>() {
        return Some(Literal::UInt(u128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u64>() {
        return Some(Literal::UInt(u128::from(*v)));
    }
    if let Some(v) = value.downcast_ref::<u128>() {
        return Some(Literal::UInt(*v));
    }
    if let Some(v) = value.downcast_ref::<usize>() {
        return Some(Literal::UInt(*v as u128));
    }
    None
}

fn float_of(value: &dyn Reflect) -> Option<Literal> {
    if let Some(v) = value.downcast_ref::<f32>() {
        return Some(Literal::F32(*v));
    }
    if let Some(v) = value.downcast_ref::<f64>() {
        return Some(Literal::F64(*v));
    }
    None
}
