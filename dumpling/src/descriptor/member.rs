//! Member and constructor-argument descriptors.

use crate::error::AccessError;
use crate::reflect::FieldValue;

/// What kind of member a descriptor records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A field.
    Field,
    /// A property.
    Property,
    /// A constructor parameter (name may be empty for positional args).
    ConstructorParameter,
}

/// Deferred value read for one member.
///
/// Invoked only when downstream filtering needs the value or when the member
/// is actually emitted, so expensive reads are never paid for members that
/// get filtered out.
pub type ValueAccessor<'a> = Box<dyn Fn() -> Result<FieldValue<'a>, AccessError> + 'a>;

/// A single member (or constructor argument) extracted from an object.
///
/// Created fresh per describe call; never cached or shared across objects.
pub struct MemberDescriptor<'a> {
    kind: MemberKind,
    name: String,
    declared_type: String,
    accessor: ValueAccessor<'a>,
}

impl<'a> MemberDescriptor<'a> {
    /// Create a descriptor with a deferred accessor.
    pub fn new(
        kind: MemberKind,
        name: impl Into<String>,
        declared_type: impl Into<String>,
        accessor: ValueAccessor<'a>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            declared_type: declared_type.into(),
            accessor,
        }
    }

    /// The member kind.
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The member name (empty for unnamed constructor arguments).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified path of the declared member type.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Force the deferred read.
    pub fn read(&self) -> Result<FieldValue<'a>, AccessError> {
        (self.accessor)()
    }

    /// Rename the member (middleware convenience).
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl std::fmt::Debug for MemberDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;

    #[test]
    fn test_deferred_read() {
        use std::cell::Cell;

        let reads = Cell::new(0u32);
        let value = 7i32;
        let member = MemberDescriptor::new(
            MemberKind::Property,
            "Count",
            "i32",
            Box::new(|| {
                reads.set(reads.get() + 1);
                Ok(FieldValue::of(&value))
            }),
        );

        assert_eq!(reads.get(), 0, "accessor must not run eagerly");
        let read = member.read().unwrap();
        assert_eq!(reads.get(), 1);
        let v: &dyn Reflect = read.as_reflect().unwrap();
        assert_eq!(v.downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn test_renamed() {
        let member = MemberDescriptor::new(
            MemberKind::Field,
            "inner",
            "bool",
            Box::new(|| Ok(FieldValue::Null)),
        );
        assert_eq!(member.renamed("outer").name(), "outer");
    }
}
