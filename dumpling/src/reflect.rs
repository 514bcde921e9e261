//! Dynamic value model for graph traversal.
//!
//! Rust has no ambient runtime reflection, so dumped values travel as
//! `&dyn Reflect` trait objects. The trait is blanket-implemented for every
//! `'static` type; shape information (members, adapters, variant tables)
//! comes from the caller-supplied [`TypeInspector`](crate::TypeInspector)
//! registration table, not from the value itself.

use std::any::{Any, TypeId};

/// A value that can be visited by the dumper.
///
/// Implemented automatically for every `'static` type. Concrete access goes
/// through [`downcast_ref`](dyn Reflect::downcast_ref); identity (for cycle
/// detection) through [`identity`](dyn Reflect::identity).
pub trait Reflect: Any {
    /// The value as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The fully-qualified type path, as reported by the compiler.
    fn type_path(&self) -> &'static str;
}

impl<T: Any> Reflect for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_path(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn Reflect {
    /// Downcast to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Check whether the value is of a concrete type.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// The `TypeId` of the underlying concrete type.
    pub fn reflect_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Identity key used for ancestor tracking.
    ///
    /// A bare data pointer is not enough: a struct and its first member share
    /// an address, so the concrete `TypeId` is part of the key.
    pub fn identity(&self) -> NodeIdentity {
        NodeIdentity {
            ptr: self.as_any() as *const dyn Any as *const (),
            type_id: self.reflect_type_id(),
        }
    }
}

/// Reference identity of a visited node.
///
/// Two distinct values that compare equal have different identities; the
/// cycle guard must never conflate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdentity {
    ptr: *const (),
    type_id: TypeId,
}

/// The result of reading a member, element, or unwrapped value.
///
/// `Ref` borrows from the instance being described; `Owned` carries a value
/// computed by the accessor (owned values are never ancestor-tracked, since a
/// freshly computed value cannot appear on its own ancestor path).
pub enum FieldValue<'a> {
    /// An absent value (e.g. an unset `Option`).
    Null,
    /// A borrow into the instance.
    Ref(&'a dyn Reflect),
    /// A value computed at read time.
    Owned(Box<dyn Reflect>),
}

impl<'a> FieldValue<'a> {
    /// View the value, if present.
    pub fn as_reflect(&self) -> Option<&dyn Reflect> {
        match self {
            FieldValue::Null => None,
            FieldValue::Ref(v) => Some(*v),
            FieldValue::Owned(b) => Some(b.as_ref()),
        }
    }

    /// Whether the value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Wrap a concrete borrow.
    pub fn of<T: Any>(value: &'a T) -> Self {
        FieldValue::Ref(value)
    }

    /// Wrap a computed value.
    pub fn owned<T: Any>(value: T) -> Self {
        FieldValue::Owned(Box::new(value))
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            // Method syntax would resolve through the blanket impl on the
            // reference type and demand `'a: 'static`.
            FieldValue::Ref(v) => write!(f, "Ref({})", Reflect::type_path(*v)),
            FieldValue::Owned(v) => write!(f, "Owned({})", Reflect::type_path(v.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let n = 42i32;
        let r: &dyn Reflect = &n;
        assert_eq!(r.downcast_ref::<i32>(), Some(&42));
        assert!(r.downcast_ref::<u32>().is_none());
        assert!(r.is::<i32>());
    }

    #[test]
    fn test_identity_distinguishes_equal_values() {
        let a = String::from("x");
        let b = String::from("x");
        assert_eq!(a, b);
        let (ra, rb): (&dyn Reflect, &dyn Reflect) = (&a, &b);
        assert_ne!(ra.identity(), rb.identity());
        assert_eq!(ra.identity(), ra.identity());
    }

    #[test]
    fn test_identity_distinguishes_struct_and_first_member() {
        struct Outer {
            first: i64,
        }
        let outer = Outer { first: 1 };
        let whole: &dyn Reflect = &outer;
        let member: &dyn Reflect = &outer.first;
        // Same address, different type.
        assert_ne!(whole.identity(), member.identity());
    }

    #[test]
    fn test_debug_names_concrete_type() {
        let s = String::from("x");
        let rendered = format!("{:?}", FieldValue::of(&s));
        assert!(rendered.starts_with("Ref("), "{rendered}");
        assert!(rendered.contains("String"), "{rendered}");
        assert_eq!(format!("{:?}", FieldValue::owned(5u8)), "Owned(u8)");
        assert_eq!(format!("{:?}", FieldValue::Null), "Null");
    }

    #[test]
    fn test_field_value() {
        let v = 1u8;
        assert!(FieldValue::of(&v).as_reflect().is_some());
        assert!(FieldValue::Null.is_null());
        let owned = FieldValue::owned(String::from("hi"));
        assert_eq!(
            owned.as_reflect().unwrap().downcast_ref::<String>().unwrap(),
            "hi"
        );
    }
}
