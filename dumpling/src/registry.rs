//! Insertion-ordered registry of known-type visitors.
//!
//! Dispatch is first-match-wins in registration order, so callers splice
//! custom visitors at a specific priority by id rather than reconstructing
//! the whole list. The registry is frozen once a dump begins.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::RegistryError;
use crate::visit::KnownTypeVisitor;

/// One registry edit recorded on [`DumpOptions`](crate::DumpOptions) and
/// applied when the dumper is constructed.
#[derive(Clone)]
pub enum RegistryTweak {
    /// Append a visitor after all existing entries.
    Append {
        /// New visitor id.
        id: &'static str,
        /// The visitor.
        visitor: Arc<dyn KnownTypeVisitor>,
    },
    /// Insert a visitor immediately before an existing id.
    InsertBefore {
        /// Existing id to insert before.
        anchor: &'static str,
        /// New visitor id.
        id: &'static str,
        /// The visitor.
        visitor: Arc<dyn KnownTypeVisitor>,
    },
    /// Insert a visitor immediately after an existing id.
    InsertAfter {
        /// Existing id to insert after.
        anchor: &'static str,
        /// New visitor id.
        id: &'static str,
        /// The visitor.
        visitor: Arc<dyn KnownTypeVisitor>,
    },
    /// Replace the visitor registered under an id, keeping its position.
    Replace {
        /// Existing id to replace.
        id: &'static str,
        /// The replacement visitor.
        visitor: Arc<dyn KnownTypeVisitor>,
    },
    /// Remove the visitor registered under an id.
    Remove {
        /// Existing id to remove.
        id: &'static str,
    },
}

/// Ordered id → visitor mapping.
pub struct VisitorRegistry {
    entries: IndexMap<&'static str, Arc<dyn KnownTypeVisitor>>,
}

impl VisitorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// The registry with all built-in visitors in their default order.
    pub fn built_in() -> Self {
        let mut registry = Self::new();
        for (id, visitor) in crate::visit::built_ins() {
            registry.entries.insert(id, visitor);
        }
        registry
    }

    /// Append a visitor after all existing entries.
    pub fn append(
        &mut self,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        self.entries.insert(id, visitor);
        Ok(())
    }

    /// Insert a visitor immediately before `anchor`.
    pub fn insert_before(
        &mut self,
        anchor: &str,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        let index = self
            .entries
            .get_index_of(anchor)
            .ok_or_else(|| RegistryError::UnknownId(anchor.to_string()))?;
        self.entries.shift_insert(index, id, visitor);
        Ok(())
    }

    /// Insert a visitor immediately after `anchor`.
    pub fn insert_after(
        &mut self,
        anchor: &str,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        let index = self
            .entries
            .get_index_of(anchor)
            .ok_or_else(|| RegistryError::UnknownId(anchor.to_string()))?;
        self.entries.shift_insert(index + 1, id, visitor);
        Ok(())
    }

    /// Replace the visitor under `id`, keeping its position.
    pub fn replace(
        &mut self,
        id: &str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Result<(), RegistryError> {
        match self.entries.get_mut(id) {
            Some(slot) => {
                *slot = visitor;
                Ok(())
            }
            None => Err(RegistryError::UnknownId(id.to_string())),
        }
    }

    /// Remove the visitor under `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Result<(), RegistryError> {
        self.entries
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| RegistryError::UnknownId(id.to_string()))
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered ids, in dispatch order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Visitors in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arc<dyn KnownTypeVisitor>)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    /// Apply recorded tweaks in order.
    pub fn apply(&mut self, tweaks: &[RegistryTweak]) -> Result<(), RegistryError> {
        for tweak in tweaks {
            match tweak {
                RegistryTweak::Append { id, visitor } => {
                    self.append(id, Arc::clone(visitor))?;
                }
                RegistryTweak::InsertBefore { anchor, id, visitor } => {
                    self.insert_before(anchor, id, Arc::clone(visitor))?;
                }
                RegistryTweak::InsertAfter { anchor, id, visitor } => {
                    self.insert_after(anchor, id, Arc::clone(visitor))?;
                }
                RegistryTweak::Replace { id, visitor } => {
                    self.replace(id, Arc::clone(visitor))?;
                }
                RegistryTweak::Remove { id } => {
                    self.remove(id)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for VisitorRegistry {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::{VisitScope, KnownTypeVisitor};
    use crate::inspector::TypeSchema;
    use crate::reflect::Reflect;

    struct Nop;

    impl KnownTypeVisitor for Nop {
        fn is_suitable_for(&self, _value: &dyn Reflect, _schema: Option<&TypeSchema>) -> bool {
            false
        }

        fn visit(&self, _scope: &mut VisitScope<'_, '_>) {}
    }

    #[test]
    fn test_built_in_order() {
        let registry = VisitorRegistry::built_in();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                "primitives",
                "date-time",
                "enum",
                "known-idents",
                "tuple",
                "record",
                "anonymous",
                "dictionary",
                "collection",
            ]
        );
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut registry = VisitorRegistry::built_in();
        registry
            .insert_before("record", "custom-a", Arc::new(Nop))
            .unwrap();
        registry
            .insert_after("custom-a", "custom-b", Arc::new(Nop))
            .unwrap();
        let ids: Vec<_> = registry.ids().collect();
        let a = ids.iter().position(|i| *i == "custom-a").unwrap();
        let b = ids.iter().position(|i| *i == "custom-b").unwrap();
        let record = ids.iter().position(|i| *i == "record").unwrap();
        assert_eq!(b, a + 1);
        assert_eq!(record, b + 1);
    }

    #[test]
    fn test_unknown_anchor() {
        let mut registry = VisitorRegistry::built_in();
        let err = registry
            .insert_before("nope", "custom", Arc::new(Nop))
            .unwrap_err();
        assert_eq!(err, crate::RegistryError::UnknownId("nope".to_string()));
    }

    #[test]
    fn test_duplicate_id() {
        let mut registry = VisitorRegistry::built_in();
        let err = registry.append("record", Arc::new(Nop)).unwrap_err();
        assert_eq!(err, crate::RegistryError::DuplicateId("record".to_string()));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut registry = VisitorRegistry::built_in();
        registry.remove("enum").unwrap();
        assert!(!registry.contains("enum"));
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids[0], "primitives");
        assert_eq!(ids[1], "date-time");
        assert_eq!(ids[2], "known-idents");
    }
}
