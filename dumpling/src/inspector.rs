//! The type-inspector capability: a caller-supplied per-type registration
//! table.
//!
//! The engine never assumes ambient reflection. Everything it knows about a
//! type's shape (properties, fields, constructor parameters, enum variant
//! tables, sequence/map/nullable/tuple adapters) comes from a
//! [`TypeInspector`]. The stock implementation, [`SchemaInspector`], is an
//! insertion-ordered table of [`TypeSchema`] entries keyed by `TypeId`,
//! populated through the fluent [`SchemaBuilder`].
//!
//! # Example
//!
//! ```
//! use dumpling::{FieldValue, SchemaInspector};
//!
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let inspector = SchemaInspector::builder()
//!     .object::<Person>(|s| {
//!         s.property("Name", |p: &Person| &p.name)
//!             .property("Age", |p: &Person| &p.age)
//!     })
//!     .build();
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;
use crate::error::AccessError;
use crate::reflect::{FieldValue, Reflect};

/// Member visibility recorded in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Publicly accessible member.
    Public,
    /// Non-public member (opt-in via a [`BindingPolicy`]).
    NonPublic,
}

/// Selection policy for property or field enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPolicy {
    /// Include public members.
    pub include_public: bool,
    /// Include non-public members.
    pub include_non_public: bool,
    /// Include instance members.
    pub include_instance: bool,
    /// Include static members.
    pub include_static: bool,
}

impl BindingPolicy {
    /// Public instance members only.
    pub fn public_instance() -> Self {
        Self {
            include_public: true,
            include_non_public: false,
            include_instance: true,
            include_static: false,
        }
    }

    /// Every member regardless of visibility or staticness.
    pub fn all() -> Self {
        Self {
            include_public: true,
            include_non_public: true,
            include_instance: true,
            include_static: true,
        }
    }

    /// Whether a member with the given traits passes this policy.
    pub fn admits(&self, visibility: Visibility, is_static: bool) -> bool {
        let vis_ok = match visibility {
            Visibility::Public => self.include_public,
            Visibility::NonPublic => self.include_non_public,
        };
        let static_ok = if is_static {
            self.include_static
        } else {
            self.include_instance
        };
        vis_ok && static_ok
    }
}

impl Default for BindingPolicy {
    fn default() -> Self {
        Self::public_instance()
    }
}

/// Deferred member read against an instance.
pub type Accessor =
    Arc<dyn for<'a> Fn(&'a dyn Reflect) -> Result<FieldValue<'a>, AccessError> + Send + Sync>;

/// Enumerate the elements of a sequence-like value.
pub type SequenceAdapter =
    Arc<dyn for<'a> Fn(&'a dyn Reflect) -> Vec<FieldValue<'a>> + Send + Sync>;

/// Enumerate the pairs of a keyed collection.
pub type MapAdapter = Arc<
    dyn for<'a> Fn(&'a dyn Reflect) -> Vec<(FieldValue<'a>, FieldValue<'a>)> + Send + Sync,
>;

/// Unwrap a nullable wrapper; `None` means the value is absent.
pub type NullableAdapter =
    Arc<dyn for<'a> Fn(&'a dyn Reflect) -> Option<FieldValue<'a>> + Send + Sync>;

/// Split a grouping into its key and element sequence.
pub type GroupingAdapter = Arc<
    dyn for<'a> Fn(&'a dyn Reflect) -> (FieldValue<'a>, Vec<FieldValue<'a>>) + Send + Sync,
>;

/// Test whether a value equals its type's zero value.
pub type DefaultPredicate = Arc<dyn Fn(&dyn Reflect) -> bool + Send + Sync>;

/// Extract the numeric discriminant of an enum value.
pub type EnumDiscriminant = Arc<dyn Fn(&dyn Reflect) -> u64 + Send + Sync>;

/// One property in a type schema.
#[derive(Clone)]
pub struct PropertySchema {
    /// Property name as it should appear in emitted code.
    pub name: String,
    /// Fully-qualified path of the declared property type.
    pub declared_type: String,
    /// Whether the property is writable.
    pub writable: bool,
    /// Member visibility.
    pub visibility: Visibility,
    /// Whether the member is static.
    pub is_static: bool,
    /// Deferred value read.
    pub get: Accessor,
}

/// One field in a type schema.
#[derive(Clone)]
pub struct FieldSchema {
    /// Field name as it should appear in emitted code.
    pub name: String,
    /// Fully-qualified path of the declared field type.
    pub declared_type: String,
    /// Member visibility.
    pub visibility: Visibility,
    /// Whether the member is static.
    pub is_static: bool,
    /// Deferred value read.
    pub get: Accessor,
}

/// Variant table for an enum type.
#[derive(Clone)]
pub struct EnumSchema {
    /// Named variants with their discriminants, in declaration order.
    pub variants: Vec<(String, u64)>,
    /// Flags-style enum; unnamed values render as a bitwise-OR chain.
    pub flags: bool,
    /// Extract the discriminant from a value.
    pub discriminant: EnumDiscriminant,
}

/// Sequence adapter plus element type.
#[derive(Clone)]
pub struct SequenceSchema {
    /// Element type descriptor.
    pub element: TypeDescriptor,
    /// Element enumeration.
    pub items: SequenceAdapter,
}

/// Map adapter plus key/value types.
#[derive(Clone)]
pub struct MapSchema {
    /// Key type descriptor.
    pub key: TypeDescriptor,
    /// Value type descriptor.
    pub value: TypeDescriptor,
    /// Pair enumeration.
    pub pairs: MapAdapter,
}

/// Tuple adapter (2..=N elements).
#[derive(Clone)]
pub struct TupleSchema {
    /// Element enumeration, in positional order.
    pub items: SequenceAdapter,
}

/// Grouping adapter (key + element sequence).
#[derive(Clone)]
pub struct GroupingSchema {
    /// Split into key and elements.
    pub parts: GroupingAdapter,
}

/// Everything registered about one concrete type.
#[derive(Clone)]
pub struct TypeSchema {
    /// Type descriptor used for rendering.
    pub descriptor: TypeDescriptor,
    /// Properties, in declaration order.
    pub properties: Vec<PropertySchema>,
    /// Fields, in declaration order.
    pub fields: Vec<FieldSchema>,
    /// Property names covered by a single constructor, in parameter order.
    /// Non-empty marks the type record-like.
    pub ctor_params: Vec<String>,
    /// Value-type semantics (never ancestor-tracked, eligible for
    /// default-value suppression and depth markers).
    pub value_type: bool,
    /// Compiler-synthesized anonymous shape.
    pub anonymous: bool,
    /// Zero-value test for `ignore_default_values`.
    pub is_default: Option<DefaultPredicate>,
    /// Enum variant table.
    pub enumeration: Option<EnumSchema>,
    /// Sequence adapter.
    pub sequence: Option<SequenceSchema>,
    /// Keyed-collection adapter.
    pub map: Option<MapSchema>,
    /// Nullable-wrapper adapter.
    pub nullable: Option<NullableAdapter>,
    /// Tuple adapter.
    pub tuple: Option<TupleSchema>,
    /// Grouping adapter.
    pub grouping: Option<GroupingSchema>,
}

impl TypeSchema {
    /// An empty schema with just a descriptor.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            properties: Vec::new(),
            fields: Vec::new(),
            ctor_params: Vec::new(),
            value_type: false,
            anonymous: false,
            is_default: None,
            enumeration: None,
            sequence: None,
            map: None,
            nullable: None,
            tuple: None,
            grouping: None,
        }
    }
}

/// Runtime introspection capability injected into the dumper.
///
/// Pure lookups; no side effects. Implementations must be consistent for the
/// duration of a dump.
pub trait TypeInspector: Send + Sync {
    /// Look up the schema registered for a concrete type, if any.
    fn schema_of(&self, type_id: TypeId) -> Option<&TypeSchema>;

    /// Look up the schema for a value's runtime type.
    fn schema(&self, value: &dyn Reflect) -> Option<&TypeSchema> {
        self.schema_of(value.reflect_type_id())
    }

    /// Describe a value's runtime type, falling back to parsing the
    /// compiler-reported path when no schema is registered.
    fn describe_type(&self, value: &dyn Reflect) -> TypeDescriptor {
        match self.schema(value) {
            Some(s) => s.descriptor.clone(),
            None => TypeDescriptor::parse(value.type_path()),
        }
    }

    /// Whether the value's type has value-type semantics.
    fn is_value_type(&self, value: &dyn Reflect) -> bool {
        self.schema(value).is_some_and(|s| s.value_type)
    }

    /// Whether the value equals its type's zero value.
    fn is_default(&self, value: &dyn Reflect) -> bool {
        self.schema(value)
            .and_then(|s| s.is_default.as_ref())
            .is_some_and(|pred| pred(value))
    }
}

/// Schema-table implementation of [`TypeInspector`].
pub struct SchemaInspector {
    schemas: IndexMap<TypeId, TypeSchema>,
}

impl SchemaInspector {
    /// Start building an inspector.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            schemas: IndexMap::new(),
        }
    }

    /// An inspector with no registrations.
    pub fn empty() -> Self {
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl TypeInspector for SchemaInspector {
    fn schema_of(&self, type_id: TypeId) -> Option<&TypeSchema> {
        self.schemas.get(&type_id)
    }
}

/// Fluent builder for a [`SchemaInspector`].
pub struct SchemaBuilder {
    schemas: IndexMap<TypeId, TypeSchema>,
}

impl SchemaBuilder {
    /// Register an object shape for `T`.
    pub fn object<T: Any>(
        mut self,
        configure: impl FnOnce(ObjectSchema<T>) -> ObjectSchema<T>,
    ) -> Self {
        let schema = configure(ObjectSchema::new()).finish();
        self.schemas.insert(TypeId::of::<T>(), schema);
        self
    }

    /// Register a raw schema for a concrete type id.
    pub fn schema(mut self, type_id: TypeId, schema: TypeSchema) -> Self {
        self.schemas.insert(type_id, schema);
        self
    }

    /// Register `Vec<E>` as a sequence.
    pub fn vec_of<E: Any>(self) -> Self {
        let element = TypeDescriptor::parse(std::any::type_name::<E>());
        let items: SequenceAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<Vec<E>>()
                .map(|v| v.iter().map(|e| FieldValue::Ref(e as &dyn Reflect)).collect())
                .unwrap_or_default()
        });
        self.sequence_schema::<Vec<E>>(element, items)
    }

    /// Register `[E; N]` as a sequence with array type semantics.
    pub fn array_of<E: Any, const N: usize>(mut self) -> Self {
        let element = TypeDescriptor::parse(std::any::type_name::<E>());
        let mut schema = TypeSchema::new(TypeDescriptor::array(element.clone()));
        let items: SequenceAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<[E; N]>()
                .map(|v| v.iter().map(|e| FieldValue::Ref(e as &dyn Reflect)).collect())
                .unwrap_or_default()
        });
        schema.sequence = Some(SequenceSchema { element, items });
        self.schemas.insert(TypeId::of::<[E; N]>(), schema);
        self
    }

    /// Register `BTreeMap<K, V>` as a keyed collection.
    pub fn btree_map_of<K: Any + Ord, V: Any>(mut self) -> Self {
        use std::collections::BTreeMap;
        let key = TypeDescriptor::parse(std::any::type_name::<K>());
        let value_ty = TypeDescriptor::parse(std::any::type_name::<V>());
        let mut schema =
            TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<BTreeMap<K, V>>()));
        let pairs: MapAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<BTreeMap<K, V>>()
                .map(|m| {
                    m.iter()
                        .map(|(k, v)| {
                            (
                                FieldValue::Ref(k as &dyn Reflect),
                                FieldValue::Ref(v as &dyn Reflect),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default()
        });
        schema.map = Some(MapSchema {
            key,
            value: value_ty,
            pairs,
        });
        self.schemas.insert(TypeId::of::<BTreeMap<K, V>>(), schema);
        self
    }

    /// Register `HashMap<K, V>` as a keyed collection.
    ///
    /// Iteration order is whatever the map yields; prefer `BTreeMap` when
    /// deterministic output matters.
    pub fn hash_map_of<K: Any + Eq + std::hash::Hash, V: Any>(mut self) -> Self {
        use std::collections::HashMap;
        let key = TypeDescriptor::parse(std::any::type_name::<K>());
        let value_ty = TypeDescriptor::parse(std::any::type_name::<V>());
        let mut schema =
            TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<HashMap<K, V>>()));
        let pairs: MapAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<HashMap<K, V>>()
                .map(|m| {
                    m.iter()
                        .map(|(k, v)| {
                            (
                                FieldValue::Ref(k as &dyn Reflect),
                                FieldValue::Ref(v as &dyn Reflect),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default()
        });
        schema.map = Some(MapSchema {
            key,
            value: value_ty,
            pairs,
        });
        self.schemas.insert(TypeId::of::<HashMap<K, V>>(), schema);
        self
    }

    /// Register `Option<E>` as a nullable wrapper.
    pub fn option_of<E: Any>(mut self) -> Self {
        let mut schema =
            TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<Option<E>>()));
        let unwrap: NullableAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<Option<E>>()
                .and_then(|opt| opt.as_ref())
                .map(|inner| FieldValue::Ref(inner as &dyn Reflect))
        });
        schema.nullable = Some(unwrap);
        self.schemas.insert(TypeId::of::<Option<E>>(), schema);
        self
    }

    /// Register the 2-tuple `(A, B)` (also covers key-value pairs).
    pub fn tuple2_of<A: Any, B: Any>(mut self) -> Self {
        let mut schema =
            TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<(A, B)>()));
        let items: SequenceAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<(A, B)>()
                .map(|t| {
                    vec![
                        FieldValue::Ref(&t.0 as &dyn Reflect),
                        FieldValue::Ref(&t.1 as &dyn Reflect),
                    ]
                })
                .unwrap_or_default()
        });
        schema.tuple = Some(TupleSchema { items });
        self.schemas.insert(TypeId::of::<(A, B)>(), schema);
        self
    }

    /// Register the 3-tuple `(A, B, C)`.
    pub fn tuple3_of<A: Any, B: Any, C: Any>(mut self) -> Self {
        let mut schema =
            TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<(A, B, C)>()));
        let items: SequenceAdapter = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<(A, B, C)>()
                .map(|t| {
                    vec![
                        FieldValue::Ref(&t.0 as &dyn Reflect),
                        FieldValue::Ref(&t.1 as &dyn Reflect),
                        FieldValue::Ref(&t.2 as &dyn Reflect),
                    ]
                })
                .unwrap_or_default()
        });
        schema.tuple = Some(TupleSchema { items });
        self.schemas.insert(TypeId::of::<(A, B, C)>(), schema);
        self
    }

    /// Register a custom sequence adapter for `T`.
    pub fn sequence<T: Any>(
        self,
        element: TypeDescriptor,
        items: impl for<'a> Fn(&'a T) -> Vec<FieldValue<'a>> + Send + Sync + 'static,
    ) -> Self {
        let adapter: SequenceAdapter = Arc::new(move |value: &dyn Reflect| {
            value.downcast_ref::<T>().map(&items).unwrap_or_default()
        });
        self.sequence_schema::<T>(element, adapter)
    }

    /// Register an enum variant table for `T`.
    pub fn enumeration<T: Any>(
        mut self,
        variants: &[(&str, u64)],
        flags: bool,
        discriminant: impl Fn(&T) -> u64 + Send + Sync + 'static,
    ) -> Self {
        let mut schema = TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<T>()));
        schema.value_type = true;
        let disc: EnumDiscriminant = Arc::new(move |value: &dyn Reflect| {
            value.downcast_ref::<T>().map(&discriminant).unwrap_or(0)
        });
        schema.enumeration = Some(EnumSchema {
            variants: variants
                .iter()
                .map(|(n, v)| (n.to_string(), *v))
                .collect(),
            flags,
            discriminant: disc,
        });
        self.schemas.insert(TypeId::of::<T>(), schema);
        self
    }

    /// Register a grouping (key + element sequence) adapter for `T`.
    pub fn grouping<T: Any>(
        mut self,
        parts: impl for<'a> Fn(&'a T) -> (FieldValue<'a>, Vec<FieldValue<'a>>)
        + Send
        + Sync
        + 'static,
    ) -> Self {
        let mut schema = TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<T>()));
        let adapter: GroupingAdapter = Arc::new(move |value: &dyn Reflect| {
            match value.downcast_ref::<T>() {
                Some(t) => parts(t),
                None => (FieldValue::Null, Vec::new()),
            }
        });
        schema.grouping = Some(GroupingSchema { parts: adapter });
        self.schemas.insert(TypeId::of::<T>(), schema);
        self
    }

    /// Finish building.
    pub fn build(self) -> SchemaInspector {
        SchemaInspector {
            schemas: self.schemas,
        }
    }

    fn sequence_schema<T: Any>(
        mut self,
        element: TypeDescriptor,
        items: SequenceAdapter,
    ) -> Self {
        let mut schema = TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<T>()));
        schema.sequence = Some(SequenceSchema { element, items });
        self.schemas.insert(TypeId::of::<T>(), schema);
        self
    }
}

/// Fluent schema builder for one object type.
pub struct ObjectSchema<T> {
    schema: TypeSchema,
    _marker: std::marker::PhantomData<fn(&T)>,
}

impl<T: Any> ObjectSchema<T> {
    fn new() -> Self {
        Self {
            schema: TypeSchema::new(TypeDescriptor::parse(std::any::type_name::<T>())),
            _marker: std::marker::PhantomData,
        }
    }

    /// A public, writable instance property.
    pub fn property<R: Any>(
        self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        self.add_property(name, std::any::type_name::<R>(), true, Visibility::Public, get)
    }

    /// A public, read-only instance property.
    pub fn readonly_property<R: Any>(
        self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        self.add_property(name, std::any::type_name::<R>(), false, Visibility::Public, get)
    }

    /// A non-public instance property.
    pub fn non_public_property<R: Any>(
        self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        self.add_property(
            name,
            std::any::type_name::<R>(),
            true,
            Visibility::NonPublic,
            get,
        )
    }

    /// A property whose read may yield an absent value.
    pub fn nullable_property<R: Any>(
        mut self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> Option<&'a R> + Send + Sync + 'static,
    ) -> Self {
        let accessor: Accessor = Arc::new(move |value: &dyn Reflect| {
            let t = value
                .downcast_ref::<T>()
                .ok_or(AccessError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(match get(t) {
                Some(inner) => FieldValue::Ref(inner as &dyn Reflect),
                None => FieldValue::Null,
            })
        });
        self.schema.properties.push(PropertySchema {
            name: name.to_string(),
            declared_type: std::any::type_name::<R>().to_string(),
            writable: true,
            visibility: Visibility::Public,
            is_static: false,
            get: accessor,
        });
        self
    }

    /// A property computed at read time (owned result).
    pub fn computed_property<R: Any>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> R + Send + Sync + 'static,
    ) -> Self {
        let accessor: Accessor = Arc::new(move |value: &dyn Reflect| {
            let t = value
                .downcast_ref::<T>()
                .ok_or(AccessError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(FieldValue::owned(get(t)))
        });
        self.schema.properties.push(PropertySchema {
            name: name.to_string(),
            declared_type: std::any::type_name::<R>().to_string(),
            writable: true,
            visibility: Visibility::Public,
            is_static: false,
            get: accessor,
        });
        self
    }

    /// A property with a raw accessor and full control over its traits.
    pub fn property_raw(
        mut self,
        name: &str,
        declared_type: &str,
        writable: bool,
        visibility: Visibility,
        get: Accessor,
    ) -> Self {
        self.schema.properties.push(PropertySchema {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            writable,
            visibility,
            is_static: false,
            get,
        });
        self
    }

    /// A public instance field.
    pub fn field<R: Any>(
        self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        self.add_field(name, std::any::type_name::<R>(), Visibility::Public, get)
    }

    /// A non-public instance field.
    pub fn non_public_field<R: Any>(
        self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        self.add_field(name, std::any::type_name::<R>(), Visibility::NonPublic, get)
    }

    /// A field whose read may yield an absent value.
    pub fn nullable_field<R: Any>(
        mut self,
        name: &str,
        get: impl for<'a> Fn(&'a T) -> Option<&'a R> + Send + Sync + 'static,
    ) -> Self {
        let accessor: Accessor = Arc::new(move |value: &dyn Reflect| {
            let t = value
                .downcast_ref::<T>()
                .ok_or(AccessError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(match get(t) {
                Some(inner) => FieldValue::Ref(inner as &dyn Reflect),
                None => FieldValue::Null,
            })
        });
        self.schema.fields.push(FieldSchema {
            name: name.to_string(),
            declared_type: std::any::type_name::<R>().to_string(),
            visibility: Visibility::Public,
            is_static: false,
            get: accessor,
        });
        self
    }

    /// Name the properties covered by the type's constructor, in parameter
    /// order. Marks the type record-like.
    pub fn ctor(mut self, params: &[&str]) -> Self {
        self.schema.ctor_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Give the type value-type semantics.
    pub fn value_type(mut self) -> Self {
        self.schema.value_type = true;
        self
    }

    /// Use `T::default()` equality as the zero-value test.
    pub fn default_eq(mut self) -> Self
    where
        T: Default + PartialEq,
    {
        let pred: DefaultPredicate = Arc::new(|value: &dyn Reflect| {
            value
                .downcast_ref::<T>()
                .is_some_and(|t| *t == T::default())
        });
        self.schema.is_default = Some(pred);
        self
    }

    /// Mark the type as an anonymous (structurally-typed) shape.
    pub fn anonymous(mut self) -> Self {
        self.schema.anonymous = true;
        self.schema.descriptor = TypeDescriptor::anonymous();
        self
    }

    fn add_property<R: Any>(
        mut self,
        name: &str,
        declared_type: &str,
        writable: bool,
        visibility: Visibility,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        let accessor = typed_accessor::<T, R>(get);
        self.schema.properties.push(PropertySchema {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            writable,
            visibility,
            is_static: false,
            get: accessor,
        });
        self
    }

    fn add_field<R: Any>(
        mut self,
        name: &str,
        declared_type: &str,
        visibility: Visibility,
        get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    ) -> Self {
        let accessor = typed_accessor::<T, R>(get);
        self.schema.fields.push(FieldSchema {
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            visibility,
            is_static: false,
            get: accessor,
        });
        self
    }

    fn finish(self) -> TypeSchema {
        self.schema
    }
}

fn typed_accessor<T: Any, R: Any>(
    get: impl for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
) -> Accessor {
    Arc::new(move |value: &dyn Reflect| {
        let t = value
            .downcast_ref::<T>()
            .ok_or(AccessError::TypeMismatch {
                expected: std::any::type_name::<T>(),
            })?;
        Ok(FieldValue::Ref(get(t) as &dyn Reflect))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        name: String,
        age: i32,
    }

    #[test]
    fn test_object_schema_lookup() {
        let inspector = SchemaInspector::builder()
            .object::<Person>(|s| {
                s.property("Name", |p: &Person| &p.name)
                    .property("Age", |p: &Person| &p.age)
            })
            .build();

        let person = Person {
            name: "Steeve".into(),
            age: 42,
        };
        let value: &dyn Reflect = &person;
        let schema = inspector.schema(value).expect("schema registered");
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.properties[0].name, "Name");

        let read = (schema.properties[1].get)(value).unwrap();
        assert_eq!(
            read.as_reflect().unwrap().downcast_ref::<i32>(),
            Some(&42)
        );
    }

    #[test]
    fn test_accessor_type_mismatch() {
        let inspector = SchemaInspector::builder()
            .object::<Person>(|s| s.property("Name", |p: &Person| &p.name))
            .build();
        let wrong = 5i32;
        let schema = inspector
            .schema_of(TypeId::of::<Person>())
            .expect("schema registered");
        let err = (schema.properties[0].get)(&wrong as &dyn Reflect).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn test_vec_adapter() {
        let inspector = SchemaInspector::builder().vec_of::<i32>().build();
        let values = vec![1, 2, 3];
        let schema = inspector.schema(&values as &dyn Reflect).unwrap();
        let seq = schema.sequence.as_ref().unwrap();
        let items = (seq.items)(&values as &dyn Reflect);
        assert_eq!(items.len(), 3);
        assert_eq!(seq.element.path(), "i32");
    }

    #[test]
    fn test_option_adapter() {
        let inspector = SchemaInspector::builder().option_of::<String>().build();
        let present: Option<String> = Some("x".into());
        let absent: Option<String> = None;
        let schema = inspector.schema(&present as &dyn Reflect).unwrap();
        let unwrap = schema.nullable.as_ref().unwrap();
        assert!(unwrap(&present as &dyn Reflect).is_some());
        assert!(unwrap(&absent as &dyn Reflect).is_none());
    }

    #[test]
    fn test_binding_policy() {
        let policy = BindingPolicy::public_instance();
        assert!(policy.admits(Visibility::Public, false));
        assert!(!policy.admits(Visibility::NonPublic, false));
        assert!(!policy.admits(Visibility::Public, true));
        assert!(BindingPolicy::all().admits(Visibility::NonPublic, true));
    }

    #[test]
    fn test_default_eq() {
        #[derive(Default, PartialEq)]
        struct Counter(u32);

        let inspector = SchemaInspector::builder()
            .object::<Counter>(|s| s.value_type().default_eq())
            .build();
        let zero = Counter(0);
        let one = Counter(1);
        assert!(inspector.is_default(&zero as &dyn Reflect));
        assert!(!inspector.is_default(&one as &dyn Reflect));
        assert!(inspector.is_value_type(&zero as &dyn Reflect));
    }
}
