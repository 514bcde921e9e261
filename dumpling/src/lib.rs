//! Language-independent engine for dumping object graphs as source-code
//! literals.
//!
//! This crate walks a runtime value and emits an expression that, pasted
//! into a target language, reconstructs an equivalent value. Rendering is
//! delegated to per-language writer crates (e.g. `dumpling-rust`,
//! `dumpling-csharp`) through the [`CodeWriter`] protocol.
//!
//! # Module Organization
//!
//! - [`reflect`] - Dynamic value model (`Reflect`, `FieldValue`, identity)
//! - [`inspector`] - Caller-supplied type registration table
//! - [`descriptor`] - Type/member descriptors and the middleware pipeline
//! - [`visit`] - Known-type visitors and the dispatch scope
//! - [`registry`] - Ordered, spliceable visitor registry
//! - [`engine`] - The dispatcher: guards, markers, visitor selection
//! - [`writer`] - The abstract code-writer protocol and shared buffer
//! - [`options`] - Dump configuration snapshots
//! - [`naming`] - Identifier-case helpers shared by writers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use dumpling::{DumpOptions, Engine, SchemaInspector};
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
//!
//! let engine = Engine::new(DumpOptions::default(), Arc::new(inspector)).unwrap();
//! # let _ = engine;
//! ```

mod context;
mod error;

pub mod descriptor;
pub mod engine;
pub mod registry;
pub mod inspector;
pub mod naming;
pub mod options;
pub mod reflect;
pub mod visit;
pub mod writer;

pub use context::VisitContext;
pub use descriptor::{
    DescriptorMiddleware, MemberDescriptor, MemberKind, ObjectDescription, TypeDescriptor,
};
pub use engine::Engine;
pub use error::{AccessError, DumpError, RegistryError};
pub use inspector::{BindingPolicy, SchemaBuilder, SchemaInspector, TypeInspector, TypeSchema};
pub use options::{
    DateKind, DateTimeInstantiation, DumpOptions, IntegerFormat, IntegerRadix, MemberSort,
};
pub use reflect::{FieldValue, NodeIdentity, Reflect};
pub use registry::{RegistryTweak, VisitorRegistry};
pub use visit::{KnownTypeVisitor, VisitScope};
pub use writer::{Callee, CodeWriter, Emit, Indent, Literal, SourceBuffer, emit};
