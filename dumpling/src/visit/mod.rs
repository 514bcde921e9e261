//! Known-type visitors: the dispatch seam between traversal and emission.
//!
//! Each visitor owns the rendering of one family of types. The engine walks
//! the registry in order and hands the node to the first visitor whose
//! [`is_suitable_for`](KnownTypeVisitor::is_suitable_for) accepts it; nodes
//! no visitor claims fall through to the generic member-by-member path.

mod anonymous;
mod collections;
mod datetime;
mod enums;
mod idents;
mod primitives;
mod records;
mod tuples;

use std::cell::RefCell;
use std::sync::Arc;

use crate::descriptor::{MemberDescriptor, ObjectDescription, describe_object};
use crate::engine::Engine;
use crate::error::AccessError;
use crate::inspector::TypeSchema;
use crate::options::{DumpOptions, IntegerFormat, MemberSort};
use crate::reflect::{FieldValue, Reflect};
use crate::context::VisitContext;
use crate::writer::{CodeWriter, Emit, Literal, emit};

pub use anonymous::AnonymousVisitor;
pub use collections::{CollectionVisitor, DictionaryVisitor};
pub use datetime::DateTimeVisitor;
pub use enums::EnumVisitor;
pub use idents::KnownIdentsVisitor;
pub use primitives::PrimitivesVisitor;
pub use records::RecordVisitor;
pub use tuples::TupleVisitor;

/// A pluggable renderer for one family of types.
///
/// Interrogated in registry order; the first visitor whose
/// `is_suitable_for` returns `true` wins the node.
pub trait KnownTypeVisitor: Send + Sync {
    /// Whether this visitor claims the value.
    fn is_suitable_for(&self, value: &dyn Reflect, schema: Option<&TypeSchema>) -> bool;

    /// Emit the value through the scope's writer.
    fn visit(&self, scope: &mut VisitScope<'_, '_>);
}

/// Everything a visitor needs to render one node.
pub struct VisitScope<'a, 'w> {
    pub(crate) engine: &'a Engine,
    pub(crate) ctx: &'a RefCell<VisitContext>,
    /// The node being rendered.
    pub value: &'a dyn Reflect,
    /// The node's registered schema, if any.
    pub schema: Option<&'a TypeSchema>,
    /// The output writer.
    pub writer: &'w mut dyn CodeWriter,
}

impl<'a> VisitScope<'a, '_> {
    /// The active dump configuration.
    pub fn options(&self) -> &'a DumpOptions {
        self.engine.options()
    }

    /// The node's type, as the inspector reports it.
    pub fn type_descriptor(&self) -> crate::descriptor::TypeDescriptor {
        self.engine.inspector().describe_type(self.value)
    }

    /// Defer emission of a child value; the returned action recurses
    /// through the full dispatch when the writer invokes it.
    pub fn defer(&self, value: FieldValue<'a>) -> Emit<'a> {
        let engine = self.engine;
        let ctx = self.ctx;
        Box::new(move |writer| engine.visit(value.as_reflect(), ctx, writer))
    }

    /// Run the node through the descriptor pipeline.
    pub fn describe(&self) -> ObjectDescription<'a> {
        describe_object(self.value, self.engine.inspector(), self.engine.options())
    }

    /// Read, filter, and order members into named initializers.
    ///
    /// Applies the configured member sort, drops excluded-type members, and
    /// honors the null/default suppression flags. A failed read becomes a
    /// diagnostic marker instead of aborting the dump.
    pub fn member_initializers(
        &self,
        mut members: Vec<MemberDescriptor<'a>>,
    ) -> Vec<(String, Emit<'a>)> {
        let engine = self.engine;
        let options = engine.options();
        match options.sort_members_by {
            MemberSort::Declaration => {}
            MemberSort::Ascending => members.sort_by(|a, b| a.name().cmp(b.name())),
            MemberSort::Descending => members.sort_by(|a, b| b.name().cmp(a.name())),
        }

        let mut initializers = Vec::with_capacity(members.len());
        for member in members {
            if options.excluded_type_names.contains(member.declared_type()) {
                continue;
            }
            match member.read() {
                Ok(value) => {
                    if options.ignore_null_values && value.is_null() {
                        continue;
                    }
                    if options.ignore_default_values
                        && value
                            .as_reflect()
                            .is_some_and(|v| engine.inspector().is_default(v))
                    {
                        continue;
                    }
                    initializers.push((member.name().to_string(), self.defer(value)));
                }
                Err(error) => {
                    tracing::warn!(member = member.name(), %error, "member read failed");
                    initializers.push((member.name().to_string(), error_marker(error)));
                }
            }
        }
        initializers
    }
}

/// Diagnostic emission for a member whose accessor failed.
pub(crate) fn error_marker<'a>(error: AccessError) -> Emit<'a> {
    emit(move |writer| {
        writer.literal(&Literal::Null, &IntegerFormat::default());
        writer.comment(&format!("error reading value: {error}"), true);
    })
}

/// Diagnostic emission appended to a truncated collection.
pub(crate) fn truncation_marker<'a>(total: usize, max: usize) -> Emit<'a> {
    emit(move |writer| {
        writer.comment(
            &format!("{} more items, raise max_collection_size above {max}", total - max),
            true,
        );
    })
}

/// The built-in visitors, in default dispatch order.
pub(crate) fn built_ins() -> Vec<(&'static str, Arc<dyn KnownTypeVisitor>)> {
    vec![
        ("primitives", Arc::new(PrimitivesVisitor) as Arc<dyn KnownTypeVisitor>),
        ("date-time", Arc::new(DateTimeVisitor)),
        ("enum", Arc::new(EnumVisitor)),
        ("known-idents", Arc::new(KnownIdentsVisitor)),
        ("tuple", Arc::new(TupleVisitor)),
        ("record", Arc::new(RecordVisitor)),
        ("anonymous", Arc::new(AnonymousVisitor)),
        ("dictionary", Arc::new(DictionaryVisitor)),
        ("collection", Arc::new(CollectionVisitor)),
    ]
}
