//! The dump engine: graph walk, guards, markers, and visitor dispatch.
//!
//! One [`Engine`] holds the frozen configuration for a dump session: an
//! options snapshot, the spliced visitor registry, and the inspector. The
//! per-dump mutable state lives in a [`VisitContext`] created fresh for
//! every entry call, so a single engine can serve any number of dumps.

use std::cell::RefCell;
use std::sync::Arc;

use crate::context::{AncestorGuard, DepthGuard, VisitContext};
use crate::descriptor::{TypeDescriptor, describe_object};
use crate::error::RegistryError;
use crate::inspector::TypeInspector;
use crate::naming::to_snake_case;
use crate::options::DumpOptions;
use crate::reflect::Reflect;
use crate::registry::VisitorRegistry;
use crate::visit::VisitScope;
use crate::writer::{CodeWriter, Literal, emit};

/// Language-independent dump engine.
pub struct Engine {
    options: DumpOptions,
    registry: VisitorRegistry,
    inspector: Arc<dyn TypeInspector>,
}

impl Engine {
    /// Build an engine from an options snapshot and an inspector.
    ///
    /// Applies the registry tweaks recorded on the options; a splice against
    /// an unknown anchor or a duplicate id fails here, before any dump runs.
    pub fn new(
        options: DumpOptions,
        inspector: Arc<dyn TypeInspector>,
    ) -> Result<Self, RegistryError> {
        let mut registry = VisitorRegistry::built_in();
        registry.apply(&options.registry_tweaks)?;
        Ok(Self {
            options,
            registry,
            inspector,
        })
    }

    /// The frozen options snapshot.
    pub fn options(&self) -> &DumpOptions {
        &self.options
    }

    /// The injected inspector.
    pub fn inspector(&self) -> &dyn TypeInspector {
        self.inspector.as_ref()
    }

    /// The spliced visitor registry.
    pub fn registry(&self) -> &VisitorRegistry {
        &self.registry
    }

    /// Emit a complete dump of `value` through `writer`.
    pub fn dump_value(&self, value: &dyn Reflect, writer: &mut dyn CodeWriter) {
        tracing::debug!(type_path = value.type_path(), "dump start");
        let ctx = RefCell::new(VisitContext::new(self.options.max_depth));
        if self.options.generate_variable_declaration {
            let ty = self.inspector.describe_type(value);
            let name = variable_name(&ty);
            let initializer = emit(|w| self.visit(Some(value), &ctx, w));
            writer.variable_declaration(Some(&ty), &name, initializer);
        } else {
            self.visit(Some(value), &ctx, writer);
        }
    }

    /// Dispatch one node.
    ///
    /// Order matters: nullable unwrap (free of depth cost), depth guard,
    /// cycle check, ancestor push, then first-match visitor selection with
    /// the generic member path as the fallback.
    pub(crate) fn visit(
        &self,
        value: Option<&dyn Reflect>,
        ctx: &RefCell<VisitContext>,
        writer: &mut dyn CodeWriter,
    ) {
        let format = self.options.integer_format;
        let Some(value) = value else {
            writer.literal(&Literal::Null, &format);
            return;
        };

        if let Some(unwrap) = self.inspector.schema(value).and_then(|s| s.nullable.clone()) {
            match unwrap(value) {
                Some(inner) => self.visit(inner.as_reflect(), ctx, writer),
                None => writer.literal(&Literal::Null, &format),
            }
            return;
        }

        let _depth = DepthGuard::enter(ctx);
        if ctx.borrow().is_max_depth() {
            tracing::trace!(type_path = value.type_path(), "max depth reached");
            if self.inspector.is_value_type(value) {
                let ty = self.inspector.describe_type(value);
                writer.default_value(&ty);
            } else {
                writer.literal(&Literal::Null, &format);
            }
            writer.comment("max depth reached", true);
            return;
        }

        // Value types and strings cannot participate in a reference cycle.
        let tracked = !self.inspector.is_value_type(value)
            && !value.is::<String>()
            && !value.is::<&str>();
        if tracked && ctx.borrow().is_visited(value.identity()) {
            writer.literal(&Literal::Null, &format);
            writer.comment("circular reference detected", true);
            return;
        }
        let _ancestor = tracked.then(|| AncestorGuard::push(ctx, value.identity()));

        let schema = self.inspector.schema(value);
        for (id, visitor) in self.registry.iter() {
            if visitor.is_suitable_for(value, schema) {
                tracing::trace!(visitor = id, type_path = value.type_path(), "visitor selected");
                let mut scope = VisitScope {
                    engine: self,
                    ctx,
                    value,
                    schema,
                    writer,
                };
                visitor.visit(&mut scope);
                return;
            }
        }
        self.visit_object(value, ctx, writer);
    }

    /// The generic member-by-member fallback.
    fn visit_object(
        &self,
        value: &dyn Reflect,
        ctx: &RefCell<VisitContext>,
        writer: &mut dyn CodeWriter,
    ) {
        let description = describe_object(value, self.inspector.as_ref(), &self.options);
        let ty = description.type_descriptor.clone();
        let mut scope = VisitScope {
            engine: self,
            ctx,
            value,
            schema: self.inspector.schema(value),
            writer,
        };
        let initializers = scope.member_initializers(description.members);
        let single_line = initializers.len() <= 1;
        scope
            .writer
            .object_create(Some(&ty), Vec::new(), initializers, single_line);
    }
}

/// Derive a canonical (snake_case) variable name from the root type.
fn variable_name(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Array { .. } => "array".to_string(),
        TypeDescriptor::Named { .. } => {
            let short = ty.short_name();
            if short.is_empty() {
                "value".to_string()
            } else {
                to_snake_case(short)
            }
        }
    }
}
