//! The Rust dump entry point.

use std::fmt::Write;
use std::sync::Arc;

use dumpling::{DumpError, DumpOptions, Engine, Reflect, RegistryError, TypeInspector};

use crate::writer::RustWriter;

/// Dumps object graphs as Rust expressions.
///
/// ```
/// use std::sync::Arc;
/// use dumpling::{DumpOptions, SchemaInspector};
/// use dumpling_rust::RustDumper;
///
/// struct Person {
///     name: String,
/// }
///
/// let inspector = SchemaInspector::builder()
///     .object::<Person>(|s| s.property("Name", |p: &Person| &p.name))
///     .build();
/// let dumper = RustDumper::new(DumpOptions::default(), Arc::new(inspector)).unwrap();
///
/// let person = Person { name: "Ada".into() };
/// assert_eq!(dumper.dump(&person), "Person { name: \"Ada\" }");
/// ```
pub struct RustDumper {
    engine: Engine,
    full_type_names: bool,
}

impl RustDumper {
    /// Build a dumper from an options snapshot and an inspector.
    pub fn new(
        options: DumpOptions,
        inspector: Arc<dyn TypeInspector>,
    ) -> Result<Self, RegistryError> {
        let full_type_names = options.use_full_type_names;
        let engine = Engine::new(options, inspector)?;
        Ok(Self {
            engine,
            full_type_names,
        })
    }

    /// Dump a value to a string of Rust source.
    pub fn dump(&self, value: &dyn Reflect) -> String {
        let mut writer = RustWriter::new();
        if self.full_type_names {
            writer = writer.with_full_type_names();
        }
        self.engine.dump_value(value, &mut writer);
        let output = writer.finish();
        tracing::debug!(bytes = output.len(), "rust dump complete");
        output
    }

    /// Dump a value into a caller-provided sink.
    pub fn dump_to(&self, value: &dyn Reflect, sink: &mut dyn Write) -> Result<(), DumpError> {
        sink.write_str(&self.dump(value))?;
        Ok(())
    }
}
