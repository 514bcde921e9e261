//! The C# dump entry point.

use std::fmt::Write;
use std::sync::Arc;

use dumpling::{DumpError, DumpOptions, Engine, Reflect, RegistryError, TypeInspector};

use crate::writer::CSharpWriter;

/// Dumps object graphs as C# expressions.
///
/// ```
/// use std::sync::Arc;
/// use dumpling::{DumpOptions, SchemaInspector};
/// use dumpling_csharp::CSharpDumper;
///
/// struct Person {
///     name: String,
/// }
///
/// let inspector = SchemaInspector::builder()
///     .object::<Person>(|s| s.property("Name", |p: &Person| &p.name))
///     .build();
/// let dumper = CSharpDumper::new(DumpOptions::default(), Arc::new(inspector)).unwrap();
///
/// let person = Person { name: "Ada".into() };
/// assert_eq!(dumper.dump(&person), "new Person { Name = \"Ada\" }");
/// ```
pub struct CSharpDumper {
    engine: Engine,
}

impl CSharpDumper {
    /// Build a dumper from an options snapshot and an inspector.
    pub fn new(
        options: DumpOptions,
        inspector: Arc<dyn TypeInspector>,
    ) -> Result<Self, RegistryError> {
        let engine = Engine::new(options, inspector)?;
        Ok(Self { engine })
    }

    /// Dump a value to a string of C# source.
    pub fn dump(&self, value: &dyn Reflect) -> String {
        let mut writer = CSharpWriter::new();
        self.engine.dump_value(value, &mut writer);
        let output = writer.finish();
        tracing::debug!(bytes = output.len(), "csharp dump complete");
        output
    }

    /// Dump a value into a caller-provided sink.
    pub fn dump_to(&self, value: &dyn Reflect, sink: &mut dyn Write) -> Result<(), DumpError> {
        sink.write_str(&self.dump(value))?;
        Ok(())
    }
}
