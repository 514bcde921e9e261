//! C# writer for the `dumpling` object-graph dumper.
//!
//! Renders dumped graphs as C# expressions: `new T { … }` object
//! initializers, collection initializers with `["key"] = value` dictionary
//! entries, `Guid.Parse("…")` for parseable identifier types, and
//! `new DateTime(…, DateTimeKind.Utc)` for date/time values.

mod dumper;
mod type_mapper;
mod writer;

pub use dumper::CSharpDumper;
pub use type_mapper::render_type;
pub use writer::CSharpWriter;
