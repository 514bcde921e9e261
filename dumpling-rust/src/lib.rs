//! Rust writer for the `dumpling` object-graph dumper.
//!
//! Renders dumped graphs as Rust expressions: struct literals, `vec![…]`
//! and `HashMap::from([…])` builders, `"…".parse::<T>().unwrap()` for
//! parseable identifier types. Anonymous shapes render as value tuples,
//! since Rust has no anonymous struct literal.

mod dumper;
mod type_mapper;
mod writer;

pub use dumper::RustDumper;
pub use type_mapper::render_type;
pub use writer::RustWriter;
