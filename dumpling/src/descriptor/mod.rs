//! Object and type description: the extracted shape of a value,
//! independent of rendering syntax.

mod member;
mod pipeline;
mod type_descriptor;

pub use member::{MemberDescriptor, MemberKind, ValueAccessor};
pub use pipeline::{DescriptorMiddleware, ObjectDescription, base_description, describe_object};
pub use type_descriptor::TypeDescriptor;
