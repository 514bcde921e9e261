//! Dump configuration.
//!
//! A [`DumpOptions`] value is a template: dumpers clone it at construction,
//! so mutating a shared template never affects an in-flight dump.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::descriptor::DescriptorMiddleware;
use crate::inspector::BindingPolicy;
use crate::registry::RegistryTweak;
use crate::visit::KnownTypeVisitor;

/// Member ordering applied before emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberSort {
    /// Declaration (reflection) order.
    #[default]
    Declaration,
    /// Lexicographic by member name.
    Ascending,
    /// Reverse lexicographic by member name.
    Descending,
}

/// Radix used when rendering integer literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerRadix {
    /// Base 10.
    #[default]
    Decimal,
    /// Base 16 with a `0x` prefix.
    Hexadecimal,
    /// Base 2 with a `0b` prefix.
    Binary,
}

/// Integer literal formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegerFormat {
    /// Output radix.
    pub radix: IntegerRadix,
    /// Insert `_` digit-group separators.
    pub group_digits: bool,
}

impl IntegerFormat {
    /// Render an unsigned value.
    pub fn format_unsigned(&self, value: u128) -> String {
        let (digits, prefix, group) = match self.radix {
            IntegerRadix::Decimal => (format!("{value}"), "", 3),
            IntegerRadix::Hexadecimal => (format!("{value:X}"), "0x", 4),
            IntegerRadix::Binary => (format!("{value:b}"), "0b", 4),
        };
        let digits = if self.group_digits {
            group_from_right(&digits, group)
        } else {
            digits
        };
        format!("{prefix}{digits}")
    }

    /// Render a signed value.
    pub fn format_signed(&self, value: i128) -> String {
        let magnitude = self.format_unsigned(value.unsigned_abs());
        if value < 0 {
            format!("-{magnitude}")
        } else {
            magnitude
        }
    }
}

fn group_from_right(digits: &str, group: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / group);
    for (i, c) in chars.iter().enumerate() {
        let remaining = chars.len() - i;
        if i > 0 && remaining % group == 0 {
            out.push('_');
        }
        out.push(*c);
    }
    out
}

/// How date/time values are instantiated in emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeInstantiation {
    /// Component-wise constructor call.
    #[default]
    New,
    /// Parse from a canonical string.
    Parse,
}

/// Kind annotation applied to date+time emission only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateKind {
    /// No kind annotation.
    #[default]
    Unspecified,
    /// Coordinated universal time.
    Utc,
    /// Local time.
    Local,
}

/// Immutable-per-dump configuration snapshot.
///
/// Constructed fluently:
///
/// ```
/// use dumpling::DumpOptions;
///
/// let options = DumpOptions::default()
///     .with_max_depth(4)
///     .with_max_collection_size(100)
///     .ignore_null_values();
/// ```
#[derive(Clone)]
pub struct DumpOptions {
    /// Depth beyond which traversal stops with a depth-limit marker.
    pub max_depth: usize,
    /// Items emitted per collection before a too-many-items marker.
    pub max_collection_size: usize,
    /// Suppress members holding an absent value.
    pub ignore_null_values: bool,
    /// Suppress value-typed members equal to their type's zero value.
    pub ignore_default_values: bool,
    /// Member ordering.
    pub sort_members_by: MemberSort,
    /// Fully-qualified type names whose members are never emitted.
    pub excluded_type_names: BTreeSet<String>,
    /// Emit a variable declaration around the root expression.
    pub generate_variable_declaration: bool,
    /// Render fully-qualified type names instead of short names.
    pub use_full_type_names: bool,
    /// Only emit writable properties on the generic path.
    pub writable_properties_only: bool,
    /// Also enumerate fields (off by default).
    pub include_fields: bool,
    /// Selection policy for properties.
    pub property_binding: BindingPolicy,
    /// Selection policy for fields.
    pub field_binding: BindingPolicy,
    /// Integer literal formatting.
    pub integer_format: IntegerFormat,
    /// Date/time instantiation style.
    pub date_time_instantiation: DateTimeInstantiation,
    /// Kind annotation for date+time values.
    pub date_kind: DateKind,
    /// Emit record constructor arguments as named arguments.
    pub use_named_arguments: bool,
    /// Descriptor middleware, in registration order.
    pub middleware: Vec<Arc<dyn DescriptorMiddleware>>,
    /// Visitor registry edits applied at dumper construction.
    pub registry_tweaks: Vec<RegistryTweak>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            max_depth: 25,
            max_collection_size: usize::MAX,
            ignore_null_values: false,
            ignore_default_values: false,
            sort_members_by: MemberSort::Declaration,
            excluded_type_names: BTreeSet::new(),
            generate_variable_declaration: false,
            use_full_type_names: false,
            writable_properties_only: true,
            include_fields: false,
            property_binding: BindingPolicy::public_instance(),
            field_binding: BindingPolicy::public_instance(),
            integer_format: IntegerFormat::default(),
            date_time_instantiation: DateTimeInstantiation::default(),
            date_kind: DateKind::default(),
            use_named_arguments: false,
            middleware: Vec::new(),
            registry_tweaks: Vec::new(),
        }
    }
}

impl DumpOptions {
    /// Set the maximum traversal depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Cap the number of items emitted per collection.
    pub fn with_max_collection_size(mut self, size: usize) -> Self {
        self.max_collection_size = size;
        self
    }

    /// Suppress members holding an absent value.
    pub fn ignore_null_values(mut self) -> Self {
        self.ignore_null_values = true;
        self
    }

    /// Suppress value-typed members equal to their zero value.
    pub fn ignore_default_values(mut self) -> Self {
        self.ignore_default_values = true;
        self
    }

    /// Set the member ordering.
    pub fn sort_members(mut self, sort: MemberSort) -> Self {
        self.sort_members_by = sort;
        self
    }

    /// Never emit members declared with the given type.
    pub fn exclude_type(mut self, type_name: impl Into<String>) -> Self {
        self.excluded_type_names.insert(type_name.into());
        self
    }

    /// Wrap the root expression in a variable declaration.
    pub fn generate_variable_declaration(mut self) -> Self {
        self.generate_variable_declaration = true;
        self
    }

    /// Render fully-qualified type names.
    pub fn use_full_type_names(mut self) -> Self {
        self.use_full_type_names = true;
        self
    }

    /// Include read-only properties on the generic path.
    pub fn include_readonly_properties(mut self) -> Self {
        self.writable_properties_only = false;
        self
    }

    /// Also enumerate fields, under the given policy.
    pub fn include_fields(mut self, policy: BindingPolicy) -> Self {
        self.include_fields = true;
        self.field_binding = policy;
        self
    }

    /// Set the property selection policy.
    pub fn with_property_binding(mut self, policy: BindingPolicy) -> Self {
        self.property_binding = policy;
        self
    }

    /// Set integer literal formatting.
    pub fn with_integer_format(mut self, format: IntegerFormat) -> Self {
        self.integer_format = format;
        self
    }

    /// Set the date/time instantiation style.
    pub fn with_date_time_instantiation(mut self, style: DateTimeInstantiation) -> Self {
        self.date_time_instantiation = style;
        self
    }

    /// Set the kind annotation for date+time values.
    pub fn with_date_kind(mut self, kind: DateKind) -> Self {
        self.date_kind = kind;
        self
    }

    /// Emit record constructor calls with named arguments.
    pub fn use_named_arguments(mut self) -> Self {
        self.use_named_arguments = true;
        self
    }

    /// Append a descriptor middleware stage.
    pub fn with_middleware(mut self, middleware: Arc<dyn DescriptorMiddleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Append a custom known-type visitor after the built-ins.
    pub fn with_visitor(
        mut self,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Self {
        self.registry_tweaks.push(RegistryTweak::Append { id, visitor });
        self
    }

    /// Insert a custom visitor before an existing id.
    pub fn with_visitor_before(
        mut self,
        anchor: &'static str,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Self {
        self.registry_tweaks
            .push(RegistryTweak::InsertBefore { anchor, id, visitor });
        self
    }

    /// Insert a custom visitor after an existing id.
    pub fn with_visitor_after(
        mut self,
        anchor: &'static str,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Self {
        self.registry_tweaks
            .push(RegistryTweak::InsertAfter { anchor, id, visitor });
        self
    }

    /// Replace a built-in visitor by id.
    pub fn replace_visitor(
        mut self,
        id: &'static str,
        visitor: Arc<dyn KnownTypeVisitor>,
    ) -> Self {
        self.registry_tweaks.push(RegistryTweak::Replace { id, visitor });
        self
    }

    /// Disable a built-in visitor by id.
    pub fn without_visitor(mut self, id: &'static str) -> Self {
        self.registry_tweaks.push(RegistryTweak::Remove { id });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DumpOptions::default();
        assert_eq!(options.max_depth, 25);
        assert_eq!(options.max_collection_size, usize::MAX);
        assert!(!options.ignore_null_values);
        assert!(options.writable_properties_only);
        assert!(!options.include_fields);
        assert_eq!(options.sort_members_by, MemberSort::Declaration);
    }

    #[test]
    fn test_clone_is_a_snapshot() {
        let template = DumpOptions::default().with_max_depth(3);
        let snapshot = template.clone();
        let template = template.with_max_depth(10);
        assert_eq!(snapshot.max_depth, 3);
        assert_eq!(template.max_depth, 10);
    }

    #[test]
    fn test_integer_format_decimal_grouping() {
        let format = IntegerFormat {
            radix: IntegerRadix::Decimal,
            group_digits: true,
        };
        assert_eq!(format.format_unsigned(1_234_567), "1_234_567");
        assert_eq!(format.format_unsigned(123), "123");
        assert_eq!(format.format_signed(-1_000), "-1_000");
    }

    #[test]
    fn test_integer_format_hex_and_binary() {
        let hex = IntegerFormat {
            radix: IntegerRadix::Hexadecimal,
            group_digits: false,
        };
        assert_eq!(hex.format_unsigned(255), "0xFF");
        let bin = IntegerFormat {
            radix: IntegerRadix::Binary,
            group_digits: true,
        };
        assert_eq!(bin.format_unsigned(10), "0b1010");
        assert_eq!(bin.format_unsigned(0b1_0101), "0b1_0101");
    }
}
