//! Abstract description of a type, independent of output syntax.

/// A type reference captured from a visited value.
///
/// Exactly one of the two variants applies to any node. Descriptors are
/// immutable once constructed and built once per visited runtime type; code
/// writers consume them to render a type name in their own syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A named (possibly generic, possibly anonymous) type.
    Named {
        /// Fully-qualified path, `::`-separated. Empty for anonymous shapes.
        path: String,
        /// Ordered generic arguments. Empty renders the argument-less
        /// (unbound) generic form.
        generics: Vec<TypeDescriptor>,
        /// Compiler-synthesized shape; writers omit the explicit type name.
        anonymous: bool,
    },
    /// An array type.
    Array {
        /// Element type, recursively described.
        element: Box<TypeDescriptor>,
        /// Array rank (1 for a plain array).
        rank: usize,
    },
}

impl TypeDescriptor {
    /// A plain named type.
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named {
            path: path.into(),
            generics: Vec::new(),
            anonymous: false,
        }
    }

    /// A closed generic type with ordered arguments.
    pub fn generic(path: impl Into<String>, generics: Vec<TypeDescriptor>) -> Self {
        Self::Named {
            path: path.into(),
            generics,
            anonymous: false,
        }
    }

    /// An anonymous (structurally-typed) shape.
    pub fn anonymous() -> Self {
        Self::Named {
            path: String::new(),
            generics: Vec::new(),
            anonymous: true,
        }
    }

    /// A rank-1 array of the given element type.
    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Parse a descriptor from a compiler-reported type path such as
    /// `std::vec::Vec<alloc::string::String>` or `[i32; 3]`.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        if let Some(inner) = path.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
            // `[T; N]` or `[T]`; the length is runtime data, not part of the
            // type shape we carry.
            let element = match split_top_level(inner, ';').as_slice() {
                [elem, _len] => Self::parse(elem),
                _ => Self::parse(inner),
            };
            return Self::array(element);
        }
        if let Some(open) = find_top_level(path, '<') {
            if let Some(close) = path.rfind('>') {
                let base = &path[..open];
                let args = split_top_level(&path[open + 1..close], ',')
                    .into_iter()
                    .map(|a| Self::parse(&a))
                    .collect();
                return Self::generic(base, args);
            }
        }
        Self::named(path)
    }

    /// The fully-qualified base path (empty for anonymous and array types).
    pub fn path(&self) -> &str {
        match self {
            Self::Named { path, .. } => path,
            Self::Array { .. } => "",
        }
    }

    /// The last path segment (e.g. `Vec` for `std::vec::Vec`).
    pub fn short_name(&self) -> &str {
        match self {
            Self::Named { path, .. } => path.rsplit("::").next().unwrap_or(path),
            Self::Array { .. } => "",
        }
    }

    /// Generic arguments, if any.
    pub fn generics(&self) -> &[TypeDescriptor] {
        match self {
            Self::Named { generics, .. } => generics,
            Self::Array { .. } => &[],
        }
    }

    /// Whether this describes a compiler-synthesized anonymous shape.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Named { anonymous: true, .. })
    }
}

/// Find the position of `needle` at nesting depth zero.
fn find_top_level(s: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == needle && depth == 0 {
            return Some(i);
        }
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Split on `sep`, ignoring separators nested inside brackets.
fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in s.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if c == sep && depth == 0 {
            parts.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let td = TypeDescriptor::parse("alloc::string::String");
        assert_eq!(td.path(), "alloc::string::String");
        assert_eq!(td.short_name(), "String");
        assert!(td.generics().is_empty());
    }

    #[test]
    fn test_parse_generic() {
        let td = TypeDescriptor::parse("std::vec::Vec<alloc::string::String>");
        assert_eq!(td.path(), "std::vec::Vec");
        assert_eq!(td.generics().len(), 1);
        assert_eq!(td.generics()[0].short_name(), "String");
    }

    #[test]
    fn test_parse_nested_generic() {
        let td = TypeDescriptor::parse(
            "std::collections::HashMap<alloc::string::String, std::vec::Vec<i32>>",
        );
        assert_eq!(td.short_name(), "HashMap");
        assert_eq!(td.generics().len(), 2);
        assert_eq!(td.generics()[1].short_name(), "Vec");
        assert_eq!(td.generics()[1].generics()[0].path(), "i32");
    }

    #[test]
    fn test_parse_array() {
        let td = TypeDescriptor::parse("[i32; 3]");
        match &td {
            TypeDescriptor::Array { element, rank } => {
                assert_eq!(element.path(), "i32");
                assert_eq!(*rank, 1);
            }
            _ => panic!("expected array"),
        }
    }

    #[test]
    fn test_anonymous() {
        let td = TypeDescriptor::anonymous();
        assert!(td.is_anonymous());
        assert_eq!(td.short_name(), "");
    }
}
