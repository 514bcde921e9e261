//! The abstract code-writer protocol.
//!
//! Visitors never build an expression tree: they emit directly through a
//! [`CodeWriter`], and every nested value argument is a deferred [`Emit`]
//! closure invoked by the writer at the right spot, so recursive emission
//! interleaves correctly with the writer's indentation state.
//!
//! Concrete writers (one per output-language grammar) live in their own
//! crates and share the [`SourceBuffer`] indentation buffer defined here.

use crate::descriptor::TypeDescriptor;
use crate::options::IntegerFormat;

/// A deferred emission action; invoke it to write the value it captured.
pub type Emit<'a> = Box<dyn FnOnce(&mut dyn CodeWriter) + 'a>;

/// Build an [`Emit`] from a closure.
pub fn emit<'a>(f: impl FnOnce(&mut dyn CodeWriter) + 'a) -> Emit<'a> {
    Box::new(f)
}

/// A primitive literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// The null/none literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Character literal.
    Char(char),
    /// String literal (unescaped; writers escape).
    Str(String),
    /// Signed integer literal.
    Int(i128),
    /// Unsigned integer literal.
    UInt(u128),
    /// 32-bit float literal.
    F32(f32),
    /// 64-bit float literal.
    F64(f64),
}

/// The callee of a method invocation or reference.
pub enum Callee<'a> {
    /// A static/associated method on a type.
    Static {
        /// The type owning the method.
        ty: &'a TypeDescriptor,
        /// Canonical method name; writers map it to their own idiom.
        method: &'a str,
    },
    /// An instance method on an emitted target expression.
    Instance {
        /// The receiver expression.
        target: Emit<'a>,
        /// Method name.
        method: &'a str,
    },
    /// A free function referenced by path.
    Free {
        /// Function path.
        path: &'a str,
    },
}

/// Code-emission primitives consumed by all visitors.
///
/// Object-safe; one implementation per target output syntax. Writers own
/// all spelling decisions (escaping, type-name mapping, layout); the engine
/// owns all traversal decisions.
pub trait CodeWriter {
    /// Write a primitive literal.
    fn literal(&mut self, literal: &Literal, format: &IntegerFormat);

    /// Write an object-create-and-initialize construct. `ty` of `None` (or
    /// an anonymous descriptor) omits the explicit type name.
    fn object_create(
        &mut self,
        ty: Option<&TypeDescriptor>,
        ctor_args: Vec<Emit<'_>>,
        initializers: Vec<(String, Emit<'_>)>,
        single_line: bool,
    );

    /// Write an array/collection-builder construct.
    fn array_create(
        &mut self,
        ty: Option<&TypeDescriptor>,
        items: Vec<Emit<'_>>,
        single_line: bool,
        size: Option<usize>,
    );

    /// Write an assignment expression.
    fn assign(&mut self, lhs: Emit<'_>, rhs: Emit<'_>);

    /// Write a property/field/variant reference, optionally type-qualified.
    fn member_reference(&mut self, ty: Option<&TypeDescriptor>, name: &str);

    /// Write a method invocation.
    fn method_invoke(&mut self, callee: Callee<'_>, args: Vec<Emit<'_>>);

    /// Write a method reference (no invocation).
    fn method_reference(&mut self, callee: Callee<'_>);

    /// Write a cast of `value` to `ty`.
    fn cast(&mut self, ty: &TypeDescriptor, value: Emit<'_>);

    /// Write the type's default/zero value expression.
    fn default_value(&mut self, ty: &TypeDescriptor);

    /// Write a type-handle expression for `ty`.
    fn type_of(&mut self, ty: &TypeDescriptor);

    /// Write a comment. `inline` renders in-expression (`/* … */`) with no
    /// trailing newline.
    fn comment(&mut self, text: &str, inline: bool);

    /// Write a named argument.
    fn named_argument(&mut self, name: &str, value: Emit<'_>);

    /// Write a bitwise-OR chain of flag operands.
    fn flags_or(&mut self, operands: Vec<Emit<'_>>);

    /// Whether the writer has an implicit key→value shorthand for
    /// dictionary entries.
    fn supports_implicit_key_value(&self) -> bool {
        false
    }

    /// Write a dictionary entry using the implicit shorthand.
    fn key_value(&mut self, key: Emit<'_>, value: Emit<'_>);

    /// Write a lambda expression.
    fn lambda(&mut self, params: &[String], body: Emit<'_>);

    /// Write a value-tuple construct.
    fn tuple(&mut self, items: Vec<Emit<'_>>);

    /// Write a variable declaration around `initializer`. `name` is given in
    /// canonical snake_case; writers re-case it.
    fn variable_declaration(
        &mut self,
        ty: Option<&TypeDescriptor>,
        name: &str,
        initializer: Emit<'_>,
    );

    /// Write an item separator.
    fn separator(&mut self);
}

/// Indentation style for emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation (Rust, C#).
    pub const FOUR: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const TWO: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to 4 whitespaces
            Self::Spaces(_) => "    ",
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::FOUR
    }
}

/// Append-only expression buffer with indentation tracking.
///
/// Shared by the concrete writers; expressions are built inline with
/// explicit [`newline`](SourceBuffer::newline) breaks that re-apply the
/// current indentation.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    indent: Indent,
    level: usize,
    buffer: String,
}

impl SourceBuffer {
    /// Create a buffer with the given indentation style.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            level: 0,
            buffer: String::new(),
        }
    }

    /// Append raw text at the current position.
    pub fn raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Break the line and apply the current indentation.
    pub fn newline(&mut self) -> &mut Self {
        self.buffer.push('\n');
        for _ in 0..self.level {
            self.buffer.push_str(self.indent.as_str());
        }
        self
    }

    /// Increase the indentation level.
    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Decrease the indentation level.
    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the buffer and return the emitted text.
    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(4).as_str(), "    ");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_buffer_indentation() {
        let mut buffer = SourceBuffer::new(Indent::FOUR);
        buffer.raw("Foo {").indent().newline().raw("x: 1,").dedent().newline().raw("}");
        assert_eq!(buffer.as_str(), "Foo {\n    x: 1,\n}");
    }

    #[test]
    fn test_buffer_nested_levels() {
        let mut buffer = SourceBuffer::new(Indent::TWO);
        buffer
            .raw("a")
            .indent()
            .newline()
            .raw("b")
            .indent()
            .newline()
            .raw("c")
            .dedent()
            .dedent()
            .newline()
            .raw("d");
        assert_eq!(buffer.as_str(), "a\n  b\n    c\nd");
    }
}
