//! The C# code writer.

use dumpling::naming::{to_camel_case, to_pascal_case};
use dumpling::{Callee, CodeWriter, Emit, Indent, IntegerFormat, Literal, SourceBuffer, TypeDescriptor};

use crate::type_mapper::render_type;

/// Renders dump emission as C# expressions.
pub struct CSharpWriter {
    buffer: SourceBuffer,
}

impl CSharpWriter {
    /// A writer with 4-space indentation.
    pub fn new() -> Self {
        Self {
            buffer: SourceBuffer::new(Indent::FOUR),
        }
    }

    /// Consume the writer and return the emitted source text.
    pub fn finish(self) -> String {
        self.buffer.finish()
    }

    fn write_items(&mut self, items: Vec<Emit<'_>>) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.buffer.raw(", ");
            }
            item(self);
        }
    }

    fn write_block_items(&mut self, items: Vec<Emit<'_>>) {
        self.buffer.newline().raw("{").indent();
        for item in items {
            self.buffer.newline();
            item(self);
            self.buffer.raw(",");
        }
        self.buffer.dedent().newline().raw("}");
    }

    fn write_initializers(&mut self, initializers: Vec<(String, Emit<'_>)>, single_line: bool) {
        if single_line {
            self.buffer.raw(" { ");
            for (i, (name, value)) in initializers.into_iter().enumerate() {
                if i > 0 {
                    self.buffer.raw(", ");
                }
                self.buffer.raw(&to_pascal_case(&name)).raw(" = ");
                value(self);
            }
            self.buffer.raw(" }");
            return;
        }
        self.buffer.newline().raw("{").indent();
        for (name, value) in initializers {
            self.buffer.newline().raw(&to_pascal_case(&name)).raw(" = ");
            value(self);
            self.buffer.raw(",");
        }
        self.buffer.dedent().newline().raw("}");
    }
}

impl Default for CSharpWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter for CSharpWriter {
    fn literal(&mut self, literal: &Literal, format: &IntegerFormat) {
        let text = match literal {
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Char(c) => format!("{c:?}"),
            Literal::Str(s) => format!("{s:?}"),
            Literal::Int(i) => format.format_signed(*i),
            Literal::UInt(u) => format.format_unsigned(*u),
            Literal::F32(f) => float_text(f64::from(*f), "float", "f"),
            Literal::F64(f) => float_text(*f, "double", ""),
        };
        self.buffer.raw(&text);
    }

    fn object_create(
        &mut self,
        ty: Option<&TypeDescriptor>,
        ctor_args: Vec<Emit<'_>>,
        initializers: Vec<(String, Emit<'_>)>,
        single_line: bool,
    ) {
        match ty.filter(|t| !t.is_anonymous()) {
            Some(ty) => {
                let base = render_type(ty);
                self.buffer.raw("new ").raw(&base);
                if !ctor_args.is_empty() || initializers.is_empty() {
                    self.buffer.raw("(");
                    self.write_items(ctor_args);
                    self.buffer.raw(")");
                }
                if !initializers.is_empty() {
                    self.write_initializers(initializers, single_line);
                }
            }
            None => {
                self.buffer.raw("new");
                if initializers.is_empty() {
                    self.buffer.raw(" { }");
                } else {
                    self.write_initializers(initializers, single_line);
                }
            }
        }
    }

    fn array_create(
        &mut self,
        ty: Option<&TypeDescriptor>,
        items: Vec<Emit<'_>>,
        single_line: bool,
        size: Option<usize>,
    ) {
        match ty {
            Some(array @ TypeDescriptor::Array { .. }) => {
                if items.is_empty() {
                    let TypeDescriptor::Array { element, .. } = array else {
                        return;
                    };
                    let size = size.unwrap_or(0);
                    self.buffer
                        .raw(&format!("new {}[{size}]", render_type(element)));
                    return;
                }
                self.buffer.raw("new[]");
            }
            Some(named) => {
                let base = render_type(named);
                if items.is_empty() {
                    self.buffer.raw(&format!("new {base}()"));
                    return;
                }
                self.buffer.raw("new ").raw(&base);
            }
            None => {
                self.buffer.raw("new[]");
            }
        }

        if single_line {
            self.buffer.raw(" { ");
            self.write_items(items);
            self.buffer.raw(" }");
        } else {
            self.write_block_items(items);
        }
    }

    fn assign(&mut self, lhs: Emit<'_>, rhs: Emit<'_>) {
        lhs(self);
        self.buffer.raw(" = ");
        rhs(self);
    }

    fn member_reference(&mut self, ty: Option<&TypeDescriptor>, name: &str) {
        if let Some(ty) = ty {
            self.buffer.raw(&render_type(ty)).raw(".");
        }
        self.buffer.raw(name);
    }

    fn method_invoke(&mut self, callee: Callee<'_>, args: Vec<Emit<'_>>) {
        match callee {
            Callee::Static { ty, method } => {
                let base = render_type(ty);
                match method {
                    "parse" if base == "Uri" => {
                        self.buffer.raw("new Uri(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    "parse" => {
                        self.buffer.raw(&base).raw(".Parse(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    "from_ymd" | "from_hms" | "from_hms_milli" | "from_ymd_hms" => {
                        self.buffer.raw("new ").raw(&base).raw("(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    "from_secs" => {
                        self.buffer.raw("TimeSpan.FromSeconds(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    "from_millis" => {
                        self.buffer.raw("TimeSpan.FromMilliseconds(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    other => {
                        self.buffer
                            .raw(&base)
                            .raw(".")
                            .raw(&to_pascal_case(other))
                            .raw("(");
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                }
            }
            Callee::Instance { target, method } => {
                target(self);
                self.buffer.raw(".").raw(&to_pascal_case(method)).raw("(");
                self.write_items(args);
                self.buffer.raw(")");
            }
            Callee::Free { path } => {
                self.buffer.raw(path).raw("(");
                self.write_items(args);
                self.buffer.raw(")");
            }
        }
    }

    fn method_reference(&mut self, callee: Callee<'_>) {
        match callee {
            Callee::Static { ty, method } => {
                self.buffer
                    .raw(&render_type(ty))
                    .raw(".")
                    .raw(&to_pascal_case(method));
            }
            Callee::Instance { target, method } => {
                target(self);
                self.buffer.raw(".").raw(&to_pascal_case(method));
            }
            Callee::Free { path } => {
                self.buffer.raw(path);
            }
        }
    }

    fn cast(&mut self, ty: &TypeDescriptor, value: Emit<'_>) {
        self.buffer.raw(&format!("({})", render_type(ty)));
        value(self);
    }

    fn default_value(&mut self, ty: &TypeDescriptor) {
        self.buffer.raw(&format!("default({})", render_type(ty)));
    }

    fn type_of(&mut self, ty: &TypeDescriptor) {
        self.buffer.raw(&format!("typeof({})", render_type(ty)));
    }

    fn comment(&mut self, text: &str, inline: bool) {
        if inline {
            self.buffer.raw(&format!(" /* {text} */"));
        } else {
            self.buffer.raw(&format!("// {text}")).newline();
        }
    }

    fn named_argument(&mut self, name: &str, value: Emit<'_>) {
        self.buffer.raw(&to_camel_case(name)).raw(": ");
        value(self);
    }

    fn flags_or(&mut self, operands: Vec<Emit<'_>>) {
        for (i, operand) in operands.into_iter().enumerate() {
            if i > 0 {
                self.buffer.raw(" | ");
            }
            operand(self);
        }
    }

    fn supports_implicit_key_value(&self) -> bool {
        true
    }

    fn key_value(&mut self, key: Emit<'_>, value: Emit<'_>) {
        self.buffer.raw("[");
        key(self);
        self.buffer.raw("] = ");
        value(self);
    }

    fn lambda(&mut self, params: &[String], body: Emit<'_>) {
        match params {
            [single] => {
                self.buffer.raw(single);
            }
            _ => {
                self.buffer.raw("(").raw(&params.join(", ")).raw(")");
            }
        }
        self.buffer.raw(" => ");
        body(self);
    }

    fn tuple(&mut self, items: Vec<Emit<'_>>) {
        self.buffer.raw("(");
        self.write_items(items);
        self.buffer.raw(")");
    }

    fn variable_declaration(
        &mut self,
        _ty: Option<&TypeDescriptor>,
        name: &str,
        initializer: Emit<'_>,
    ) {
        self.buffer.raw("var ").raw(&to_camel_case(name)).raw(" = ");
        initializer(self);
        self.buffer.raw(";");
    }

    fn separator(&mut self) {
        self.buffer.raw(", ");
    }
}

fn float_text(value: f64, ty: &str, suffix: &str) -> String {
    if value.is_nan() {
        format!("{ty}.NaN")
    } else if value.is_infinite() {
        if value > 0.0 {
            format!("{ty}.PositiveInfinity")
        } else {
            format!("{ty}.NegativeInfinity")
        }
    } else if value.fract() == 0.0 {
        format!("{value:.1}{suffix}")
    } else {
        format!("{value}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumpling::emit;

    fn render(f: impl FnOnce(&mut CSharpWriter)) -> String {
        let mut writer = CSharpWriter::new();
        f(&mut writer);
        writer.finish()
    }

    #[test]
    fn test_object_initializer_single_line() {
        let out = render(|w| {
            let ty = TypeDescriptor::named("Person");
            w.object_create(
                Some(&ty),
                vec![],
                vec![(
                    "Name".into(),
                    emit(|w| w.literal(&Literal::Str("Ada".into()), &IntegerFormat::default())),
                )],
                true,
            );
        });
        assert_eq!(out, "new Person { Name = \"Ada\" }");
    }

    #[test]
    fn test_dictionary_entries_use_index_syntax() {
        let out = render(|w| {
            let ty = TypeDescriptor::parse(
                "std::collections::BTreeMap<alloc::string::String, i32>",
            );
            let format = IntegerFormat::default();
            w.array_create(
                Some(&ty),
                vec![emit(move |w| {
                    w.key_value(
                        emit(move |w| w.literal(&Literal::Str("a".into()), &format)),
                        emit(move |w| w.literal(&Literal::Int(1), &format)),
                    )
                })],
                true,
                None,
            );
        });
        assert_eq!(out, "new Dictionary<string, int> { [\"a\"] = 1 }");
    }

    #[test]
    fn test_guid_parse() {
        let out = render(|w| {
            let ty = TypeDescriptor::parse("uuid::Uuid");
            let format = IntegerFormat::default();
            w.method_invoke(
                Callee::Static { ty: &ty, method: "parse" },
                vec![emit(move |w| {
                    w.literal(&Literal::Str("0000".into()), &format)
                })],
            );
        });
        assert_eq!(out, "Guid.Parse(\"0000\")");
    }

    #[test]
    fn test_empty_collections() {
        let out = render(|w| {
            let ty = TypeDescriptor::parse("std::vec::Vec<i32>");
            w.array_create(Some(&ty), vec![], true, None);
        });
        assert_eq!(out, "new List<int>()");
    }

    #[test]
    fn test_anonymous_object() {
        let out = render(|w| {
            w.object_create(
                None,
                vec![],
                vec![(
                    "Count".into(),
                    emit(|w| w.literal(&Literal::Int(3), &IntegerFormat::default())),
                )],
                true,
            );
        });
        assert_eq!(out, "new { Count = 3 }");
    }
}
