//! The Rust code writer.

use dumpling::naming::to_snake_case;
use dumpling::{Callee, CodeWriter, Emit, Indent, IntegerFormat, Literal, SourceBuffer, TypeDescriptor};

use crate::type_mapper::render_type;

/// Renders dump emission as Rust expressions.
pub struct RustWriter {
    buffer: SourceBuffer,
    full_type_names: bool,
}

impl RustWriter {
    /// A writer with 4-space indentation and short type names.
    pub fn new() -> Self {
        Self {
            buffer: SourceBuffer::new(Indent::FOUR),
            full_type_names: false,
        }
    }

    /// Render fully-qualified type paths.
    pub fn with_full_type_names(mut self) -> Self {
        self.full_type_names = true;
        self
    }

    /// Consume the writer and return the emitted source text.
    pub fn finish(self) -> String {
        self.buffer.finish()
    }

    fn ty(&self, ty: &TypeDescriptor) -> String {
        render_type(ty, self.full_type_names)
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
        self.buffer.indent();
        for item in items {
            self.buffer.newline();
            item(self);
            self.buffer.raw(",");
        }
        self.buffer.dedent().newline();
    }
}

impl Default for RustWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter for RustWriter {
    fn literal(&mut self, literal: &Literal, format: &IntegerFormat) {
        let text = match literal {
            Literal::Null => "None".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Char(c) => format!("{c:?}"),
            Literal::Str(s) => format!("{s:?}"),
            Literal::Int(i) => format.format_signed(*i),
            Literal::UInt(u) => format.format_unsigned(*u),
            Literal::F32(f) => float_text(f64::from(*f), "f32"),
            Literal::F64(f) => float_text(*f, "f64"),
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
        let named = ty.filter(|t| !t.is_anonymous()).map(|t| self.ty(t));

        // Constructor form: positional call, leftover members as
        // comment-labelled extra arguments.
        if !ctor_args.is_empty() {
            let base = named.unwrap_or_default();
            self.buffer.raw(&base).raw("::new(");
            let mut first = true;
            for arg in ctor_args {
                if !first {
                    self.buffer.raw(", ");
                }
                first = false;
                arg(self);
            }
            for (name, value) in initializers {
                if !first {
                    self.buffer.raw(", ");
                }
                first = false;
                self.buffer.raw(&format!("/* {name} */ "));
                value(self);
            }
            self.buffer.raw(")");
            return;
        }

        // No anonymous struct literal in Rust; fall back to a tuple.
        let Some(base) = named else {
            self.buffer.raw("(");
            for (i, (_, value)) in initializers.into_iter().enumerate() {
                if i > 0 {
                    self.buffer.raw(", ");
                }
                value(self);
            }
            self.buffer.raw(")");
            return;
        };

        if initializers.is_empty() {
            self.buffer.raw(&base).raw("::default()");
            return;
        }

        if single_line {
            self.buffer.raw(&base).raw(" { ");
            for (i, (name, value)) in initializers.into_iter().enumerate() {
                if i > 0 {
                    self.buffer.raw(", ");
                }
                self.buffer.raw(&to_snake_case(&name)).raw(": ");
                value(self);
            }
            self.buffer.raw(" }");
            return;
        }

        self.buffer.raw(&base).raw(" {").indent();
        for (name, value) in initializers {
            self.buffer.newline().raw(&to_snake_case(&name)).raw(": ");
            value(self);
            self.buffer.raw(",");
        }
        self.buffer.dedent().newline().raw("}");
    }

    fn array_create(
        &mut self,
        ty: Option<&TypeDescriptor>,
        items: Vec<Emit<'_>>,
        single_line: bool,
        _size: Option<usize>,
    ) {
        let (open, close) = match ty {
            None | Some(TypeDescriptor::Array { .. }) => ("[".to_string(), "]".to_string()),
            Some(named) if named.short_name() == "Vec" => {
                ("vec![".to_string(), "]".to_string())
            }
            Some(named) => {
                let base = if self.full_type_names {
                    named.path().to_string()
                } else {
                    named.short_name().to_string()
                };
                if items.is_empty() {
                    self.buffer.raw(&base).raw("::new()");
                    return;
                }
                (format!("{base}::from(["), "])".to_string())
            }
        };

        self.buffer.raw(&open);
        if single_line || items.is_empty() {
            self.write_items(items);
        } else {
            self.write_block_items(items);
        }
        self.buffer.raw(&close);
    }

    fn assign(&mut self, lhs: Emit<'_>, rhs: Emit<'_>) {
        lhs(self);
        self.buffer.raw(" = ");
        rhs(self);
    }

    fn member_reference(&mut self, ty: Option<&TypeDescriptor>, name: &str) {
        if let Some(ty) = ty {
            let base = self.ty(ty);
            self.buffer.raw(&base).raw("::");
        }
        self.buffer.raw(name);
    }

    fn method_invoke(&mut self, callee: Callee<'_>, args: Vec<Emit<'_>>) {
        match callee {
            Callee::Static { ty, method } => {
                let base = self.ty(ty);
                let short = ty.short_name().to_string();
                match method {
                    // Everything with a canonical string form goes through
                    // `FromStr`.
                    "parse" => {
                        if let Some(arg) = args.into_iter().next() {
                            arg(self);
                        }
                        self.buffer.raw(&format!(".parse::<{base}>().unwrap()"));
                    }
                    "from_ymd" | "from_hms" | "from_hms_milli" => {
                        self.buffer.raw(&format!("{base}::{method}_opt("));
                        self.write_items(args);
                        self.buffer.raw(").unwrap()");
                    }
                    "from_ymd_hms" => {
                        // Trailing kind argument is meaningless in chrono
                        // terms; the type already carries the zone.
                        let mut parts = args.into_iter().take(6);
                        if short == "NaiveDateTime" {
                            self.buffer.raw("NaiveDate::from_ymd_opt(");
                            for i in 0..3 {
                                if i > 0 {
                                    self.buffer.raw(", ");
                                }
                                if let Some(arg) = parts.next() {
                                    arg(self);
                                }
                            }
                            self.buffer.raw(").unwrap().and_hms_opt(");
                        } else {
                            self.buffer.raw("Utc.with_ymd_and_hms(");
                            for i in 0..3 {
                                if i > 0 {
                                    self.buffer.raw(", ");
                                }
                                if let Some(arg) = parts.next() {
                                    arg(self);
                                }
                            }
                            self.buffer.raw(", ");
                        }
                        for i in 0..3 {
                            if i > 0 {
                                self.buffer.raw(", ");
                            }
                            if let Some(arg) = parts.next() {
                                arg(self);
                            }
                        }
                        self.buffer.raw(").unwrap()");
                    }
                    "from_secs" | "from_millis" if short == "TimeDelta" => {
                        let mapped = if method == "from_secs" {
                            "seconds"
                        } else {
                            "milliseconds"
                        };
                        self.buffer.raw(&format!("TimeDelta::{mapped}("));
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                    _ => {
                        self.buffer.raw(&format!("{base}::{method}("));
                        self.write_items(args);
                        self.buffer.raw(")");
                    }
                }
            }
            Callee::Instance { target, method } => {
                target(self);
                self.buffer.raw(".").raw(method).raw("(");
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
                let base = self.ty(ty);
                self.buffer.raw(&base).raw("::").raw(method);
            }
            Callee::Instance { target, method } => {
                target(self);
                self.buffer.raw(".").raw(method);
            }
            Callee::Free { path } => {
                self.buffer.raw(path);
            }
        }
    }

    fn cast(&mut self, ty: &TypeDescriptor, value: Emit<'_>) {
        let base = self.ty(ty);
        self.buffer.raw("(");
        value(self);
        self.buffer.raw(&format!(" as {base})"));
    }

    fn default_value(&mut self, ty: &TypeDescriptor) {
        let base = self.ty(ty);
        if base.is_empty() || matches!(ty, TypeDescriptor::Array { .. }) {
            self.buffer.raw("Default::default()");
        } else {
            self.buffer.raw(&format!("{base}::default()"));
        }
    }

    fn type_of(&mut self, ty: &TypeDescriptor) {
        let base = self.ty(ty);
        self.buffer.raw(&format!("TypeId::of::<{base}>()"));
    }

    fn comment(&mut self, text: &str, inline: bool) {
        if inline {
            self.buffer.raw(&format!(" /* {text} */"));
        } else {
            self.buffer.raw(&format!("// {text}")).newline();
        }
    }

    fn named_argument(&mut self, name: &str, value: Emit<'_>) {
        // No named arguments in Rust; keep the name as a marker.
        self.buffer.raw(&format!("/* {name} */ "));
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

    fn key_value(&mut self, key: Emit<'_>, value: Emit<'_>) {
        self.buffer.raw("(");
        key(self);
        self.buffer.raw(", ");
        value(self);
        self.buffer.raw(")");
    }

    fn lambda(&mut self, params: &[String], body: Emit<'_>) {
        self.buffer.raw("|").raw(&params.join(", ")).raw("| ");
        body(self);
    }

    fn tuple(&mut self, items: Vec<Emit<'_>>) {
        let single = items.len() == 1;
        self.buffer.raw("(");
        self.write_items(items);
        if single {
            self.buffer.raw(",");
        }
        self.buffer.raw(")");
    }

    fn variable_declaration(
        &mut self,
        _ty: Option<&TypeDescriptor>,
        name: &str,
        initializer: Emit<'_>,
    ) {
        self.buffer.raw("let ").raw(name).raw(" = ");
        initializer(self);
        self.buffer.raw(";");
    }

    fn separator(&mut self) {
        self.buffer.raw(", ");
    }
}

fn float_text(value: f64, suffix_ty: &str) -> String {
    if value.is_nan() {
        format!("{suffix_ty}::NAN")
    } else if value.is_infinite() {
        if value > 0.0 {
            format!("{suffix_ty}::INFINITY")
        } else {
            format!("{suffix_ty}::NEG_INFINITY")
        }
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
