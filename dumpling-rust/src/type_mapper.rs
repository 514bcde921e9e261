//! Type-name rendering for Rust output.

use dumpling::TypeDescriptor;

/// Render a descriptor as a Rust type name.
///
/// Short names by default (`Vec<String>`); fully-qualified paths when
/// `full_paths` is set. Anonymous shapes render empty.
pub fn render_type(ty: &TypeDescriptor, full_paths: bool) -> String {
    match ty {
        TypeDescriptor::Array { element, .. } => {
            format!("[{}]", render_type(element, full_paths))
        }
        TypeDescriptor::Named { anonymous: true, .. } => String::new(),
        TypeDescriptor::Named { path, generics, .. } => {
            let base = if full_paths {
                path.clone()
            } else {
                ty.short_name().to_string()
            };
            if generics.is_empty() {
                base
            } else {
                let args: Vec<String> = generics
                    .iter()
                    .map(|g| render_type(g, full_paths))
                    .collect();
                format!("{base}<{}>", args.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_full_paths() {
        let ty = TypeDescriptor::parse("std::vec::Vec<alloc::string::String>");
        assert_eq!(render_type(&ty, false), "Vec<String>");
        assert_eq!(
            render_type(&ty, true),
            "std::vec::Vec<alloc::string::String>"
        );
    }

    #[test]
    fn test_array_and_anonymous() {
        assert_eq!(
            render_type(&TypeDescriptor::parse("[i32; 4]"), false),
            "[i32]"
        );
        assert_eq!(render_type(&TypeDescriptor::anonymous(), false), "");
    }
}
