//! Type-name mapping from inspector descriptors to C# names.

use dumpling::TypeDescriptor;

/// Render a descriptor as a C# type name.
///
/// Primitive, container, and well-known identifier types map onto their
/// BCL counterparts; anything else keeps its short name (which caller
/// schemas already spell in PascalCase).
pub fn render_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Array { element, .. } => format!("{}[]", render_type(element)),
        TypeDescriptor::Named { anonymous: true, .. } => String::new(),
        TypeDescriptor::Named { generics, .. } => {
            let short = ty.short_name();
            if short == "Option" {
                if let [inner] = generics.as_slice() {
                    return format!("{}?", render_type(inner));
                }
            }
            // The zone parameter has no C# counterpart.
            if short == "DateTime" {
                return "DateTime".to_string();
            }
            let base = map_base(short);
            if generics.is_empty() {
                base.to_string()
            } else {
                let args: Vec<String> = generics.iter().map(render_type).collect();
                format!("{base}<{}>", args.join(", "))
            }
        }
    }
}

fn map_base(short: &str) -> &str {
    match short {
        "i8" => "sbyte",
        "i16" => "short",
        "i32" => "int",
        "i64" | "isize" => "long",
        "u8" => "byte",
        "u16" => "ushort",
        "u32" => "uint",
        "u64" | "usize" => "ulong",
        "i128" => "Int128",
        "u128" => "UInt128",
        "f32" => "float",
        "f64" => "double",
        "bool" => "bool",
        "char" => "char",
        "String" | "str" => "string",
        "Vec" | "VecDeque" => "List",
        "HashMap" | "BTreeMap" => "Dictionary",
        "HashSet" | "BTreeSet" => "HashSet",
        "Uuid" => "Guid",
        "Url" => "Uri",
        "IpAddr" | "Ipv4Addr" | "Ipv6Addr" => "IPAddress",
        "SocketAddr" | "SocketAddrV4" | "SocketAddrV6" => "IPEndPoint",
        "NaiveDate" => "DateOnly",
        "NaiveTime" => "TimeOnly",
        "NaiveDateTime" | "DateTime" => "DateTime",
        "TimeDelta" | "Duration" => "TimeSpan",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers_map_to_bcl() {
        let ty = TypeDescriptor::parse(
            "std::collections::HashMap<alloc::string::String, std::vec::Vec<i32>>",
        );
        assert_eq!(render_type(&ty), "Dictionary<string, List<int>>");
    }

    #[test]
    fn test_option_renders_nullable() {
        let ty = TypeDescriptor::parse("core::option::Option<i64>");
        assert_eq!(render_type(&ty), "long?");
    }

    #[test]
    fn test_zoned_datetime_drops_zone() {
        let ty = TypeDescriptor::parse("chrono::datetime::DateTime<chrono::offset::utc::Utc>");
        assert_eq!(render_type(&ty), "DateTime");
    }

    #[test]
    fn test_array_and_idents() {
        assert_eq!(render_type(&TypeDescriptor::parse("[u8; 16]")), "byte[]");
        assert_eq!(render_type(&TypeDescriptor::parse("uuid::Uuid")), "Guid");
    }
}
