//! End-to-end dumps through the C# writer.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use dumpling::{DateKind, DumpOptions, SchemaInspector};
use dumpling_csharp::CSharpDumper;
use uuid::Uuid;

fn dumper(options: DumpOptions, inspector: SchemaInspector) -> CSharpDumper {
    CSharpDumper::new(options, Arc::new(inspector)).expect("registry tweaks are valid")
}

struct Customer {
    id: i64,
    name: String,
    active: bool,
}

#[test]
fn test_object_initializer() {
    let inspector = SchemaInspector::builder()
        .object::<Customer>(|s| {
            s.property("Id", |c: &Customer| &c.id)
                .property("Name", |c: &Customer| &c.name)
                .property("Active", |c: &Customer| &c.active)
        })
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let customer = Customer {
        id: 7,
        name: "Acme".into(),
        active: true,
    };
    insta::assert_snapshot!("customer_object", dumper.dump(&customer));
}

#[test]
fn test_dictionary_uses_index_initializer() {
    let inspector = SchemaInspector::builder()
        .btree_map_of::<String, i32>()
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);
    assert_eq!(
        dumper.dump(&map),
        "new Dictionary<string, int>\n{\n    [\"a\"] = 1,\n    [\"b\"] = 2,\n}"
    );
}

#[test]
fn test_dictionary_truncation() {
    let inspector = SchemaInspector::builder()
        .btree_map_of::<String, i32>()
        .build();
    let dumper = dumper(DumpOptions::default().with_max_collection_size(1), inspector);
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), 1);
    map.insert("b".to_string(), 2);
    let output = dumper.dump(&map);
    assert!(output.contains("[\"a\"] = 1"), "{output}");
    assert!(
        output.contains("1 more items, raise max_collection_size above 1"),
        "{output}"
    );
    assert!(!output.contains("\"b\""), "{output}");
}

#[test]
fn test_list_initializer() {
    let inspector = SchemaInspector::builder().vec_of::<i32>().build();
    let dumper = dumper(DumpOptions::default(), inspector);
    assert_eq!(
        dumper.dump(&vec![1, 2]),
        "new List<int>\n{\n    1,\n    2,\n}"
    );
    let empty: Vec<i32> = Vec::new();
    assert_eq!(dumper.dump(&empty), "new List<int>()");
}

struct Point {
    x: i32,
    y: i32,
    label: String,
}

#[test]
fn test_record_with_named_arguments() {
    let inspector = SchemaInspector::builder()
        .object::<Point>(|s| {
            s.property("X", |p: &Point| &p.x)
                .property("Y", |p: &Point| &p.y)
                .property("Label", |p: &Point| &p.label)
                .ctor(&["X", "Y"])
        })
        .build();
    let dumper = dumper(DumpOptions::default().use_named_arguments(), inspector);
    let point = Point {
        x: 1,
        y: 2,
        label: "origin".into(),
    };
    assert_eq!(
        dumper.dump(&point),
        "new Point(x: 1, y: 2) { Label = \"origin\" }"
    );
}

#[test]
fn test_record_with_readonly_ctor_properties() {
    let inspector = SchemaInspector::builder()
        .object::<Point>(|s| {
            s.readonly_property("X", |p: &Point| &p.x)
                .readonly_property("Y", |p: &Point| &p.y)
                .property("Label", |p: &Point| &p.label)
                .readonly_property("Sum", |p: &Point| &p.x)
                .ctor(&["X", "Y"])
        })
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let point = Point {
        x: 1,
        y: 2,
        label: "origin".into(),
    };
    // Read-only properties still feed the constructor; only the leftover
    // read-only member is suppressed.
    assert_eq!(
        dumper.dump(&point),
        "new Point(1, 2) { Label = \"origin\" }"
    );
}

struct Projection {
    name: String,
    count: i32,
}

#[test]
fn test_anonymous_object() {
    let inspector = SchemaInspector::builder()
        .object::<Projection>(|s| {
            s.property("Name", |p: &Projection| &p.name)
                .property("Count", |p: &Projection| &p.count)
                .anonymous()
        })
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let shape = Projection {
        name: "x".into(),
        count: 3,
    };
    assert_eq!(
        dumper.dump(&shape),
        "new\n{\n    Name = \"x\",\n    Count = 3,\n}"
    );
}

#[test]
fn test_nullable_members() {
    let inspector = SchemaInspector::builder().option_of::<i32>().build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let present: Option<i32> = Some(5);
    let absent: Option<i32> = None;
    assert_eq!(dumper.dump(&present), "5");
    assert_eq!(dumper.dump(&absent), "null");
}

#[test]
fn test_date_only() {
    let dumper = dumper(DumpOptions::default(), SchemaInspector::empty());
    let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    assert_eq!(dumper.dump(&date), "new DateOnly(2024, 5, 17)");
}

#[test]
fn test_date_time_with_kind() {
    let dumper = dumper(
        DumpOptions::default().with_date_kind(DateKind::Utc),
        SchemaInspector::empty(),
    );
    let datetime = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    assert_eq!(
        dumper.dump(&datetime),
        "new DateTime(2024, 1, 2, 3, 4, 5, DateTimeKind.Utc)"
    );
}

#[test]
fn test_time_span() {
    let dumper = dumper(DumpOptions::default(), SchemaInspector::empty());
    assert_eq!(
        dumper.dump(&TimeDelta::seconds(90)),
        "TimeSpan.FromSeconds(90)"
    );
    assert_eq!(
        dumper.dump(&TimeDelta::milliseconds(1500)),
        "TimeSpan.FromMilliseconds(1500)"
    );
}

#[test]
fn test_guid() {
    let dumper = dumper(DumpOptions::default(), SchemaInspector::empty());
    assert_eq!(
        dumper.dump(&Uuid::nil()),
        "Guid.Parse(\"00000000-0000-0000-0000-000000000000\")"
    );
}

#[test]
fn test_version_and_uri() {
    let dumper = dumper(DumpOptions::default(), SchemaInspector::empty());
    assert_eq!(
        dumper.dump(&semver::Version::new(1, 2, 3)),
        "Version.Parse(\"1.2.3\")"
    );
    let url = url::Url::parse("https://example.com/a").unwrap();
    assert_eq!(dumper.dump(&url), "new Uri(\"https://example.com/a\")");
}

#[test]
fn test_ip_endpoint() {
    let dumper = dumper(DumpOptions::default(), SchemaInspector::empty());
    let endpoint: std::net::SocketAddr = "127.0.0.1:8080".parse().unwrap();
    assert_eq!(dumper.dump(&endpoint), "IPEndPoint.Parse(\"127.0.0.1:8080\")");
}

#[derive(Clone, Copy)]
struct Perms(u64);

#[test]
fn test_enum_rendering() {
    let inspector = SchemaInspector::builder()
        .enumeration::<Perms>(
            &[("Read", 1), ("Write", 2), ("Execute", 4)],
            true,
            |p: &Perms| p.0,
        )
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    assert_eq!(dumper.dump(&Perms(1)), "Perms.Read");
    assert_eq!(dumper.dump(&Perms(6)), "Perms.Write | Perms.Execute");
    assert_eq!(dumper.dump(&Perms(8)), "(Perms)8");
}

#[test]
fn test_variable_declaration() {
    struct Invoice {
        total: i64,
    }
    let inspector = SchemaInspector::builder()
        .object::<Invoice>(|s| s.property("Total", |i: &Invoice| &i.total))
        .build();
    let dumper = dumper(
        DumpOptions::default().generate_variable_declaration(),
        inspector,
    );
    assert_eq!(
        dumper.dump(&Invoice { total: 12 }),
        "var invoice = new Invoice { Total = 12 };"
    );
}

#[test]
fn test_grouping_renders_key_and_elements() {
    struct TagGroup {
        key: String,
        items: Vec<i32>,
    }
    let inspector = SchemaInspector::builder()
        .grouping::<TagGroup>(|g: &TagGroup| {
            (
                dumpling::FieldValue::of(&g.key),
                g.items
                    .iter()
                    .map(|i| dumpling::FieldValue::of(i))
                    .collect(),
            )
        })
        .build();
    let dumper = dumper(DumpOptions::default(), inspector);
    let group = TagGroup {
        key: "odd".into(),
        items: vec![1, 3],
    };
    assert_eq!(
        dumper.dump(&group),
        "(\"odd\", new[]\n{\n    1,\n    3,\n})"
    );
}
