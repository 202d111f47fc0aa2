use boltconv_macros::{FromRow, NodeEntity};
use boltconv_core::traits::{FromBolt, FromRow, NodeEntity};
use boltconv_core::error::ConvertError;
use neo4rs::{BoltList, BoltType, Row};

#[derive(Debug, NodeEntity)]
#[boltconv(label = "Person")]
#[allow(dead_code)]
struct Person {
    id: i64,
    name: String,
    #[boltconv(prop = "email_address")]
    email: Option<String>,
}

#[derive(Debug, NodeEntity)]
#[allow(dead_code)]
struct Tag {
    value: String,
}

fn node(label: &str, props: Vec<(&str, BoltType)>) -> neo4rs::BoltNode {
    neo4rs::BoltNode::new(
        neo4rs::BoltInteger::new(1),
        vec![BoltType::from(label)].into(),
        props
            .into_iter()
            .map(|(k, v)| (neo4rs::BoltString::from(k), v))
            .collect(),
    )
}

fn row(fields: Vec<&str>, data: Vec<BoltType>) -> Row {
    let fields = BoltList::from(fields.into_iter().map(BoltType::from).collect::<Vec<_>>());
    Row::new(fields, BoltList::from(data))
}

#[test]
fn test_node_label() {
    assert_eq!(Person::LABEL, "Person");
    assert_eq!(Tag::LABEL, "Tag");
}

#[test]
fn test_person_from_bolt_node() {
    let n = node(
        "Person",
        vec![
            ("id", BoltType::from(42)),
            ("name", BoltType::from("Alice")),
            ("email_address", BoltType::from("alice@example.com")),
        ],
    );
    let person = Person::from_bolt(BoltType::Node(n)).unwrap();
    assert_eq!(person.id, 42);
    assert_eq!(person.name, "Alice");
    assert_eq!(person.email.as_deref(), Some("alice@example.com"));
}

#[test]
fn test_optional_prop_may_be_missing() {
    let n = node("Person", vec![("id", BoltType::from(1)), ("name", BoltType::from("Bob"))]);
    let person = Person::from_node(&n).unwrap();
    assert_eq!(person.email, None);
}

#[test]
fn test_missing_prop() {
    let n = node("Person", vec![("id", BoltType::from(1))]);
    let err = Person::from_node(&n).unwrap_err();
    match &err {
        ConvertError::MissingProperty { property, label } => {
            assert_eq!(property, "name");
            assert_eq!(label, "Person");
        }
        other => panic!("expected MissingProperty, got: {other}"),
    }
}

#[test]
fn test_prop_type_error_has_context() {
    let n = node("Person", vec![("id", BoltType::from("one")), ("name", BoltType::from("Bob"))]);
    let msg = Person::from_node(&n).unwrap_err().to_string();
    assert!(msg.contains("Person::id (prop 'id')"));
}

#[test]
fn test_person_from_bolt_wrong_type() {
    let err = Person::from_bolt(BoltType::from(1)).unwrap_err();
    match &err {
        ConvertError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "Node");
            assert_eq!(got, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[derive(Debug, FromRow)]
struct Audit {
    created: String,
}

#[derive(Debug, FromRow)]
struct PersonRow {
    #[boltconv(column = "p")]
    person: Person,
    score: Option<f64>,
    #[boltconv(flatten)]
    audit: Audit,
}

#[test]
fn test_from_row_with_flatten_and_rename() {
    let p = node("Person", vec![("id", BoltType::from(7)), ("name", BoltType::from("Alice"))]);
    let r = row(
        vec!["p", "score", "created"],
        vec![BoltType::Node(p), BoltType::Float(neo4rs::BoltFloat::new(0.5)), BoltType::from("2024-01-01")],
    );
    let mapped = PersonRow::from_row(&r).unwrap();
    assert_eq!(mapped.person.name, "Alice");
    assert_eq!(mapped.score, Some(0.5));
    assert_eq!(mapped.audit.created, "2024-01-01");
}

#[test]
fn test_from_row_optional_column_missing() {
    let p = node("Person", vec![("id", BoltType::from(7)), ("name", BoltType::from("Alice"))]);
    let r = row(vec!["p", "created"], vec![BoltType::Node(p), BoltType::from("today")]);
    let mapped = PersonRow::from_row(&r).unwrap();
    assert_eq!(mapped.score, None);
}

#[test]
fn test_from_row_missing_column() {
    let r = row(vec!["score", "created"], vec![BoltType::from(1), BoltType::from("today")]);
    let err = PersonRow::from_row(&r).unwrap_err();
    match &err {
        ConvertError::MissingField { field, struct_name } => {
            assert_eq!(field, "p");
            assert_eq!(struct_name, "PersonRow");
        }
        other => panic!("expected MissingField, got: {other}"),
    }
}

#[test]
fn test_from_row_column_error_has_context() {
    let r = row(vec!["created"], vec![BoltType::from(5)]);
    match Audit::from_row(&r).unwrap_err() {
        ConvertError::Context { context, source } => {
            assert_eq!(context, "Audit::created");
            assert!(matches!(*source, ConvertError::TypeMismatch { .. }));
        }
        other => panic!("expected Context, got: {other}"),
    }
}
