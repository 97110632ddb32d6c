use std::collections::HashSet;

use insta::assert_snapshot;
use rdf2vowl::{convert, ontology::Iri, ConversionOptions, Error, VowlDocument};
use rstest::rstest;
use serde_json::{json, Value};

const PREFIXES: &str = "\
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/onto#> .
<http://example.org/onto> a owl:Ontology .
";

fn document(body: &str) -> String {
    format!("{PREFIXES}{body}")
}

fn to_value(document: &VowlDocument) -> Value {
    serde_json::to_value(document).expect("serializable document")
}

fn run(body: &str, options: &ConversionOptions) -> Value {
    to_value(&convert(&document(body), options).expect("conversion"))
}

fn attribute<'a>(value: &'a Value, table: &str, id: &str) -> &'a Value {
    value[table]
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["id"] == id))
        .unwrap_or_else(|| panic!("{table} has no row {id}"))
}

const SUBCLASS_AND_PROPERTY: &str = "
ex:A a owl:Class ;
    rdfs:subClassOf ex:B .
ex:B a owl:Class .
ex:p a owl:ObjectProperty ;
    rdfs:domain ex:A ;
    rdfs:range ex:B .
";

#[test]
fn can_convert_subclass_and_property() {
    let value = run(SUBCLASS_AND_PROPERTY, &ConversionOptions::default());

    assert_eq!(value["metrics"]["classCount"], json!(3));
    assert_eq!(value["class"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        value["property"],
        json!([
            { "id": "0", "type": "owl:objectProperty" },
            { "id": "4", "type": "rdfs:SubClassOf" }
        ])
    );
    let inheritance = attribute(&value, "propertyAttribute", "4");
    assert_eq!(inheritance["domain"], json!("2"));
    assert_eq!(inheritance["range"], json!("3"));
}

#[test]
fn can_snapshot_subclass_and_property() {
    let document = convert(&document(SUBCLASS_AND_PROPERTY), &ConversionOptions::default())
        .expect("conversion");

    assert_snapshot!(
        "subclass_and_property",
        document.to_json(true).expect("json")
    );
}

#[test]
fn property_without_domain_or_range_points_at_root() {
    let value = run("ex:p a owl:ObjectProperty .\n", &ConversionOptions::default());

    let root = attribute(&value, "classAttribute", "1");
    assert_eq!(root["iri"], json!("http://www.w3.org/2002/07/owl#Thing"));
    assert_eq!(root["label"], json!({ "undefined": "Thing" }));

    let property = attribute(&value, "propertyAttribute", "0");
    assert_eq!(property["domain"], json!("1"));
    assert_eq!(property["range"], json!("1"));
    assert_eq!(property["label"], json!({ "IRI-based": "p" }));
    assert_eq!(property["baseIri"], json!("http://example.org/onto"));
}

#[test]
fn individuals_get_membership_and_assertion_edges() {
    let value = run(
        "
ex:A a owl:Class .
ex:rel a owl:ObjectProperty .
ex:i1 a owl:NamedIndividual , ex:A ;
    ex:rel ex:i2 .
ex:i2 a owl:NamedIndividual , ex:A .
",
        &ConversionOptions::default(),
    );

    // rel=0, Thing=1, A=2, i1=3, i2=4, then synthesized edges.
    assert_eq!(value["metrics"]["individualCount"], json!(2));
    assert_eq!(attribute(&value, "classAttribute", "2")["instances"], json!(0));

    let memberships: Vec<_> = value["property"]
        .as_array()
        .expect("property table")
        .iter()
        .filter(|row| row["type"] == "rdfs:type")
        .map(|row| {
            let edge = attribute(&value, "propertyAttribute", row["id"].as_str().unwrap());
            (edge["domain"].clone(), edge["range"].clone())
        })
        .collect();
    assert_eq!(
        memberships,
        vec![(json!("3"), json!("2")), (json!("4"), json!("2"))]
    );

    let assertion = attribute(&value, "propertyAttribute", "7");
    assert_eq!(assertion["domain"], json!("3"));
    assert_eq!(assertion["range"], json!("4"));
    assert_eq!(assertion["label"], json!({ "IRI-based": "rel" }));
}

#[test]
fn excluded_class_leaves_no_trace() {
    let options = ConversionOptions::default()
        .with_excluded([Iri::new("http://example.org/onto#B").expect("iri")]);
    let document = convert(
        &document(
            "
ex:A a owl:Class ;
    rdfs:subClassOf ex:B .
ex:B a owl:Class .
ex:C a owl:Class .
ex:i1 a owl:NamedIndividual , ex:B .
",
        ),
        &options,
    )
    .expect("conversion");
    let json = document.to_json(false).expect("json");

    assert!(!json.contains("onto#B"));
    assert!(!json.contains("onto#i1"));
    assert!(!json.contains("rdfs:SubClassOf"));
    assert!(json.contains("onto#C"));
}

#[test]
fn exclusion_follows_the_sub_class_chain() {
    let options = ConversionOptions::default()
        .with_excluded([Iri::new("http://example.org/onto#B").expect("iri")]);
    let json = convert(
        &document(
            "
ex:B a owl:Class .
ex:A a owl:Class ;
    rdfs:subClassOf ex:B .
ex:C a owl:Class ;
    rdfs:subClassOf ex:A .
ex:j a owl:NamedIndividual , ex:C .
ex:D a owl:Class .
",
        ),
        &options,
    )
    .expect("conversion")
    .to_json(false)
    .expect("json");

    for gone in ["onto#A", "onto#B", "onto#C", "onto#j"] {
        assert!(!json.contains(gone), "{gone} survived the exclusion");
    }
    assert!(json.contains("onto#D"));
    assert!(!json.contains("rdfs:type"));
}

#[test]
fn conversion_is_deterministic() {
    let text = document(SUBCLASS_AND_PROPERTY);
    let first = convert(&text, &ConversionOptions::default()).expect("first");
    let second = convert(&text, &ConversionOptions::default()).expect("second");

    assert_eq!(first, second);
}

#[rstest]
#[case::empty("")]
#[case::subclass_and_property(SUBCLASS_AND_PROPERTY)]
#[case::cyclic_hierarchy(
    "
ex:A a owl:Class ; rdfs:subClassOf ex:B .
ex:B a owl:Class ; rdfs:subClassOf ex:A .
"
)]
#[case::dangling_references(
    "
ex:A a owl:Class ; rdfs:subClassOf ex:Undeclared .
ex:p a owl:ObjectProperty ; rdfs:domain ex:Undeclared .
ex:x a ex:A .
"
)]
fn graph_invariants_hold(#[case] body: &str) {
    let value = run(body, &ConversionOptions::default());

    let class_ids: Vec<&str> = value["class"]
        .as_array()
        .expect("class table")
        .iter()
        .filter_map(|row| row["id"].as_str())
        .collect();
    let property_ids: Vec<&str> = value["property"]
        .as_array()
        .expect("property table")
        .iter()
        .filter_map(|row| row["id"].as_str())
        .collect();

    let mut seen = HashSet::new();
    for id in class_ids.iter().chain(&property_ids) {
        assert!(seen.insert(*id), "id {id} used twice");
    }

    let roots = value["classAttribute"]
        .as_array()
        .expect("class attributes")
        .iter()
        .filter(|row| row["iri"] == "http://www.w3.org/2002/07/owl#Thing")
        .count();
    assert_eq!(roots, 1);

    for row in value["propertyAttribute"].as_array().expect("property attributes") {
        for end in ["domain", "range"] {
            let id = row[end].as_str().expect("endpoint id");
            assert!(class_ids.contains(&id), "{end} {id} is not a node");
        }
    }
}

#[test]
fn cyclic_hierarchy_yields_a_single_edge() {
    let value = run(
        "
ex:A a owl:Class ; rdfs:subClassOf ex:B .
ex:B a owl:Class ; rdfs:subClassOf ex:A .
",
        &ConversionOptions::default(),
    );

    assert_eq!(value["metrics"]["objectPropertyCount"], json!(1));
    let pairs: Vec<_> = value["propertyAttribute"]
        .as_array()
        .expect("property attributes")
        .iter()
        .map(|row| (row["domain"].clone(), row["range"].clone()))
        .collect();
    assert_eq!(pairs, vec![(json!("2"), json!("1"))]);
}

#[test]
fn unresolved_edges_are_counted_not_emitted() {
    let value = run(
        "ex:p a owl:ObjectProperty ; rdfs:domain ex:Undeclared .\n",
        &ConversionOptions::default(),
    );

    assert_eq!(value["metrics"]["objectPropertyCount"], json!(1));
    assert_eq!(value["property"], json!([]));
    assert_eq!(value["propertyAttribute"], json!([]));
}

#[test]
fn semantic_attributes_are_opt_in() {
    let body = "
ex:partOf a owl:ObjectProperty , owl:TransitiveProperty .
ex:hasPart a owl:ObjectProperty ;
    owl:inverseOf ex:partOf .
ex:A a owl:Class ; owl:equivalentClass ex:B .
ex:B a owl:Class .
";

    let plain = run(body, &ConversionOptions::default());
    assert_eq!(
        attribute(&plain, "propertyAttribute", "0")["attributes"],
        json!(["object"])
    );
    assert!(attribute(&plain, "propertyAttribute", "0").get("inverse").is_none());
    assert!(attribute(&plain, "classAttribute", "3").get("equivalent").is_none());

    let rich = run(
        body,
        &ConversionOptions::default().with_semantic_attributes(true),
    );
    let part_of = attribute(&rich, "propertyAttribute", "0");
    assert_eq!(part_of["attributes"], json!(["object", "transitive"]));
    assert_eq!(part_of["inverse"], json!("1"));
    assert_eq!(
        attribute(&rich, "propertyAttribute", "1")["inverse"],
        json!("0")
    );
    assert_eq!(
        attribute(&rich, "classAttribute", "3")["equivalent"],
        json!(["4"])
    );
}

#[test]
fn missing_root_is_reported() {
    let err = convert(
        "@prefix ex: <http://example.org/onto#> .\nex:A ex:b ex:c .\n",
        &ConversionOptions::default(),
    )
    .expect_err("no root");

    assert!(matches!(err, Error::RootIriMissing));
}
