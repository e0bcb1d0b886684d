//! Integration tests for schema documents
//!
//! Tests loading YAML schema documents from disk and applying them:
//! - Configuration carried by the document
//! - Registry contents and inference
//! - Individuals and their triples

use alchemy_core::{
    iter_triples, AlchemyError, Literal, PropertyKind, SchemaDocument, TypeAssertion, Value,
};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const PETS: &str = "http://example.org/pets#";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("core-rs/tests/fixtures")
        .join(name)
}

fn iri(local: &str) -> String {
    format!("{}{}", PETS, local)
}

#[test]
fn test_load_pets_fixture() {
    let document = SchemaDocument::load(fixture("pets.yaml")).unwrap();

    assert_eq!(document.config.base_uri, "http://example.org/pets/");
    assert_eq!(document.config.type_assertion, TypeAssertion::Declared);
    assert_eq!(document.classes.len(), 3);
    assert_eq!(document.properties.len(), 4);
    assert_eq!(document.individuals.len(), 2);
}

#[test]
fn test_apply_pets_fixture() {
    let model = SchemaDocument::load(fixture("pets.yaml")).unwrap().apply().unwrap();
    let registry = &model.registry;

    assert_eq!(registry.property("owner").unwrap().kind(), PropertyKind::Relation);
    assert_eq!(registry.property("age").unwrap().kind(), PropertyKind::Literal);

    let dog_properties: Vec<String> = registry
        .effective_properties("Dog")
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    for expected in ["label", "type", "name", "breed", "owner", "age"] {
        assert!(dog_properties.contains(&expected.to_string()), "missing {}", expected);
    }

    let alice = &model.individuals[0];
    let rex = &model.individuals[1];
    assert_eq!(alice.uri(), "http://example.org/pets/alice");
    assert!(rex.uri().starts_with("http://example.org/pets/Dog/ktb-"));

    assert_eq!(
        rex.values("owner").unwrap(),
        vec![Value::resource(alice.uri())]
    );
    assert_eq!(
        rex.single("age").unwrap(),
        Some(Value::Literal(Literal::Integer(4)))
    );

    let names: Vec<String> = iter_triples(rex)
        .iter()
        .filter(|t| t.predicate == iri("name"))
        .map(|t| t.object.to_string())
        .collect();
    assert_eq!(names, vec!["\"Rex\"", "\"Rexy\""]);
}

/// Test: configuration from the document reaches construction
#[test]
fn test_document_config_controls_typing() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
config:
  baseUri: urn:pets:
  typeAssertion: hierarchy
classes:
  - name: Animal
    identifier: {pets}Animal
  - name: Dog
    identifier: {pets}Dog
    supertypes: [Animal]
individuals:
  - class: Dog
    properties:
      label: Rex
"#,
        pets = PETS
    )
    .unwrap();

    let model = SchemaDocument::load(file.path()).unwrap().apply().unwrap();
    let rex = &model.individuals[0];

    assert!(rex.uri().starts_with("urn:pets:Dog/ktb-"), "{}", rex.uri());
    assert_eq!(rex.types(), vec![iri("Dog"), iri("Animal")]);
}

#[test]
fn test_invalid_documents_are_rejected() {
    let err = SchemaDocument::from_yaml_str("classes: {").unwrap_err();
    assert!(matches!(err, AlchemyError::ParseError(_)));

    let err = SchemaDocument::from_yaml_str("config:\n  baseUri: ''\n").unwrap_err();
    assert!(matches!(err, AlchemyError::ValidationError(_)));

    let duplicate = r#"
classes:
  - name: Dog
    identifier: http://example.org/Dog
  - name: Dog
    identifier: http://example.org/Dog2
"#;
    let err = SchemaDocument::from_yaml_str(duplicate).unwrap().apply().unwrap_err();
    assert!(matches!(err, AlchemyError::DuplicateDeclaration { .. }));
}
