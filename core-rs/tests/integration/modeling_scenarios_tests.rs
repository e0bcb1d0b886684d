//! Integration tests for end-to-end modeling
//!
//! Tests the full path from declarations to triples:
//! - Declaring class and property hierarchies
//! - Constructing instances and appending values
//! - Identifier generation and overrides
//! - Triple export

use alchemy_core::{
    iter_triples, AlchemyError, DeclarationKind, ModelConfig, OwnedTriple, PropertySpec, Registry,
    TypeAssertion, Value, IMPOSE_URI_KEY,
};
use std::collections::BTreeSet;

const EX: &str = "http://example.org/zoo#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

fn iri(local: &str) -> String {
    format!("{}{}", EX, local)
}

fn set(items: &[String]) -> BTreeSet<String> {
    items.iter().cloned().collect()
}

/// Animal(name) <- Dog(breed)
fn zoo(config: ModelConfig) -> Registry {
    let mut registry = Registry::with_config(config);
    registry.declare_class("Animal", &iri("Animal"), &[]).unwrap();
    registry.declare_class("Dog", &iri("Dog"), &["Animal"]).unwrap();
    registry
        .declare_property("name", &iri("name"), &[&iri("Animal")], &[], &[])
        .unwrap();
    registry
        .declare_property("breed", &iri("breed"), &[&iri("Dog")], &[], &[])
        .unwrap();
    registry
}

#[test]
fn test_dog_scenario_triples() {
    let registry = zoo(ModelConfig::default());

    let rex = registry
        .instance("Dog")
        .set("name", "Rex")
        .set("breed", "Labrador")
        .build()
        .unwrap();

    let triples: Vec<OwnedTriple> = iter_triples(&rex).to_vec();
    assert!(triples.iter().all(|t| t.subject == rex.uri()));

    let types: Vec<&OwnedTriple> = triples.iter().filter(|t| t.predicate == RDF_TYPE).collect();
    assert_eq!(types.len(), 1, "only the constructing class is asserted");
    assert_eq!(types[0].object, Value::resource(iri("Dog")));

    assert!(triples.contains(&OwnedTriple {
        subject: rex.uri().to_string(),
        predicate: iri("name"),
        object: Value::from("Rex"),
    }));
    assert!(triples.contains(&OwnedTriple {
        subject: rex.uri().to_string(),
        predicate: iri("breed"),
        object: Value::from("Labrador"),
    }));
    assert_eq!(triples.len(), 3);
}

#[test]
fn test_hierarchy_typing_asserts_ancestors() {
    let config = ModelConfig {
        type_assertion: TypeAssertion::Hierarchy,
        ..ModelConfig::default()
    };
    let registry = zoo(config);

    let rex = registry.instance("Dog").set("name", "Rex").build().unwrap();

    assert_eq!(rex.types(), vec![iri("Dog"), iri("Animal")]);
}

/// Test: appended values come back in order, without dedup
#[test]
fn test_append_order_is_preserved() {
    let registry = zoo(ModelConfig::default());
    let rex = registry.instance("Dog").set("name", "Rex").build().unwrap();

    rex.append("name", "Rexy").unwrap();
    rex.append("name", "Rex").unwrap();

    assert_eq!(
        rex.values("name").unwrap(),
        vec![Value::from("Rex"), Value::from("Rexy"), Value::from("Rex")]
    );
    assert!(matches!(
        rex.single("name"),
        Err(AlchemyError::MultiValue { count: 3, .. })
    ));
}

#[test]
fn test_property_outside_effective_set_is_rejected() {
    let registry = zoo(ModelConfig::default());

    let err = registry
        .instance("Animal")
        .set("breed", "Labrador")
        .build()
        .unwrap_err();
    match err {
        AlchemyError::UnknownProperty { class, property } => {
            assert_eq!(class, iri("Animal"));
            assert_eq!(property, "breed");
        }
        other => panic!("expected UnknownProperty, got {:?}", other),
    }

    let rex = registry.instance("Dog").build().unwrap();
    assert!(matches!(
        rex.append("wings", 2),
        Err(AlchemyError::UnknownProperty { .. })
    ));
}

#[test]
fn test_same_label_gets_distinct_identifiers() {
    let registry = zoo(ModelConfig::default());

    let first = registry.instance("Dog").set("label", "Rex").build().unwrap();
    let second = registry.instance("Dog").set("label", "Rex").build().unwrap();

    assert_ne!(first.uri(), second.uri());
    assert!(first.uri().contains("/Dog/ktb-"));
    assert!(second.uri().contains("/Dog/ktb-"));
}

#[test]
fn test_explicit_identifier_bypasses_generator() {
    let registry = zoo(ModelConfig::default());

    let by_key = registry
        .instantiate(
            "Dog",
            vec![
                (IMPOSE_URI_KEY, Value::from("http://example.org/dogs/rex")),
                ("name", Value::from("Rex")),
            ],
        )
        .unwrap();
    assert_eq!(by_key.uri(), "http://example.org/dogs/rex");
    assert!(!by_key.has_property(IMPOSE_URI_KEY));

    let by_method = registry
        .instance("Dog")
        .impose_uri("http://example.org/dogs/fido")
        .build()
        .unwrap();
    assert_eq!(by_method.uri(), "http://example.org/dogs/fido");
}

/// Test: domain and range are the union over the property lineage
#[test]
fn test_inferred_domain_and_range_union() {
    let mut registry = zoo(ModelConfig::default());
    registry.declare_class("Person", &iri("Person"), &[]).unwrap();
    registry
        .declare_property("knows", &iri("knows"), &[&iri("Person")], &[&iri("Person")], &[])
        .unwrap();
    registry
        .declare_property("likes", &iri("likes"), &[&iri("Animal")], &[&iri("Animal")], &[])
        .unwrap();
    registry
        .declare(
            PropertySpec::new("befriends", iri("befriends")).supertypes(["knows", "likes"]),
        )
        .unwrap();

    let expected = set(&[iri("Animal"), iri("Person")]);
    assert_eq!(registry.inferred_domain("befriends").unwrap(), expected);
    assert_eq!(registry.inferred_range("befriends").unwrap(), expected);

    // A Dog may now befriend a Person through the inherited domain
    let alice = registry.instance("Person").set("label", "Alice").build().unwrap();
    let rex = registry
        .instance("Dog")
        .set("befriends", &alice)
        .build()
        .unwrap();
    assert_eq!(
        rex.values("befriends").unwrap(),
        vec![Value::resource(alice.uri())]
    );
}

#[test]
fn test_cycle_is_reported_not_recursed() {
    let mut registry = Registry::new();
    registry.declare_class("A", &iri("A"), &["C"]).unwrap();
    registry.declare_class("B", &iri("B"), &["A"]).unwrap();
    registry.declare_class("C", &iri("C"), &["B"]).unwrap();

    match registry.ancestors("A") {
        Err(AlchemyError::CyclicHierarchy { kind, path }) => {
            assert_eq!(kind, DeclarationKind::Class);
            assert_eq!(path.first(), path.last());
            assert!(path.len() >= 4);
        }
        other => panic!("expected CyclicHierarchy, got {:?}", other),
    }

    registry
        .declare(PropertySpec::new("p", iri("p")).supertypes(["q"]))
        .unwrap();
    registry
        .declare(PropertySpec::new("q", iri("q")).supertypes(["p"]))
        .unwrap();
    assert!(matches!(
        registry.inferred_domain("p"),
        Err(AlchemyError::CyclicHierarchy { kind: DeclarationKind::Property, .. })
    ));
}

#[test]
fn test_duplicate_declarations_are_per_registry() {
    let mut first = Registry::new();
    let mut second = Registry::new();

    first.declare_class("Foo", &iri("Foo"), &[]).unwrap();
    assert!(matches!(
        first.declare_class("Foo", &iri("Foo2"), &[]),
        Err(AlchemyError::DuplicateDeclaration { kind: DeclarationKind::Class, .. })
    ));

    second.declare_class("Foo", &iri("Foo"), &[]).unwrap();
    assert!(second.class("Foo").is_some());
}

#[test]
fn test_relations_export_as_resources() {
    let mut registry = zoo(ModelConfig::default());
    registry
        .declare_property("friend", &iri("friend"), &[&iri("Animal")], &[&iri("Animal")], &[])
        .unwrap();

    let fido = registry.instance("Dog").set("label", "Fido").build().unwrap();
    let rex = registry
        .instance("Dog")
        .set("label", "Rex")
        .set("friend", &fido)
        .set("friend", "http://example.org/dogs/lassie")
        .build()
        .unwrap();

    let friends: Vec<String> = iter_triples(&rex)
        .iter()
        .filter(|t| t.predicate == iri("friend"))
        .map(|t| t.object.to_string())
        .collect();
    assert_eq!(
        friends,
        vec![
            format!("<{}>", fido.uri()),
            "<http://example.org/dogs/lassie>".to_string(),
        ]
    );
}

/// Test: a badly declared property for another class leaves Dog constructible
#[test]
fn test_unrelated_broken_property_does_not_block_construction() {
    let mut registry = zoo(ModelConfig::default());
    registry
        .declare_property("orphan", &iri("orphan"), &[&iri("Cat")], &[], &["typo"])
        .unwrap();

    let rex = registry.instance("Dog").set("label", "Rex").build().unwrap();
    assert!(rex.uri().contains("/Dog/ktb-"));
    assert!(!rex.has_property("orphan"));
}
