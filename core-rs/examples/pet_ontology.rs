/// Example: Model a small pet ontology and print its triples
///
/// Declares Animal/Dog/Person classes, a few properties, builds two
/// individuals that reference each other and prints every triple.
///
/// Usage:
///   cargo run --example pet_ontology
///   cargo run --example pet_ontology -- --json

use alchemy_core::{current_session, iter_triples, Registry, Value};
use std::env;

const EX: &str = "http://example.org/pets#";

fn iri(local: &str) -> String {
    format!("{}{}", EX, local)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = env::args().any(|arg| arg == "--json");

    let mut registry = Registry::new();
    registry.declare_class("Animal", &iri("Animal"), &[])?;
    registry.declare_class("Dog", &iri("Dog"), &["Animal"])?;
    registry.declare_class("Person", &iri("Person"), &[])?;

    let xsd_string = registry.vocabulary().xsd.term("string");
    registry.declare_property("name", &iri("name"), &[&iri("Animal"), &iri("Person")], &[&xsd_string], &[])?;
    registry.declare_property("breed", &iri("breed"), &[&iri("Dog")], &[&xsd_string], &[])?;
    registry.declare_property("owner", &iri("owner"), &[&iri("Animal")], &[&iri("Person")], &[])?;
    registry.declare_property("primaryOwner", &iri("primaryOwner"), &[], &[], &["owner"])?;

    println!("Effective properties of Dog:");
    for property in registry.effective_properties("Dog")? {
        println!("  {}", property);
    }
    println!();

    let alice = registry
        .instance("Person")
        .set("label", "Alice")
        .set("name", "Alice")
        .build()?;

    let rex = registry
        .instance("Dog")
        .set("label", "Rex")
        .set("name", "Rex")
        .set("breed", "Labrador")
        .set("primaryOwner", &alice)
        .build()?;
    rex.append("name", "Rexy")?;

    if let Some(Value::Resource(owner)) = rex.single("primaryOwner")? {
        println!("Rex belongs to {}", owner);
    }
    println!();

    for individual in [&alice, &rex] {
        let triples = iter_triples(individual);
        if json {
            println!("{}", serde_json::to_string_pretty(&triples.to_vec())?);
        } else {
            for triple in &triples {
                println!("{}", triple);
            }
        }
    }

    let session = current_session();
    println!();
    println!(
        "Session {}: {} classes, {} properties, {} instances",
        session.id(),
        session.classes().len(),
        session.properties().len(),
        session.instances().len()
    );

    Ok(())
}
