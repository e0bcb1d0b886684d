// Property Value Contract Tests
//
// These tests verify INVARIANTS that MUST NEVER BREAK regardless of implementation.
//
// **Problem**: a container that "helpfully" dedups or replaces values silently drops triples
// **Solution**: Contract tests that fail with a clear explanation of what is being lost

use alchemy_core::{iter_triples, AlchemyError, Registry, Value};
use std::sync::{mpsc, Arc};
use std::time::Duration;

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.declare_class("Dog", "http://example.org/Dog", &[]).unwrap();
    registry
        .declare_property("name", "http://example.org/name", &["http://example.org/Dog"], &[], &[])
        .unwrap();
    registry
}

/// WHY: Every assignment is a fact; an instance never holds a bare value
/// REASON: Export emits one triple per value ever assigned
/// BREAKS: Triple export if values are replaced instead of appended
/// SACRIFICES: If this fails, assignments are being lost
#[test]
fn values_keep_append_order_without_dedup() {
    let rex = registry().instance("Dog").set("name", "Rex").build().unwrap();
    rex.append("name", "Rexy").unwrap();
    rex.append("name", "Rex").unwrap();

    assert_eq!(
        rex.values("name").unwrap(),
        vec![Value::from("Rex"), Value::from("Rexy"), Value::from("Rex")]
    );

    // If this test fails, ask yourself:
    // "Am I turning the container into a set?"
    // "Am I letting a later assignment overwrite an earlier one?"
}

/// WHY: Reading the values twice must give the same answer
/// REASON: Exporters iterate an instance more than once (count, then write)
/// BREAKS: Any consumer that re-reads a container
/// SACRIFICES: If this fails, iteration is consuming the container
#[test]
fn iteration_is_restartable() {
    let rex = registry().instance("Dog").set("name", "Rex").build().unwrap();

    let triples = iter_triples(&rex);
    let first: Vec<String> = triples.iter().map(|t| t.to_string()).collect();
    let second: Vec<String> = triples.iter().map(|t| t.to_string()).collect();
    assert_eq!(first, second);
    assert_eq!(rex.values("name").unwrap(), rex.values("name").unwrap());
}

/// WHY: Single-value access must refuse to pick one of many
/// REASON: Silently returning the first value hides modeling errors
/// BREAKS: Callers that assume a functional property
/// SACRIFICES: If this fails, data is being chosen arbitrarily
#[test]
fn single_value_access_rejects_many() {
    let rex = registry().instance("Dog").build().unwrap();
    assert_eq!(rex.single("name").unwrap(), None);

    rex.append("name", "Rex").unwrap();
    assert_eq!(rex.single("name").unwrap(), Some(Value::from("Rex")));

    rex.append("name", "Rexy").unwrap();
    assert!(matches!(
        rex.single("name"),
        Err(AlchemyError::MultiValue { count: 2, .. })
    ));
}

/// WHY: Every effective property gets a container at construction, even if unassigned
/// REASON: Later appends must not depend on whether construction mentioned the property
/// BREAKS: Appending to properties left out of construction
#[test]
fn every_effective_property_has_a_container() {
    let registry = registry();
    let rex = registry.instance("Dog").build().unwrap();

    for property in registry.effective_properties("Dog").unwrap() {
        assert!(rex.has_property(property.name()), "missing {}", property.name());
    }
    rex.append("name", "Rex").unwrap();
}

/// WHY: A live instance stays open for appends while its triples are being read
/// REASON: Exporters and writers share instances; reading must have no side effects
/// BREAKS: Any caller that appends while holding a triple view (self-deadlock)
/// SACRIFICES: If this fails, exporting an instance freezes it
#[test]
fn append_never_waits_on_triple_view() {
    let rex = registry().instance("Dog").set("name", "Rex").build().unwrap();
    let triples = iter_triples(&rex);

    let (done, finished) = mpsc::channel();
    let writer = Arc::clone(&rex);
    std::thread::spawn(move || {
        let result = writer.append("comment", "good dog");
        let _ = done.send(result.is_ok());
    });

    assert_eq!(
        finished.recv_timeout(Duration::from_secs(5)),
        Ok(true),
        "append blocked while a triple view was alive"
    );
    assert_eq!(triples.len(), 2);
    assert_eq!(iter_triples(&rex).len(), 3);
}
