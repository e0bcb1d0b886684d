//! Triple materialization
//!
//! Projects the containers of one instance into (subject, predicate, object)
//! triples. This is the hand-off point to serializers and stores, which live
//! outside this crate.

use oxigraph::model::{Literal as RdfLiteral, NamedNode, Term, Triple as RdfTriple};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::slice;

use crate::errors::{AlchemyError, Result};
use crate::model::{Instance, Literal, Value};

/// A triple borrowed from an instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triple<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    pub object: &'a Value,
}

impl Triple<'_> {
    pub fn to_owned_triple(&self) -> OwnedTriple {
        OwnedTriple {
            subject: self.subject.to_string(),
            predicate: self.predicate.to_string(),
            object: self.object.clone(),
        }
    }
}

impl fmt::Display for Triple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A triple detached from its instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedTriple {
    pub subject: String,
    pub predicate: String,
    pub object: Value,
}

impl OwnedTriple {
    /// Convert into an oxigraph triple for a downstream store
    ///
    /// # Errors
    ///
    /// `Rdf` when the subject, predicate or a resource object is not a valid IRI.
    pub fn to_rdf(&self) -> Result<RdfTriple> {
        let subject = NamedNode::new(self.subject.as_str())?;
        let predicate = NamedNode::new(self.predicate.as_str())?;
        let object: Term = match &self.object {
            Value::Resource(iri) => NamedNode::new(iri.as_str())?.into(),
            Value::Literal(Literal::String(s)) => RdfLiteral::new_simple_literal(s.as_str()).into(),
            Value::Literal(Literal::Integer(i)) => RdfLiteral::from(*i).into(),
            Value::Literal(Literal::Float(x)) => RdfLiteral::from(*x).into(),
            Value::Literal(Literal::Boolean(b)) => RdfLiteral::from(*b).into(),
        };
        Ok(RdfTriple::new(subject, predicate, object))
    }
}

impl TryFrom<&OwnedTriple> for RdfTriple {
    type Error = AlchemyError;

    fn try_from(triple: &OwnedTriple) -> Result<Self> {
        triple.to_rdf()
    }
}

impl fmt::Display for OwnedTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Snapshot of an instance's triples
///
/// The values are copied out under a short read lock, so the instance stays
/// open for appends while the view is alive; those appends show up in the
/// next call to [`iter_triples`], not in this view. Iterating is lazy and can
/// be repeated.
#[derive(Debug, Clone)]
pub struct Triples<'a> {
    subject: &'a str,
    containers: Vec<(String, Vec<Value>)>,
}

impl<'a> Triples<'a> {
    pub fn iter(&self) -> TripleIter<'_> {
        TripleIter {
            subject: self.subject,
            containers: self.containers.iter(),
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.containers.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<OwnedTriple> {
        self.iter().map(|t| t.to_owned_triple()).collect()
    }
}

impl<'t> IntoIterator for &'t Triples<'_> {
    type Item = Triple<'t>;
    type IntoIter = TripleIter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the triples of one instance
pub struct TripleIter<'a> {
    subject: &'a str,
    containers: slice::Iter<'a, (String, Vec<Value>)>,
    current: Option<(&'a str, slice::Iter<'a, Value>)>,
}

impl<'a> Iterator for TripleIter<'a> {
    type Item = Triple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((predicate, values)) = self.current.as_mut() {
                if let Some(object) = values.next() {
                    return Some(Triple {
                        subject: self.subject,
                        predicate: *predicate,
                        object,
                    });
                }
            }
            let (predicate, values) = self.containers.next()?;
            self.current = Some((predicate.as_str(), values.iter()));
        }
    }
}

/// Triples of `instance`: one per value, subject = the instance identifier
///
/// # Example
///
/// ```
/// use alchemy_core::{export::iter_triples, Registry};
///
/// let mut registry = Registry::new();
/// registry.declare_class("Dog", "http://example.org/Dog", &[]).unwrap();
/// let rex = registry.instance("Dog").set("label", "Rex").build().unwrap();
///
/// let triples = iter_triples(&rex);
/// assert_eq!(triples.iter().count(), 2); // label + type
/// assert!(triples.iter().all(|t| t.subject == rex.uri()));
/// ```
pub fn iter_triples(instance: &Instance) -> Triples<'_> {
    let containers: Vec<(String, Vec<Value>)> = instance
        .read()
        .values()
        .filter(|container| !container.is_empty())
        .map(|container| (container.predicate().to_string(), container.values().cloned().collect()))
        .collect();

    Triples {
        subject: instance.uri(),
        containers,
    }
}
