//! Values that can be assigned to a property

use oxigraph::model::NamedNodeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a property holds scalars or references to other resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Strings, numbers and booleans
    Literal,
    /// Other individuals or external identifiers
    Relation,
}

/// A scalar literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// A single value held by a property container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Literal(Literal),
    /// Identifier of another individual or an external resource
    Resource(String),
}

impl Value {
    pub fn resource(identifier: impl Into<String>) -> Self {
        Value::Resource(identifier.into())
    }

    /// The string payload of a string literal or a resource reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Literal(Literal::String(s)) | Value::Resource(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Value::Resource(_))
    }

    /// Turn a string literal that parses as an IRI into a resource reference
    ///
    /// Anything else, free text like `"42 kg"` included, stays a literal.
    pub(crate) fn into_reference(self) -> Self {
        match self {
            Value::Literal(Literal::String(s)) if NamedNodeRef::new(&s).is_ok() => Value::Resource(s),
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(lit) => write!(f, "{}", lit),
            Value::Resource(iri) => write!(f, "<{}>", iri),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(Literal::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(Literal::String(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Literal(Literal::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Literal(Literal::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Literal(Literal::Float(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Literal(Literal::Boolean(b))
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Value::Literal(lit)
    }
}

impl From<&super::Instance> for Value {
    fn from(instance: &super::Instance) -> Self {
        Value::Resource(instance.uri().to_string())
    }
}

impl From<&std::sync::Arc<super::Instance>> for Value {
    fn from(instance: &std::sync::Arc<super::Instance>) -> Self {
        Value::Resource(instance.uri().to_string())
    }
}
