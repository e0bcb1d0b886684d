//! Namespaces and the universal RDFS properties
//!
//! Namespace IRIs are opaque to the modeling layer: callers hand them in
//! through [`Vocabulary`]. The W3C values are only a default.

use serde::{Deserialize, Serialize};

use crate::model::PropertyKind;

/// Reserved construction key that overrides URI generation
pub const IMPOSE_URI_KEY: &str = "imposeURI";

/// Name of the property that carries class membership
pub const TYPE: &str = "type";

/// Name of the human-readable label property (also seeds URI generation)
pub const LABEL: &str = "label";

/// A namespace prefix that terms are appended to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Full identifier of `local` inside this namespace
    pub fn term(&self, local: &str) -> String {
        format!("{}{}", self.0, local)
    }

    /// Whether `identifier` lives inside this namespace
    pub fn contains(&self, identifier: &str) -> bool {
        !self.0.is_empty() && identifier.starts_with(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The namespaces the modeling layer needs to name its built-in terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub rdf: Namespace,
    pub rdfs: Namespace,
    pub xsd: Namespace,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::w3c()
    }
}

/// One of the properties every instance carries regardless of its class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalProperty {
    pub name: &'static str,
    pub kind: PropertyKind,
    in_rdf: bool,
}

/// rdfs:label, rdfs:comment, rdfs:seeAlso, rdfs:isDefinedBy, rdf:value, rdf:type
pub const UNIVERSAL_PROPERTIES: [UniversalProperty; 6] = [
    UniversalProperty { name: LABEL, kind: PropertyKind::Literal, in_rdf: false },
    UniversalProperty { name: "comment", kind: PropertyKind::Literal, in_rdf: false },
    UniversalProperty { name: "seeAlso", kind: PropertyKind::Relation, in_rdf: false },
    UniversalProperty { name: "isDefinedBy", kind: PropertyKind::Relation, in_rdf: false },
    UniversalProperty { name: "value", kind: PropertyKind::Literal, in_rdf: true },
    UniversalProperty { name: TYPE, kind: PropertyKind::Relation, in_rdf: true },
];

impl Vocabulary {
    /// The standard W3C RDF, RDFS and XSD namespaces
    pub fn w3c() -> Self {
        Self {
            rdf: Namespace::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
            rdfs: Namespace::new("http://www.w3.org/2000/01/rdf-schema#"),
            xsd: Namespace::new("http://www.w3.org/2001/XMLSchema#"),
        }
    }

    /// Identifier of a universal property under this vocabulary
    pub fn identifier_of(&self, property: &UniversalProperty) -> String {
        if property.in_rdf {
            self.rdf.term(property.name)
        } else {
            self.rdfs.term(property.name)
        }
    }

    /// Whether a range entry names a literal datatype rather than a class
    pub fn is_datatype(&self, identifier: &str) -> bool {
        identifier == self.rdfs.term("Literal") || self.xsd.contains(identifier)
    }

    pub fn is_universal(name: &str) -> bool {
        UNIVERSAL_PROPERTIES.iter().any(|p| p.name == name)
    }
}
