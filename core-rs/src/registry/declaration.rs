//! Class and property declarations
//!
//! Declarations are immutable once the registry hands them out. Supertypes
//! are held by name so the registry can resolve them (and detect cycles)
//! when it walks a hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::model::PropertyKind;

/// A declared ontology class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    name: String,
    identifier: String,
    supertypes: Vec<String>,
    label: Option<String>,
    comment: Option<String>,
}

impl ClassDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable identifier (URI) of the class
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Names of the direct supertypes, in declaration order
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl fmt::Display for ClassDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Class {} ({})>", self.name, self.identifier)
    }
}

/// A declared ontology property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    name: String,
    identifier: String,
    domain: BTreeSet<String>,
    range: BTreeSet<String>,
    kind: PropertyKind,
    supertypes: Vec<String>,
    label: Option<String>,
    comment: Option<String>,
}

impl PropertyDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable identifier (URI); used as the predicate of exported triples
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Declared domain only; see `Registry::inferred_domain` for the full set
    pub fn domain(&self) -> &BTreeSet<String> {
        &self.domain
    }

    /// Declared range only; see `Registry::inferred_range` for the full set
    pub fn range(&self) -> &BTreeSet<String> {
        &self.range
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_literal(&self) -> bool {
        self.kind == PropertyKind::Literal
    }

    /// Names of the properties this one refines
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl fmt::Display for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        write!(
            f,
            "<Property {} label={}, domain=[{}], range=[{}]>",
            self.name,
            self.label.as_deref().unwrap_or("None"),
            join(&self.domain),
            join(&self.range),
        )
    }
}

/// Everything needed to declare a class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSpec {
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub(crate) fn into_declaration(self) -> ClassDeclaration {
        ClassDeclaration {
            name: self.name,
            identifier: self.identifier,
            supertypes: self.supertypes,
            label: self.label,
            comment: self.comment,
        }
    }
}

/// Everything needed to declare a property
///
/// When `kind` is left unset the registry infers it from the range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub domain: BTreeSet<String>,
    #[serde(default)]
    pub range: BTreeSet<String>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn domain<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn range<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.range = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn supertypes<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn kind(mut self, kind: PropertyKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Freeze into a declaration; an unset kind becomes `Literal`
    pub(crate) fn into_declaration(self) -> PropertyDeclaration {
        PropertyDeclaration {
            name: self.name,
            identifier: self.identifier,
            domain: self.domain,
            range: self.range,
            kind: self.kind.unwrap_or(PropertyKind::Literal),
            supertypes: self.supertypes,
            label: self.label,
            comment: self.comment,
        }
    }
}
