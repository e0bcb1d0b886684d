//! Error types for Alchemy Core

use std::fmt;
use thiserror::Error;

/// Which of the two declaration graphs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Property,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Class => f.write_str("class"),
            DeclarationKind::Property => f.write_str("property"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AlchemyError {
    #[error("Duplicate {kind} declaration: {name}")]
    DuplicateDeclaration { kind: DeclarationKind, name: String },

    #[error("Unknown property '{property}' for class {class}")]
    UnknownProperty { class: String, property: String },

    #[error("Cyclic {kind} hierarchy: {}", .path.join(" -> "))]
    CyclicHierarchy { kind: DeclarationKind, path: Vec<String> },

    #[error("Property '{property}' holds {count} values, expected at most one")]
    MultiValue { property: String, count: usize },

    #[error("Unknown {kind} declaration: {name}")]
    UnknownDeclaration { kind: DeclarationKind, name: String },

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RDF conversion error: {0}")]
    Rdf(String),
}

impl From<oxigraph::model::IriParseError> for AlchemyError {
    fn from(err: oxigraph::model::IriParseError) -> Self {
        AlchemyError::Rdf(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlchemyError>;
