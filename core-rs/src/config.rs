//! Modeling configuration
//!
//! Loaded from YAML. Every field is optional:
//!
//! ```yaml
//! baseUri: https://data.example.org/individuals/
//! typeAssertion: hierarchy
//! vocabulary:
//!   rdf: http://www.w3.org/1999/02/22-rdf-syntax-ns#
//!   rdfs: http://www.w3.org/2000/01/rdf-schema#
//!   xsd: http://www.w3.org/2001/XMLSchema#
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{AlchemyError, Result};
use crate::vocabulary::Vocabulary;

/// Base URI for generated instance identifiers when none is configured
pub const DEFAULT_BASE_URI: &str = "https://ontology.local/individuals/";

/// Which classes an instance's type property names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeAssertion {
    /// Only the class the instance was constructed from
    #[default]
    Declared,
    /// The constructing class followed by all of its ancestors
    Hierarchy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    pub base_uri: String,
    pub type_assertion: TypeAssertion,
    pub vocabulary: Vocabulary,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            type_assertion: TypeAssertion::default(),
            vocabulary: Vocabulary::default(),
        }
    }
}

impl ModelConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `ParseError` for malformed
    /// YAML, `ValidationError` when a required value is empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AlchemyError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ModelConfig = serde_yaml::from_str(content)
            .map_err(|e| AlchemyError::ParseError(format!("Invalid model config YAML: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Ensure the base URI and every namespace are non-empty
    pub fn validate(&self) -> Result<()> {
        if self.base_uri.trim().is_empty() {
            return Err(AlchemyError::ValidationError(
                "baseUri cannot be empty".to_string(),
            ));
        }

        let namespaces = [
            ("rdf", &self.vocabulary.rdf),
            ("rdfs", &self.vocabulary.rdfs),
            ("xsd", &self.vocabulary.xsd),
        ];
        for (prefix, namespace) in namespaces {
            if namespace.as_str().trim().is_empty() {
                return Err(AlchemyError::ValidationError(format!(
                    "vocabulary.{} cannot be empty",
                    prefix
                )));
            }
        }

        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }
}
