//! YAML schema documents
//!
//! A schema document bundles a configuration, class and property
//! declarations, and optionally some individuals, so a whole model can be
//! described in one file:
//!
//! ```yaml
//! config:
//!   baseUri: http://example.org/individuals/
//! classes:
//!   - name: Animal
//!     identifier: http://example.org/Animal
//!   - name: Dog
//!     identifier: http://example.org/Dog
//!     supertypes: [Animal]
//! properties:
//!   - name: name
//!     identifier: http://example.org/name
//!     domain: [http://example.org/Animal]
//!     range: [http://www.w3.org/2001/XMLSchema#string]
//! individuals:
//!   - class: Dog
//!     properties:
//!       label: Rex
//!       name: [Rex, Rexy]
//! ```
//!
//! Declarations are applied in document order, classes before properties.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::ModelConfig;
use crate::errors::{AlchemyError, Result};
use crate::model::{Instance, Value};
use crate::registry::{ClassSpec, PropertySpec, Registry};

/// A property assignment: one value or a list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(Value),
    Many(Vec<Value>),
}

impl OneOrMany {
    pub fn into_values(self) -> Vec<Value> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// An individual to construct once the declarations are in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualSpec {
    /// Class name, as declared in the same document
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Assignments in document order
    #[serde(default, with = "ordered_assignments")]
    pub properties: Vec<(String, OneOrMany)>,
}

impl IndividualSpec {
    /// The assignment for `property`, if the document has one
    pub fn assignment(&self, property: &str) -> Option<&OneOrMany> {
        self.properties
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, assignment)| assignment)
    }
}

/// A YAML mapping read and written as an ordered list of pairs
mod ordered_assignments {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_yaml::Mapping;

    use super::OneOrMany;

    pub fn serialize<S>(pairs: &[(String, OneOrMany)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(pairs.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, OneOrMany)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Mapping::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                let key = key
                    .as_str()
                    .ok_or_else(|| D::Error::custom("property names must be strings"))?
                    .to_string();
                let value = serde_yaml::from_value(value).map_err(D::Error::custom)?;
                Ok((key, value))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaDocument {
    pub config: ModelConfig,
    pub classes: Vec<ClassSpec>,
    pub properties: Vec<PropertySpec>,
    pub individuals: Vec<IndividualSpec>,
}

/// Result of applying a schema document
#[derive(Debug)]
pub struct Model {
    pub registry: Registry,
    pub individuals: Vec<Arc<Instance>>,
}

impl SchemaDocument {
    /// Load a schema document from a YAML file
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

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: SchemaDocument = serde_yaml::from_str(content)
            .map_err(|e| AlchemyError::ParseError(format!("Invalid schema document: {}", e)))?;

        document.config.validate()?;

        Ok(document)
    }

    /// Declare every class and property into a fresh registry
    ///
    /// Hierarchies are checked once everything is declared, so supertypes may
    /// be named before they appear in the document.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = Registry::with_config(self.config.clone());

        for class in &self.classes {
            registry.declare_class_spec(class.clone())?;
        }
        for property in &self.properties {
            registry.declare(property.clone())?;
        }

        for class in &self.classes {
            registry.ancestors(&class.name)?;
        }
        for property in &self.properties {
            registry.inferred_domain(&property.name)?;
        }

        Ok(registry)
    }

    /// Construct the document's individuals against `registry`
    pub fn instantiate(&self, registry: &Registry) -> Result<Vec<Arc<Instance>>> {
        self.individuals
            .iter()
            .map(|individual| {
                let mut builder = registry.instance(&individual.class);
                if let Some(uri) = &individual.uri {
                    builder = builder.impose_uri(uri.as_str());
                }
                for (property, assignment) in &individual.properties {
                    for value in assignment.clone().into_values() {
                        builder = builder.set(property.as_str(), value);
                    }
                }
                builder.build()
            })
            .collect()
    }

    /// Build the registry and construct every individual
    pub fn apply(&self) -> Result<Model> {
        let registry = self.build_registry()?;
        let individuals = self.instantiate(&registry)?;

        info!(
            classes = self.classes.len(),
            properties = self.properties.len(),
            individuals = individuals.len(),
            "applied schema document"
        );

        Ok(Model {
            registry,
            individuals,
        })
    }
}
