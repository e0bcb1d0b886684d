//! Individuals of declared classes
//!
//! Construction runs in a fixed order: resolve the effective property set,
//! open an empty container per property, fix the identifier, apply the
//! assignments, assert the type, register with the current session. From
//! then on the identifier is frozen while properties stay open for more
//! values.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use super::{PropertyValue, Value};
use crate::config::TypeAssertion;
use crate::errors::{AlchemyError, Result};
use crate::registry::{ClassDeclaration, Registry};
use crate::session::current_session;
use crate::uri;
use crate::vocabulary::{IMPOSE_URI_KEY, LABEL, TYPE};

pub(crate) type PropertyTable = BTreeMap<String, PropertyValue>;

/// A live individual of a declared class
#[derive(Debug)]
pub struct Instance {
    uri: String,
    class: Arc<ClassDeclaration>,
    created_at: DateTime<Utc>,
    properties: RwLock<PropertyTable>,
}

impl Instance {
    /// Identifier assigned at construction
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn class(&self) -> &Arc<ClassDeclaration> {
        &self.class
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, PropertyTable> {
        self.properties.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PropertyTable> {
        self.properties.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn unknown(&self, property: &str) -> AlchemyError {
        AlchemyError::UnknownProperty {
            class: self.class.identifier().to_string(),
            property: property.to_string(),
        }
    }

    /// Add another value to a property
    ///
    /// # Errors
    ///
    /// `UnknownProperty` if the property does not apply to this instance.
    pub fn append(&self, property: &str, value: impl Into<Value>) -> Result<()> {
        let mut table = self.write();
        let container = table.get_mut(property).ok_or_else(|| self.unknown(property))?;
        container.append(value);
        Ok(())
    }

    /// Run `f` against the container of one property
    pub fn with_property<R>(&self, property: &str, f: impl FnOnce(&PropertyValue) -> R) -> Result<R> {
        let table = self.read();
        let container = table.get(property).ok_or_else(|| self.unknown(property))?;
        Ok(f(container))
    }

    /// Snapshot of every value of one property, in assignment order
    pub fn values(&self, property: &str) -> Result<Vec<Value>> {
        self.with_property(property, |pv| pv.values().cloned().collect())
    }

    /// The only value of a property, if any
    ///
    /// # Errors
    ///
    /// `MultiValue` when the property holds more than one value.
    pub fn single(&self, property: &str) -> Result<Option<Value>> {
        self.with_property(property, |pv| pv.single().map(|v| v.cloned()))?
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.read().contains_key(property)
    }

    /// Names of every property this instance carries, sorted
    pub fn property_names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Class identifiers asserted through `type`
    pub fn types(&self) -> Vec<String> {
        self.read()
            .get(TYPE)
            .map(|pv| {
                pv.values()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Builder for [`Instance`], obtained from [`Registry::instance`]
#[derive(Debug)]
pub struct InstanceBuilder<'r> {
    registry: &'r Registry,
    class: String,
    assignments: Vec<(String, Value)>,
    impose_uri: Option<String>,
}

impl<'r> InstanceBuilder<'r> {
    pub(crate) fn new(registry: &'r Registry, class: &str) -> Self {
        Self {
            registry,
            class: class.to_string(),
            assignments: Vec::new(),
            impose_uri: None,
        }
    }

    /// Queue a `(property, value)` assignment; `imposeURI` overrides the identifier
    pub fn set(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push((property.into(), value.into()));
        self
    }

    /// Use `uri` verbatim instead of generating one; beats an `imposeURI` assignment
    pub fn impose_uri(mut self, uri: impl Into<String>) -> Self {
        self.impose_uri = Some(uri.into());
        self
    }

    /// Construct the instance and register it with the current session
    ///
    /// # Errors
    ///
    /// - `UnknownDeclaration` if the class was never declared
    /// - `CyclicHierarchy` if its class or property hierarchy loops
    /// - `UnknownProperty` for an assignment to a property that does not apply
    /// - `InvalidIdentifier` for an empty or non-string identifier override
    pub fn build(self) -> Result<Arc<Instance>> {
        let registry = self.registry;
        let class = registry
            .class(&self.class)
            .cloned()
            .ok_or_else(|| AlchemyError::UnknownDeclaration {
                kind: crate::errors::DeclarationKind::Class,
                name: self.class.clone(),
            })?;

        let mut table = PropertyTable::new();
        for declaration in registry.effective_properties(&self.class)? {
            table
                .entry(declaration.name().to_string())
                .or_insert_with(|| PropertyValue::new(declaration));
        }

        let mut override_uri = self.impose_uri;
        let mut assignments = Vec::with_capacity(self.assignments.len());
        for (property, value) in self.assignments {
            if property == IMPOSE_URI_KEY {
                let imposed = value.as_str().map(str::to_string).ok_or_else(|| {
                    AlchemyError::InvalidIdentifier(format!(
                        "{} must be a string, got {}",
                        IMPOSE_URI_KEY, value
                    ))
                })?;
                override_uri.get_or_insert(imposed);
            } else {
                assignments.push((property, value));
            }
        }

        let uri = match override_uri {
            Some(imposed) if imposed.trim().is_empty() => {
                return Err(AlchemyError::InvalidIdentifier(
                    "imposed identifier cannot be empty".to_string(),
                ));
            }
            Some(imposed) => imposed,
            None => {
                let seed = assignments
                    .iter()
                    .find(|(p, _)| p == LABEL)
                    .and_then(|(_, v)| v.as_str())
                    .unwrap_or_default();
                if seed.is_empty() {
                    warn!(class = class.name(), "no label supplied, identifier carries no label segment");
                }
                uri::generate(&registry.config().base_uri, class.identifier(), seed)
            }
        };

        for (property, value) in assignments {
            let Some(container) = table.get_mut(&property) else {
                // A declared property left out for a broken hierarchy reports that instead
                if registry.property(&property).is_some() {
                    registry.inferred_domain(&property)?;
                }
                return Err(AlchemyError::UnknownProperty {
                    class: class.identifier().to_string(),
                    property,
                });
            };
            container.append(value);
        }

        let mut types = vec![class.identifier().to_string()];
        if registry.config().type_assertion == TypeAssertion::Hierarchy {
            types.extend(
                registry
                    .ancestors(class.name())?
                    .iter()
                    .map(|c| c.identifier().to_string()),
            );
        }
        if let Some(type_container) = table.get_mut(TYPE) {
            for identifier in types {
                type_container.append(Value::resource(identifier));
            }
        }

        let instance = Arc::new(Instance {
            uri,
            class,
            created_at: Utc::now(),
            properties: RwLock::new(table),
        });
        current_session().register_instance(Arc::clone(&instance));

        debug!(
            uri = instance.uri(),
            class = instance.class().name(),
            "constructed instance"
        );
        Ok(instance)
    }
}
