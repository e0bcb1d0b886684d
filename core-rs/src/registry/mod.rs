//! Declaration registry
//!
//! - declaration: immutable class/property declarations and their specs
//! - inference: supertype traversal with cycle detection
//!
//! A `Registry` owns every declaration made through it and answers the
//! questions instance construction needs: which properties apply to a class,
//! what a property's full domain and range are, and which classes a class
//! inherits from. Every declaration is also registered with the current
//! session.

mod declaration;
mod inference;

pub use declaration::{ClassDeclaration, ClassSpec, PropertyDeclaration, PropertySpec};

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::errors::{AlchemyError, DeclarationKind, Result};
use crate::model::{Instance, InstanceBuilder, PropertyKind, Value};
use crate::session::current_session;
use crate::vocabulary::{Vocabulary, IMPOSE_URI_KEY, UNIVERSAL_PROPERTIES};

/// Declarations in the order they were made, indexed by name
#[derive(Debug)]
struct Declarations<T> {
    items: Vec<Arc<T>>,
    by_name: HashMap<String, usize>,
}

impl<T> Default for Declarations<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T> Declarations<T> {
    fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.by_name.get(name).map(|&i| &self.items[i])
    }

    fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn insert(&mut self, name: String, item: Arc<T>) {
        self.by_name.insert(name, self.items.len());
        self.items.push(item);
    }
}

/// Registry of declared classes and properties
#[derive(Debug)]
pub struct Registry {
    config: ModelConfig,
    classes: Declarations<ClassDeclaration>,
    properties: Declarations<PropertyDeclaration>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the default configuration (W3C vocabulary)
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Registry using `config`; the universal properties are declared up front
    pub fn with_config(config: ModelConfig) -> Self {
        let mut properties = Declarations::default();
        for universal in UNIVERSAL_PROPERTIES.iter() {
            let spec = PropertySpec::new(universal.name, config.vocabulary.identifier_of(universal))
                .kind(universal.kind);
            properties.insert(universal.name.to_string(), Arc::new(spec.into_declaration()));
        }

        Self {
            config,
            classes: Declarations::default(),
            properties,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.config.vocabulary
    }

    /// Declare a class
    ///
    /// # Arguments
    ///
    /// * `name` - Registry-unique class name
    /// * `identifier` - Stable class URI
    /// * `supertypes` - Names of direct supertypes (may be declared later)
    pub fn declare_class(
        &mut self,
        name: &str,
        identifier: &str,
        supertypes: &[&str],
    ) -> Result<Arc<ClassDeclaration>> {
        self.declare_class_spec(ClassSpec::new(name, identifier).supertypes(supertypes.iter().copied()))
    }

    /// Declare a class from a full spec
    pub fn declare_class_spec(&mut self, spec: ClassSpec) -> Result<Arc<ClassDeclaration>> {
        check_identity(&spec.name, &spec.identifier)?;
        if self.classes.contains(&spec.name) {
            return Err(AlchemyError::DuplicateDeclaration {
                kind: DeclarationKind::Class,
                name: spec.name,
            });
        }

        let declaration = Arc::new(spec.into_declaration());
        self.classes
            .insert(declaration.name().to_string(), Arc::clone(&declaration));
        current_session().register_class(Arc::clone(&declaration));

        debug!(
            class = declaration.name(),
            identifier = declaration.identifier(),
            supertypes = ?declaration.supertypes(),
            "declared class"
        );
        Ok(declaration)
    }

    /// Declare a property, inferring its kind from `range`
    ///
    /// The property is relation-valued when its range is non-empty and names
    /// no datatype; otherwise it is literal-valued.
    pub fn declare_property(
        &mut self,
        name: &str,
        identifier: &str,
        domain: &[&str],
        range: &[&str],
        supertypes: &[&str],
    ) -> Result<Arc<PropertyDeclaration>> {
        self.declare(
            PropertySpec::new(name, identifier)
                .domain(domain.iter().copied())
                .range(range.iter().copied())
                .supertypes(supertypes.iter().copied()),
        )
    }

    /// Declare a property from a full spec
    pub fn declare(&mut self, mut spec: PropertySpec) -> Result<Arc<PropertyDeclaration>> {
        check_identity(&spec.name, &spec.identifier)?;
        if spec.name == IMPOSE_URI_KEY {
            return Err(AlchemyError::InvalidIdentifier(format!(
                "'{}' is reserved for identifier overrides",
                IMPOSE_URI_KEY
            )));
        }
        if self.properties.contains(&spec.name) {
            return Err(AlchemyError::DuplicateDeclaration {
                kind: DeclarationKind::Property,
                name: spec.name,
            });
        }

        if spec.kind.is_none() {
            spec.kind = Some(self.infer_kind(&spec.range));
        }

        let declaration = Arc::new(spec.into_declaration());
        self.properties
            .insert(declaration.name().to_string(), Arc::clone(&declaration));
        current_session().register_property(Arc::clone(&declaration));

        debug!(
            property = declaration.name(),
            identifier = declaration.identifier(),
            kind = ?declaration.kind(),
            "declared property"
        );
        Ok(declaration)
    }

    fn infer_kind(&self, range: &BTreeSet<String>) -> PropertyKind {
        let vocabulary = self.vocabulary();
        if !range.is_empty() && !range.iter().any(|r| vocabulary.is_datatype(r)) {
            PropertyKind::Relation
        } else {
            PropertyKind::Literal
        }
    }

    pub fn class(&self, name: &str) -> Option<&Arc<ClassDeclaration>> {
        self.classes.get(name)
    }

    /// Look a class up by its URI instead of its name
    pub fn class_by_identifier(&self, identifier: &str) -> Option<&Arc<ClassDeclaration>> {
        self.classes.items.iter().find(|c| c.identifier() == identifier)
    }

    pub fn property(&self, name: &str) -> Option<&Arc<PropertyDeclaration>> {
        self.properties.get(name)
    }

    /// All classes in declaration order
    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDeclaration>> {
        self.classes.items.iter()
    }

    /// All properties in declaration order, universal properties first
    pub fn properties(&self) -> impl Iterator<Item = &Arc<PropertyDeclaration>> {
        self.properties.items.iter()
    }

    fn require_class(&self, name: &str) -> Result<&Arc<ClassDeclaration>> {
        self.class(name).ok_or_else(|| AlchemyError::UnknownDeclaration {
            kind: DeclarationKind::Class,
            name: name.to_string(),
        })
    }

    fn require_property(&self, name: &str) -> Result<&Arc<PropertyDeclaration>> {
        self.property(name).ok_or_else(|| AlchemyError::UnknownDeclaration {
            kind: DeclarationKind::Property,
            name: name.to_string(),
        })
    }

    /// `name` followed by every transitive property supertype
    fn property_lineage(&self, name: &str) -> Result<Vec<Arc<PropertyDeclaration>>> {
        let names = inference::lineage(DeclarationKind::Property, name, |n| {
            Ok(self.require_property(n)?.supertypes().to_vec())
        })?;
        names
            .iter()
            .map(|n| self.require_property(n).map(Arc::clone))
            .collect()
    }

    /// `name` followed by every transitive class supertype
    fn class_lineage(&self, name: &str) -> Result<Vec<Arc<ClassDeclaration>>> {
        let names = inference::lineage(DeclarationKind::Class, name, |n| {
            Ok(self.require_class(n)?.supertypes().to_vec())
        })?;
        names
            .iter()
            .map(|n| self.require_class(n).map(Arc::clone))
            .collect()
    }

    /// Union of the property's domain with the domains of everything it refines
    ///
    /// # Errors
    ///
    /// `CyclicHierarchy` if the property supertypes loop back on themselves,
    /// `UnknownDeclaration` if a supertype was never declared.
    pub fn inferred_domain(&self, property: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .property_lineage(property)?
            .iter()
            .flat_map(|p| p.domain().iter().cloned())
            .collect())
    }

    /// Union of the property's range with the ranges of everything it refines
    ///
    /// # Errors
    ///
    /// Same as [`Registry::inferred_domain`].
    pub fn inferred_range(&self, property: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .property_lineage(property)?
            .iter()
            .flat_map(|p| p.range().iter().cloned())
            .collect())
    }

    /// Every transitive supertype of a class, each once, nearest first
    pub fn ancestors(&self, class: &str) -> Result<Vec<Arc<ClassDeclaration>>> {
        let mut lineage = self.class_lineage(class)?;
        lineage.remove(0);
        Ok(lineage)
    }

    /// Properties whose inferred domain names this class
    pub fn own_properties(&self, class: &str) -> Result<Vec<Arc<PropertyDeclaration>>> {
        let identifier: BTreeSet<String> =
            std::iter::once(self.require_class(class)?.identifier().to_string()).collect();
        let mut own = Vec::new();
        for property in self.properties() {
            if self.applies_to(property, &identifier, false)? {
                own.push(Arc::clone(property));
            }
        }
        Ok(own)
    }

    /// Properties that apply to instances of a class
    ///
    /// The union of the own properties of the class and of all its ancestors,
    /// plus every property with an unrestricted (empty) inferred domain. Each
    /// property appears once, in declaration order.
    pub fn effective_properties(&self, class: &str) -> Result<Vec<Arc<PropertyDeclaration>>> {
        let lineage: BTreeSet<String> = self
            .class_lineage(class)?
            .iter()
            .map(|c| c.identifier().to_string())
            .collect();

        let mut effective = Vec::new();
        for property in self.properties() {
            if self.applies_to(property, &lineage, true)? {
                effective.push(Arc::clone(property));
            }
        }
        Ok(effective)
    }

    /// Whether `property` applies to a class whose lineage is `classes`
    ///
    /// A property whose own hierarchy cannot be resolved is skipped (with a
    /// warning) unless its declared domain already names one of `classes`;
    /// then the hierarchy error is returned, naming the real offender.
    fn applies_to(
        &self,
        property: &PropertyDeclaration,
        classes: &BTreeSet<String>,
        unrestricted: bool,
    ) -> Result<bool> {
        match self.inferred_domain(property.name()) {
            Ok(domain) => Ok((unrestricted && domain.is_empty()) || !domain.is_disjoint(classes)),
            Err(err) if property.domain().is_disjoint(classes) => {
                warn!(
                    property = property.name(),
                    error = %err,
                    "skipping property with unresolvable hierarchy"
                );
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Start building an instance of `class`
    pub fn instance(&self, class: &str) -> InstanceBuilder<'_> {
        InstanceBuilder::new(self, class)
    }

    /// Build an instance from configuration-style `(property, value)` pairs
    ///
    /// The reserved key `imposeURI` sets the identifier verbatim.
    pub fn instantiate<I, K, V>(&self, class: &str, assignments: I) -> Result<Arc<Instance>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        assignments
            .into_iter()
            .fold(self.instance(class), |builder, (k, v)| builder.set(k, v))
            .build()
    }
}

fn check_identity(name: &str, identifier: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AlchemyError::InvalidIdentifier(
            "declaration name cannot be empty".to_string(),
        ));
    }
    if identifier.trim().is_empty() {
        return Err(AlchemyError::InvalidIdentifier(format!(
            "identifier of '{}' cannot be empty",
            name
        )));
    }
    Ok(())
}
