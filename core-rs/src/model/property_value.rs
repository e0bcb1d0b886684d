//! Append-only value container for one property on one entity

use std::sync::Arc;

use super::{PropertyKind, Value};
use crate::errors::{AlchemyError, Result};
use crate::registry::PropertyDeclaration;

/// All values assigned to one property of one instance, in assignment order
///
/// Appending never replaces earlier values and never deduplicates.
#[derive(Debug, Clone)]
pub struct PropertyValue {
    declaration: Arc<PropertyDeclaration>,
    values: Vec<Value>,
}

impl PropertyValue {
    pub fn new(declaration: Arc<PropertyDeclaration>) -> Self {
        Self {
            declaration,
            values: Vec::new(),
        }
    }

    /// Add a value after the existing ones
    ///
    /// Relation-valued containers store IRI-shaped strings as resource references.
    pub fn append(&mut self, value: impl Into<Value>) {
        let value = value.into();
        let value = match self.declaration.kind() {
            PropertyKind::Relation => value.into_reference(),
            PropertyKind::Literal => value,
        };
        self.values.push(value);
    }

    /// Every value in assignment order; calling again starts over
    pub fn values(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// The only value, if any
    ///
    /// # Errors
    ///
    /// `MultiValue` when more than one value has been appended.
    pub fn single(&self) -> Result<Option<&Value>> {
        match self.values.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(only)),
            many => Err(AlchemyError::MultiValue {
                property: self.declaration.name().to_string(),
                count: many.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn declaration(&self) -> &Arc<PropertyDeclaration> {
        &self.declaration
    }

    /// Predicate identifier used when this container is exported
    pub fn predicate(&self) -> &str {
        self.declaration.identifier()
    }

    pub fn kind(&self) -> PropertyKind {
        self.declaration.kind()
    }
}

impl<'a> IntoIterator for &'a PropertyValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
