//! Supertype traversal shared by the class and property hierarchies
//!
//! Both hierarchies are DAGs keyed by declaration name. A walk tracks the
//! names on the current path; meeting one of them again is a cycle.
//! Nodes that were fully explored are skipped, so a diamond is visited once.

use std::collections::HashSet;

use crate::errors::{AlchemyError, DeclarationKind, Result};

/// Every name reachable from `start` through `parents`, `start` first,
/// each name once, in depth-first preorder
pub(crate) fn lineage<F>(kind: DeclarationKind, start: &str, parents: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    let mut walk = Walk {
        kind,
        parents,
        path: Vec::new(),
        finished: HashSet::new(),
        order: Vec::new(),
    };
    walk.visit(start)?;
    Ok(walk.order)
}

struct Walk<F> {
    kind: DeclarationKind,
    parents: F,
    path: Vec<String>,
    finished: HashSet<String>,
    order: Vec<String>,
}

impl<F> Walk<F>
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn visit(&mut self, name: &str) -> Result<()> {
        if self.finished.contains(name) {
            return Ok(());
        }

        if let Some(pos) = self.path.iter().position(|n| n == name) {
            let mut cycle = self.path[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(AlchemyError::CyclicHierarchy {
                kind: self.kind,
                path: cycle,
            });
        }

        self.path.push(name.to_string());
        self.order.push(name.to_string());

        for parent in (self.parents)(name)? {
            self.visit(&parent)?;
        }

        self.path.pop();
        self.finished.insert(name.to_string());
        Ok(())
    }
}
