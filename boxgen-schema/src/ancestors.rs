//! Transitive ancestor resolution over the class graph.

use crate::error::SchemaError;
use crate::types::Registry;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Resolves ancestor sets over the parent graph of a registry.
///
/// The hierarchy root is never part of a resolved set. Results are memoized,
/// and a cycle anywhere on the walked paths is reported instead of recursing
/// forever.
pub struct AncestorResolver<'a> {
    parents: HashMap<&'a str, &'a [String]>,
    root: &'a str,
    cache: HashMap<String, BTreeSet<String>>,
    orders: HashMap<String, Vec<String>>,
}

impl<'a> AncestorResolver<'a> {
    /// Creates a resolver over the registry's classes.
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        let parents = registry
            .classes()
            .iter()
            .map(|c| (c.name.as_str(), c.parents.as_slice()))
            .collect();
        Self {
            parents,
            root: registry.root.as_str(),
            cache: HashMap::new(),
            orders: HashMap::new(),
        }
    }

    /// Returns every class reachable through `parents` edges, root excluded.
    ///
    /// # Errors
    /// Returns `SchemaError::ClassNotFound` for an unknown class,
    /// `SchemaError::DanglingParent` for a parent missing from the registry and
    /// `SchemaError::CircularHierarchy` when the walk loops.
    pub fn ancestors(&mut self, name: &str) -> Result<BTreeSet<String>, SchemaError> {
        if !self.parents.contains_key(name) {
            return Err(SchemaError::ClassNotFound {
                name: name.to_string(),
            });
        }
        let mut stack = Vec::new();
        self.resolve(name, &mut stack)
    }

    fn resolve(
        &mut self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<BTreeSet<String>, SchemaError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }
        if let Some(pos) = stack.iter().position(|n| n == name) {
            let mut path: Vec<&str> = stack[pos..].iter().map(String::as_str).collect();
            path.push(name);
            return Err(SchemaError::CircularHierarchy {
                path: path.join(" -> "),
            });
        }

        let parents: &'a [String] = match self.parents.get(name) {
            Some(parents) => *parents,
            None => {
                return Err(SchemaError::ClassNotFound {
                    name: name.to_string(),
                });
            }
        };

        stack.push(name.to_string());
        let mut out = BTreeSet::new();
        for parent in parents {
            if !self.parents.contains_key(parent.as_str()) {
                return Err(SchemaError::dangling(name, parent.as_str()));
            }
            if parent == self.root {
                continue;
            }
            out.insert(parent.clone());
            out.extend(self.resolve(parent, stack)?);
        }
        stack.pop();

        self.cache.insert(name.to_string(), out.clone());
        Ok(out)
    }

    /// Returns the class followed by its ancestors in lookup order.
    ///
    /// The order is the C3 linearization of the parent graph. Every class
    /// comes before its parents and parents keep their declared order.
    /// Inherited declarations such as constructors resolve to the first
    /// class in this order that declares them.
    ///
    /// # Errors
    /// Same as [`AncestorResolver::ancestors`], plus
    /// `SchemaError::InconsistentLookupOrder` when the parent lists admit no
    /// linearization.
    pub fn lookup_order(&mut self, name: &str) -> Result<Vec<String>, SchemaError> {
        // Validates the graph under `name` before walking it.
        self.ancestors(name)?;
        self.linearize(name)
    }

    fn linearize(&mut self, name: &str) -> Result<Vec<String>, SchemaError> {
        if let Some(cached) = self.orders.get(name) {
            return Ok(cached.clone());
        }

        let parents: &'a [String] = self.parents.get(name).copied().unwrap_or_default();
        let mut sequences: Vec<VecDeque<String>> = Vec::with_capacity(parents.len() + 1);
        for parent in parents {
            sequences.push(self.linearize(parent)?.into());
        }
        sequences.push(parents.iter().cloned().collect());

        let mut order = vec![name.to_string()];
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                break;
            }
            // A head is eligible when it is in no other sequence's tail.
            let head = sequences
                .iter()
                .map(|seq| &seq[0])
                .find(|candidate| {
                    !sequences
                        .iter()
                        .any(|seq| seq.iter().skip(1).any(|c| c == *candidate))
                })
                .cloned()
                .ok_or_else(|| SchemaError::InconsistentLookupOrder {
                    class: name.to_string(),
                })?;
            for seq in &mut sequences {
                if seq.front() == Some(&head) {
                    seq.pop_front();
                }
            }
            order.push(head);
        }

        self.orders.insert(name.to_string(), order.clone());
        Ok(order)
    }
}
