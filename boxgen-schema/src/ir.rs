//! Class model for code generation.
//!
//! This module provides the normalized, resolved view of a registry that the
//! emitters consume: one [`ClassNode`] per declared class, in declaration
//! order, with ancestors, classification and builder decision precomputed.

use crate::ancestors::AncestorResolver;
use crate::error::SchemaError;
use crate::gate::{AnonymousGate, BuilderDecision};
use crate::types::{ClassKind, ConstructorShape, NamingConfig, Registry};
use crate::validation::validate_registry;
use std::collections::{BTreeSet, HashMap};

/// Resolved class model of a registry.
#[derive(Debug, Clone)]
pub struct ClassModel {
    /// Target package name.
    pub package: String,
    /// Hierarchy root class name.
    pub root: String,
    /// Generator name for the output header.
    pub generator: String,
    /// Import paths, sorted and deduplicated.
    pub imports: Vec<String>,
    /// Naming rules.
    pub naming: NamingConfig,
    /// Classes in declaration order.
    pub classes: Vec<ClassNode>,
    index: HashMap<String, usize>,
}

impl ClassModel {
    /// Validates a registry and extracts its class model.
    ///
    /// # Errors
    /// Returns `SchemaError` for any fatal registry defect: dangling parents,
    /// cycles, unknown policy names, tag collisions and the like.
    pub fn from_registry(registry: &Registry) -> Result<Self, SchemaError> {
        validate_registry(registry)?;

        let mut resolver = AncestorResolver::new(registry);
        let gate = AnonymousGate::new(&registry.naming);
        let mut classes = Vec::with_capacity(registry.classes().len());

        for class in registry.classes() {
            let is_root = class.name == registry.root;
            let kind = if is_root {
                ClassKind::Abstract
            } else {
                registry.policy.kind_of(class)
            };

            let constructor = effective_constructor(registry, &mut resolver, &class.name)?;
            let own_methods: BTreeSet<String> = class
                .methods
                .iter()
                .filter(|m| m.inherited_from.is_none())
                .map(|m| m.name.clone())
                .collect();
            let owns_builder = own_methods.contains(&registry.naming.builder_method);
            let anonymous = gate.decide(kind, constructor.as_ref(), owns_builder);

            tracing::debug!(
                "extracted class {} ({:?}, builder: {:?})",
                class.name,
                kind,
                anonymous
            );

            classes.push(ClassNode {
                name: class.name.clone(),
                parents: class.parents.clone(),
                doc_lines: class.doc.as_deref().map(normalize_doc).unwrap_or_default(),
                constructor,
                own_methods,
                kind,
                needs_hand_written: registry.policy.needs_extra_methods(class),
                is_root,
                ancestors: resolver.ancestors(&class.name)?,
                anonymous,
            });
        }

        let mut imports = registry.imports.clone();
        imports.sort();
        imports.dedup();

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        Ok(Self {
            package: registry.package.clone(),
            root: registry.root.clone(),
            generator: registry.generator.clone(),
            imports,
            naming: registry.naming.clone(),
            classes,
            index,
        })
    }

    /// Gets a class by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassNode> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Concrete classes, in declaration order.
    pub fn concrete(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter().filter(|c| c.is_concrete())
    }

    /// Concrete classes whose anonymous builder is generated.
    pub fn anonymous_builders(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter().filter(|c| c.can_auto_generate_anonymous())
    }

    /// Type tag of a class.
    #[must_use]
    pub fn tag_name(&self, class: &ClassNode) -> String {
        self.naming.tag_name(&class.name)
    }

    /// Interface name of a class.
    #[must_use]
    pub fn interface_name(&self, class: &str) -> String {
        self.naming.interface_name(class)
    }
}

/// One class of the resolved model.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Class name.
    pub name: String,
    /// Direct parents, in declaration order.
    pub parents: Vec<String>,
    /// Documentation, one entry per non-blank line.
    pub doc_lines: Vec<String>,
    /// Effective constructor (declared or inherited).
    pub constructor: Option<ConstructorShape>,
    /// Methods declared directly on this class.
    pub own_methods: BTreeSet<String>,
    /// Effective kind; the root is always abstract.
    pub kind: ClassKind,
    /// Whether the interface references a hand-written method group.
    pub needs_hand_written: bool,
    /// Whether this is the hierarchy root.
    pub is_root: bool,
    /// Transitive ancestors, root excluded, sorted.
    pub ancestors: BTreeSet<String>,
    /// Anonymous builder decision.
    pub anonymous: BuilderDecision,
}

impl ClassNode {
    /// Returns true if the class is abstract.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.kind == ClassKind::Abstract
    }

    /// Returns true if the class is concrete.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        self.kind == ClassKind::Concrete
    }

    /// Returns true if the class itself declares `method`.
    #[must_use]
    pub fn owns_method(&self, method: &str) -> bool {
        self.own_methods.contains(method)
    }

    /// Returns true if the anonymous builder is generated for this class.
    #[must_use]
    pub fn can_auto_generate_anonymous(&self) -> bool {
        self.anonymous.is_generated()
    }

    /// Direct parents sorted by name.
    #[must_use]
    pub fn sorted_parents(&self) -> Vec<&str> {
        let mut parents: Vec<&str> = self.parents.iter().map(String::as_str).collect();
        parents.sort_unstable();
        parents.dedup();
        parents
    }
}

/// Finds the constructor a class uses: its own, else the first one found in
/// lookup order.
fn effective_constructor(
    registry: &Registry,
    resolver: &mut AncestorResolver<'_>,
    name: &str,
) -> Result<Option<ConstructorShape>, SchemaError> {
    let order = resolver.lookup_order(name)?;
    Ok(order
        .iter()
        .filter_map(|n| registry.get_class(n))
        .find_map(|c| c.constructor.clone()))
}

/// Normalizes documentation text.
///
/// The first line is trimmed, following lines lose their common indentation,
/// trailing whitespace is dropped and blank lines are removed.
#[must_use]
pub fn normalize_doc(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    let first = lines.next().map(str::trim).unwrap_or_default();
    let rest: Vec<&str> = lines.collect();

    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    std::iter::once(first)
        .chain(
            rest.iter()
                .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()).trim_end()),
        )
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}
