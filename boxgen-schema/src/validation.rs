//! Registry validation utilities.
//!
//! This module checks a registry for every condition that makes generation
//! impossible. All failures are fatal: the model is never built from an
//! invalid registry.

use crate::ancestors::AncestorResolver;
use crate::error::SchemaError;
use crate::types::{ClassKind, Registry};
use std::collections::{HashMap, HashSet};

/// Validates a registry for correctness.
///
/// # Arguments
/// * `registry` - The registry to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_registry(registry: &Registry) -> Result<(), SchemaError> {
    validate_names(registry)?;
    validate_root(registry)?;
    validate_parents(registry)?;
    registry.policy.validate(registry)?;
    validate_hierarchy(registry)?;
    validate_builder_aliases(registry)?;
    validate_tags(registry)?;
    Ok(())
}

/// Rejects unnamed and duplicate descriptors.
fn validate_names(registry: &Registry) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for (index, class) in registry.classes().iter().enumerate() {
        if class.name.trim().is_empty() {
            return Err(SchemaError::MissingName { index });
        }
        if !seen.insert(class.name.as_str()) {
            return Err(SchemaError::DuplicateClass {
                name: class.name.clone(),
            });
        }
    }
    Ok(())
}

/// The root must be declared and parentless.
fn validate_root(registry: &Registry) -> Result<(), SchemaError> {
    let root = registry
        .get_class(&registry.root)
        .ok_or_else(|| SchemaError::MissingRoot {
            root: registry.root.clone(),
        })?;
    if !root.parents.is_empty() {
        return Err(SchemaError::RootHasParents {
            root: registry.root.clone(),
        });
    }
    Ok(())
}

/// Every parent reference must resolve.
fn validate_parents(registry: &Registry) -> Result<(), SchemaError> {
    for class in registry.classes() {
        if let Some(parent) = class.parents.iter().find(|p| !registry.has_class(p)) {
            return Err(SchemaError::dangling(class.name.as_str(), parent.as_str()));
        }
    }
    Ok(())
}

/// The parent graph must be acyclic and every class linearizable.
fn validate_hierarchy(registry: &Registry) -> Result<(), SchemaError> {
    let mut resolver = AncestorResolver::new(registry);
    for class in registry.classes() {
        resolver.lookup_order(&class.name)?;
    }
    Ok(())
}

/// The builder method may only be declared directly.
fn validate_builder_aliases(registry: &Registry) -> Result<(), SchemaError> {
    let builder = registry.naming.builder_method.as_str();
    for class in registry.classes() {
        let alias = class
            .methods
            .iter()
            .filter(|m| m.name == builder)
            .find_map(|m| m.inherited_from.as_ref());
        if let Some(from) = alias {
            return Err(SchemaError::InheritedBuilderAlias {
                class: class.name.clone(),
                method: builder.to_string(),
                from: from.clone(),
            });
        }
    }
    Ok(())
}

/// Tag derivation must be a bijection over the concrete classes.
fn validate_tags(registry: &Registry) -> Result<(), SchemaError> {
    let mut tags: HashMap<String, &str> = HashMap::new();
    for class in registry.classes() {
        if class.name == registry.root || registry.policy.kind_of(class) == ClassKind::Abstract {
            continue;
        }
        let tag = registry.naming.tag_name(&class.name);
        if let Some(first) = tags.get(&tag) {
            return Err(SchemaError::TagCollision {
                tag,
                first: (*first).to_string(),
                second: class.name.clone(),
            });
        }
        tags.insert(tag, class.name.as_str());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ClassificationPolicy;
    use crate::types::ClassDef;

    fn base() -> Registry {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box").abstract_class());
        registry.add_class(
            ClassDef::new("MiddleBox")
                .with_parents(&["Box"])
                .abstract_class(),
        );
        registry.add_class(ClassDef::new("LeafBox").with_parents(&["MiddleBox"]));
        registry
    }

    #[test]
    fn test_validate_valid_registry() {
        assert!(validate_registry(&base()).is_ok());
    }

    #[test]
    fn test_validate_missing_name() {
        let mut registry = base();
        registry.add_class(ClassDef::new("  "));
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::MissingName { index: 3 })
        ));
    }

    #[test]
    fn test_validate_duplicate_class() {
        let mut registry = base();
        registry.add_class(ClassDef::new("LeafBox").with_parents(&["Box"]));
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::DuplicateClass { ref name }) if name == "LeafBox"
        ));
    }

    #[test]
    fn test_validate_missing_root() {
        let mut registry = base();
        registry.root = "Node".to_string();
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::MissingRoot { .. })
        ));
    }

    #[test]
    fn test_validate_root_with_parents() {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box").with_parents(&["Node"]));
        registry.add_class(ClassDef::new("Node"));
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::RootHasParents { .. })
        ));
    }

    #[test]
    fn test_validate_dangling_parent() {
        let mut registry = base();
        registry.add_class(ClassDef::new("OrphanBox").with_parents(&["GhostBox"]));
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::DanglingParent { .. })
        ));
    }

    #[test]
    fn test_validate_cycle() {
        let mut registry = base();
        registry.add_class(ClassDef::new("ABox").with_parents(&["BBox"]));
        registry.add_class(ClassDef::new("BBox").with_parents(&["ABox"]));
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::CircularHierarchy { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_policy_name() {
        let mut registry = base();
        registry.policy = ClassificationPolicy::new(&["GhostBox"], &[]);
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::UnknownPolicyClass { list: "abstract", .. })
        ));
    }

    #[test]
    fn test_validate_tag_collision() {
        let mut registry = base();
        registry.add_class(ClassDef::new("Leaf").with_parents(&["Box"]));
        match validate_registry(&registry) {
            Err(SchemaError::TagCollision { tag, first, second }) => {
                assert_eq!(tag, "LeafT");
                assert_eq!(first, "LeafBox");
                assert_eq!(second, "Leaf");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_abstract_classes_do_not_collide() {
        let mut registry = base();
        registry.add_class(ClassDef::new("Leaf").with_parents(&["Box"]));
        registry.policy = ClassificationPolicy::new(&["Leaf"], &[]);
        assert!(validate_registry(&registry).is_ok());
    }

    #[test]
    fn test_validate_inherited_builder_alias() {
        let mut registry = base();
        registry.add_class(
            ClassDef::new("AliasBox")
                .with_parents(&["LeafBox"])
                .with_inherited_method("anonymous_from", "LeafBox"),
        );
        assert!(matches!(
            validate_registry(&registry),
            Err(SchemaError::InheritedBuilderAlias { ref class, .. }) if class == "AliasBox"
        ));
    }
}
