//! Classification policy.
//!
//! Classes carry their own `kind` and `needs_hand_written` attributes. A
//! registry may additionally list class names, the way older registries kept
//! the abstract and hand-written sets apart from the class table; those lists
//! are merged onto the per-class attributes here.

use crate::error::SchemaError;
use crate::types::{ClassDef, ClassKind, Registry};

/// Name lists merged onto per-class classification attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationPolicy {
    /// Classes without a concrete struct.
    pub abstract_types: Vec<String>,
    /// Classes whose interface references a hand-written method group.
    pub hand_written: Vec<String>,
}

impl ClassificationPolicy {
    /// Creates a policy from two name lists.
    #[must_use]
    pub fn new(abstract_types: &[&str], hand_written: &[&str]) -> Self {
        Self {
            abstract_types: abstract_types.iter().map(|s| (*s).to_string()).collect(),
            hand_written: hand_written.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Returns true if neither list names anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abstract_types.is_empty() && self.hand_written.is_empty()
    }

    /// Checks that every listed name is declared in the registry.
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownPolicyClass` for the first unknown name.
    pub fn validate(&self, registry: &Registry) -> Result<(), SchemaError> {
        let lists = [
            ("abstract", &self.abstract_types),
            ("handWritten", &self.hand_written),
        ];
        for (list, names) in lists {
            if let Some(name) = names.iter().find(|n| !registry.has_class(n)) {
                return Err(SchemaError::UnknownPolicyClass {
                    list,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Effective kind of a class.
    #[must_use]
    pub fn kind_of(&self, class: &ClassDef) -> ClassKind {
        if self.abstract_types.contains(&class.name) {
            ClassKind::Abstract
        } else {
            class.kind
        }
    }

    /// Returns true if the class interface needs a hand-written method group.
    #[must_use]
    pub fn needs_extra_methods(&self, class: &ClassDef) -> bool {
        class.needs_hand_written || self.hand_written.contains(&class.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box").abstract_class());
        registry.add_class(ClassDef::new("TableBox").with_parents(&["Box"]));
        registry.add_class(ClassDef::new("ReplacedBox").with_parents(&["Box"]).hand_written());
        registry
    }

    #[test]
    fn test_policy_merges_with_attributes() {
        let registry = registry();
        let policy = ClassificationPolicy::new(&["TableBox"], &["TableBox"]);
        assert!(policy.validate(&registry).is_ok());

        let table = registry.get_class("TableBox").expect("declared");
        assert_eq!(policy.kind_of(table), ClassKind::Abstract);
        assert!(policy.needs_extra_methods(table));

        let replaced = registry.get_class("ReplacedBox").expect("declared");
        assert_eq!(policy.kind_of(replaced), ClassKind::Concrete);
        assert!(policy.needs_extra_methods(replaced));
    }

    #[test]
    fn test_policy_rejects_unknown_names() {
        let registry = registry();
        let policy = ClassificationPolicy::new(&[], &["GhostBox"]);
        let err = policy.validate(&registry).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownPolicyClass { list: "handWritten", ref name } if name == "GhostBox"
        ));
    }

    #[test]
    fn test_empty_policy() {
        assert!(ClassificationPolicy::default().is_empty());
        assert!(!ClassificationPolicy::new(&["Box"], &[]).is_empty());
    }
}
