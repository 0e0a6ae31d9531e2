//! Anonymous-constructor gate.
//!
//! Decides per class whether the standard "anonymous box from a parent and
//! children" builder may be generated.

use crate::types::{ClassKind, ConstructorShape, NamingConfig};
use std::fmt;

/// Why a builder is not generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Abstract classes have no struct to build.
    Abstract,
    /// The constructor does not match the canonical shape.
    ConstructorShape,
    /// The class declares its own builder.
    OwnOverride,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abstract => write!(f, "abstract class"),
            Self::ConstructorShape => write!(f, "non-canonical constructor"),
            Self::OwnOverride => write!(f, "hand-written builder"),
        }
    }
}

/// Outcome of the gate for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuilderDecision {
    /// Emit the builder and its dispatcher case.
    Generate,
    /// Emit nothing for this class.
    Skip(SkipReason),
}

impl BuilderDecision {
    /// Returns true for [`BuilderDecision::Generate`].
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        matches!(self, Self::Generate)
    }
}

/// Gate comparing classes against the canonical builder requirements.
#[derive(Debug, Clone, Copy)]
pub struct AnonymousGate<'a> {
    naming: &'a NamingConfig,
}

impl<'a> AnonymousGate<'a> {
    /// Creates a gate for the given naming rules.
    #[must_use]
    pub const fn new(naming: &'a NamingConfig) -> Self {
        Self { naming }
    }

    /// Decides for one class.
    ///
    /// `constructor` is the effective constructor (declared or inherited) and
    /// `owns_builder` tells whether the class itself declares the builder
    /// method. Checks run in order: kind, constructor shape, own override.
    #[must_use]
    pub fn decide(
        &self,
        kind: ClassKind,
        constructor: Option<&ConstructorShape>,
        owns_builder: bool,
    ) -> BuilderDecision {
        if kind == ClassKind::Abstract {
            return BuilderDecision::Skip(SkipReason::Abstract);
        }
        match constructor {
            Some(shape) if shape.matches(&self.naming.canonical_constructor) => {}
            _ => return BuilderDecision::Skip(SkipReason::ConstructorShape),
        }
        if owns_builder {
            return BuilderDecision::Skip(SkipReason::OwnOverride);
        }
        BuilderDecision::Generate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> ConstructorShape {
        ConstructorShape::new(&["element_tag", "style", "element", "children"])
    }

    #[test]
    fn test_canonical_concrete_class_generates() {
        let naming = NamingConfig::default();
        let gate = AnonymousGate::new(&naming);
        let decision = gate.decide(ClassKind::Concrete, Some(&canonical()), false);
        assert_eq!(decision, BuilderDecision::Generate);
        assert!(decision.is_generated());
    }

    #[test]
    fn test_abstract_class_is_skipped_first() {
        let naming = NamingConfig::default();
        let gate = AnonymousGate::new(&naming);
        assert_eq!(
            gate.decide(ClassKind::Abstract, None, true),
            BuilderDecision::Skip(SkipReason::Abstract)
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let naming = NamingConfig::default();
        let gate = AnonymousGate::new(&naming);

        let short = ConstructorShape::new(&["page_type", "style"]);
        assert_eq!(
            gate.decide(ClassKind::Concrete, Some(&short), false),
            BuilderDecision::Skip(SkipReason::ConstructorShape)
        );

        let renamed = ConstructorShape::new(&["element_tag", "style", "element", "text"]);
        assert_eq!(
            gate.decide(ClassKind::Concrete, Some(&renamed), false),
            BuilderDecision::Skip(SkipReason::ConstructorShape)
        );

        assert_eq!(
            gate.decide(ClassKind::Concrete, None, false),
            BuilderDecision::Skip(SkipReason::ConstructorShape)
        );
    }

    #[test]
    fn test_own_override_wins() {
        let naming = NamingConfig::default();
        let gate = AnonymousGate::new(&naming);
        assert_eq!(
            gate.decide(ClassKind::Concrete, Some(&canonical()), true),
            BuilderDecision::Skip(SkipReason::OwnOverride)
        );
    }

    #[test]
    fn test_custom_canonical_shape() {
        let naming = NamingConfig {
            canonical_constructor: ConstructorShape::new(&["style", "children"]),
            ..NamingConfig::default()
        };
        let gate = AnonymousGate::new(&naming);
        let shape = ConstructorShape::new(&["style", "children"]);
        assert!(gate.decide(ClassKind::Concrete, Some(&shape), false).is_generated());
        assert!(!gate.decide(ClassKind::Concrete, Some(&canonical()), false).is_generated());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::OwnOverride.to_string(), "hand-written builder");
    }
}
