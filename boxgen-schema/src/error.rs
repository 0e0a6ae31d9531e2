//! Error types for registry parsing and validation.

use thiserror::Error;

/// Error type for registry parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (class, constructor, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid registry structure.
    #[error("invalid registry structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for registry validation and model extraction.
///
/// Every variant is fatal: generation stops before any output is produced.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Class not found.
    #[error("class '{name}' not found")]
    ClassNotFound {
        /// Class name.
        name: String,
    },

    /// A class descriptor without a name.
    #[error("class descriptor #{index} has no name")]
    MissingName {
        /// Position of the descriptor in declaration order.
        index: usize,
    },

    /// Two descriptors share a name.
    #[error("class '{name}' is declared more than once")]
    DuplicateClass {
        /// Class name.
        name: String,
    },

    /// A parent reference that is not in the registry.
    #[error("class '{class}' references unknown parent '{parent}'")]
    DanglingParent {
        /// Declaring class.
        class: String,
        /// Missing parent name.
        parent: String,
    },

    /// The parent graph contains a cycle.
    #[error("circular class hierarchy detected: {path}")]
    CircularHierarchy {
        /// Path of the cycle, `A -> B -> A`.
        path: String,
    },

    /// The configured hierarchy root is not declared.
    #[error("hierarchy root '{root}' is not declared in the registry")]
    MissingRoot {
        /// Root name.
        root: String,
    },

    /// The hierarchy root declares parents.
    #[error("hierarchy root '{root}' must not declare parents")]
    RootHasParents {
        /// Root name.
        root: String,
    },

    /// A classification policy entry names a class that does not exist.
    #[error("{list} policy lists unknown class '{name}'")]
    UnknownPolicyClass {
        /// Which list (`abstract`, `handWritten`).
        list: &'static str,
        /// Listed name.
        name: String,
    },

    /// Two concrete classes map to the same type tag.
    #[error("type tag '{tag}' is shared by concrete classes '{first}' and '{second}'")]
    TagCollision {
        /// Colliding tag.
        tag: String,
        /// Class that claimed the tag first.
        first: String,
        /// Class that collided.
        second: String,
    },

    /// The anonymous builder method is declared as an inherited alias.
    #[error(
        "class '{class}' declares '{method}' as an alias inherited from '{from}'; declare it directly or drop it"
    )]
    InheritedBuilderAlias {
        /// Declaring class.
        class: String,
        /// Builder method name.
        method: String,
        /// Class the alias points to.
        from: String,
    },

    /// The parent lists admit no consistent lookup order.
    #[error("cannot build a consistent lookup order for class '{class}'")]
    InconsistentLookupOrder {
        /// Class whose parents conflict.
        class: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl SchemaError {
    /// Creates a dangling parent error.
    pub fn dangling(class: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::DanglingParent {
            class: class.into(),
            parent: parent.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_parent_message() {
        let err = SchemaError::dangling("LeafBox", "GhostBox");
        assert_eq!(
            err.to_string(),
            "class 'LeafBox' references unknown parent 'GhostBox'"
        );
    }

    #[test]
    fn test_missing_attribute_message() {
        let err = ParseError::missing_attr("class", "name");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'name' on element 'class'"
        );
    }

    #[test]
    fn test_inconsistent_lookup_order_message() {
        let err = SchemaError::InconsistentLookupOrder {
            class: "ZBox".to_string(),
        };
        assert!(err.to_string().contains("'ZBox'"));
    }
}
