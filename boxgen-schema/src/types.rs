//! Registry type definitions.
//!
//! This module contains the data structures describing a box class registry
//! as declared by its author: class descriptors, constructor shapes,
//! self-declared methods and the naming configuration of the target code.

use crate::policy::ClassificationPolicy;
use std::collections::HashMap;

/// Complete box class registry.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Target package name.
    pub package: String,
    /// Name of the hierarchy root class.
    pub root: String,
    /// Generator name written in the generated-code header.
    pub generator: String,
    /// Import paths required by the generated code.
    pub imports: Vec<String>,
    /// Naming rules of the generated code.
    pub naming: NamingConfig,
    /// Name-list classification, merged onto the per-class attributes.
    pub policy: ClassificationPolicy,
    /// Class descriptors, in declaration order.
    classes: Vec<ClassDef>,
    /// Class lookup map, kept in step with `classes` by `add_class`.
    class_map: HashMap<String, usize>,
}

impl Registry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new(package: String, root: String) -> Self {
        Self {
            package,
            root,
            generator: DEFAULT_GENERATOR.to_string(),
            imports: Vec::new(),
            naming: NamingConfig::default(),
            policy: ClassificationPolicy::default(),
            classes: Vec::new(),
            class_map: HashMap::new(),
        }
    }

    /// Adds a class descriptor to the registry.
    ///
    /// Duplicates are kept so that validation can report them; lookups
    /// resolve to the first declaration.
    pub fn add_class(&mut self, class: ClassDef) {
        let index = self.classes.len();
        self.class_map.entry(class.name.clone()).or_insert(index);
        self.classes.push(class);
    }

    /// Class descriptors, in declaration order.
    #[must_use]
    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.class_map.get(name).map(|&idx| &self.classes[idx])
    }

    /// Returns true if a class with the given name exists.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_map.contains_key(name)
    }
}

/// Default generator name used in the output header.
pub const DEFAULT_GENERATOR: &str = "boxgen";

/// Whether a class gets concrete code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    /// Backed by a concrete struct in the target code.
    #[default]
    Concrete,
    /// Interface only, no struct.
    Abstract,
}

impl ClassKind {
    /// Parses the `abstract` attribute value.
    #[must_use]
    pub fn from_abstract_flag(value: &str) -> Option<Self> {
        parse_bool(value).map(|is_abstract| {
            if is_abstract {
                Self::Abstract
            } else {
                Self::Concrete
            }
        })
    }
}

/// One declared box class.
#[derive(Debug, Clone, Default)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Direct parents, in declaration order.
    pub parents: Vec<String>,
    /// Declared kind.
    pub kind: ClassKind,
    /// Whether the interface references a hand-written method group.
    pub needs_hand_written: bool,
    /// Documentation text, as written.
    pub doc: Option<String>,
    /// Constructor declared directly on this class.
    pub constructor: Option<ConstructorShape>,
    /// Methods declared on this class.
    pub methods: Vec<MethodDecl>,
}

impl ClassDef {
    /// Creates a new concrete class without parents.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the direct parents.
    #[must_use]
    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// Marks the class abstract.
    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.kind = ClassKind::Abstract;
        self
    }

    /// Marks the class as needing a hand-written method group.
    #[must_use]
    pub fn hand_written(mut self) -> Self {
        self.needs_hand_written = true;
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets the constructor parameters (receiver excluded).
    #[must_use]
    pub fn with_constructor(mut self, params: &[&str]) -> Self {
        self.constructor = Some(ConstructorShape::new(params));
        self
    }

    /// Declares a method directly on this class.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(MethodDecl::own(name));
        self
    }

    /// Records a method alias inherited from another class.
    #[must_use]
    pub fn with_inherited_method(mut self, name: impl Into<String>, from: impl Into<String>) -> Self {
        self.methods.push(MethodDecl::inherited(name, from));
        self
    }

    /// Returns true if the class declares the method itself.
    #[must_use]
    pub fn declares_method(&self, name: &str) -> bool {
        self.methods
            .iter()
            .any(|m| m.name == name && m.inherited_from.is_none())
    }
}

/// Parameter list of a constructor, receiver excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstructorShape {
    /// Parameter names, in position order.
    pub params: Vec<String>,
}

impl ConstructorShape {
    /// Creates a shape from parameter names.
    #[must_use]
    pub fn new(params: &[&str]) -> Self {
        Self {
            params: params.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Parses a comma-separated parameter list.
    ///
    /// Blank entries are ignored, so `""` is the zero-parameter shape.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self {
            params: split_list(list),
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns true if both shapes have the same parameters in the same positions.
    #[must_use]
    pub fn matches(&self, other: &ConstructorShape) -> bool {
        self.params == other.params
    }
}

impl std::fmt::Display for ConstructorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(self")?;
        for param in &self.params {
            write!(f, ", {param}")?;
        }
        write!(f, ")")
    }
}

/// A method listed on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Set when the entry only aliases an inherited method.
    pub inherited_from: Option<String>,
}

impl MethodDecl {
    /// A method declared directly on the class.
    #[must_use]
    pub fn own(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inherited_from: None,
        }
    }

    /// An alias of a method inherited from `from`.
    #[must_use]
    pub fn inherited(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inherited_from: Some(from.into()),
        }
    }
}

/// Naming rules shared by every emitted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Suffix of generated interface names (`BlockBox` -> `BlockBoxITF`).
    pub interface_suffix: String,
    /// Suffix stripped from class names when deriving tags.
    pub strip_suffix: String,
    /// Suffix appended when deriving tags (`BlockBox` -> `BlockT`).
    pub tag_suffix: String,
    /// Name of the type-tag enumeration.
    pub type_enum: String,
    /// Name of the struct holding the common box fields.
    pub fields_struct: String,
    /// Method whose own declaration disables the generated builder.
    pub builder_method: String,
    /// Suffix of generated builder functions (`BlockBoxAnonymousFrom`).
    pub builder_suffix: String,
    /// Function cascading an empty declaration against a parent style.
    pub style_cascade: String,
    /// Constructor shape required for a generated builder.
    pub canonical_constructor: ConstructorShape,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            interface_suffix: "ITF".to_string(),
            strip_suffix: "Box".to_string(),
            tag_suffix: "T".to_string(),
            type_enum: "BoxType".to_string(),
            fields_struct: "BoxFields".to_string(),
            builder_method: "anonymous_from".to_string(),
            builder_suffix: "AnonymousFrom".to_string(),
            style_cascade: "tree.ComputedFromCascaded".to_string(),
            canonical_constructor: ConstructorShape::new(&[
                "element_tag",
                "style",
                "element",
                "children",
            ]),
        }
    }
}

impl NamingConfig {
    /// Interface name of a class.
    #[must_use]
    pub fn interface_name(&self, class: &str) -> String {
        format!("{}{}", class, self.interface_suffix)
    }

    /// Type-tag constant of a class.
    #[must_use]
    pub fn tag_name(&self, class: &str) -> String {
        let stem = match class.strip_suffix(self.strip_suffix.as_str()) {
            Some(stem) if !stem.is_empty() => stem,
            _ => class,
        };
        format!("{}{}", stem, self.tag_suffix)
    }

    /// Marker method of a class.
    #[must_use]
    pub fn marker_name(&self, class: &str) -> String {
        format!("is{class}")
    }

    /// Hand-written method group referenced by a class interface.
    #[must_use]
    pub fn methods_group(&self, class: &str) -> String {
        format!("methods{class}")
    }

    /// Generated builder function of a class.
    #[must_use]
    pub fn builder_name(&self, class: &str) -> String {
        format!("{}{}", class, self.builder_suffix)
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
#[must_use]
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses an XML boolean attribute.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_strips_suffix() {
        let naming = NamingConfig::default();
        assert_eq!(naming.tag_name("BlockBox"), "BlockT");
        assert_eq!(naming.tag_name("TableColumnGroupBox"), "TableColumnGroupT");
    }

    #[test]
    fn test_tag_name_without_suffix() {
        let naming = NamingConfig::default();
        assert_eq!(naming.tag_name("Block"), "BlockT");
        // The bare suffix is kept whole rather than producing an empty stem.
        assert_eq!(naming.tag_name("Box"), "BoxT");
    }

    #[test]
    fn test_derived_names() {
        let naming = NamingConfig::default();
        assert_eq!(naming.interface_name("LeafBox"), "LeafBoxITF");
        assert_eq!(naming.marker_name("LeafBox"), "isLeafBox");
        assert_eq!(naming.methods_group("TableBox"), "methodsTableBox");
        assert_eq!(naming.builder_name("LeafBox"), "LeafBoxAnonymousFrom");
    }

    #[test]
    fn test_constructor_shape_parse() {
        let shape = ConstructorShape::parse(" element_tag, style ,element,children ");
        assert_eq!(shape.arity(), 4);
        assert!(shape.matches(&NamingConfig::default().canonical_constructor));
        assert_eq!(ConstructorShape::parse("").arity(), 0);
    }

    #[test]
    fn test_constructor_shape_display() {
        let shape = ConstructorShape::new(&["page_type", "style"]);
        assert_eq!(shape.to_string(), "(self, page_type, style)");
    }

    #[test]
    fn test_registry_lookup_keeps_first_declaration() {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box").abstract_class());
        registry.add_class(ClassDef::new("Box"));
        assert_eq!(registry.classes().len(), 2);
        assert_eq!(
            registry.get_class("Box").map(|c| c.kind),
            Some(ClassKind::Abstract)
        );
        assert!(!registry.has_class("LeafBox"));
    }

    #[test]
    fn test_registry_lookup_tracks_every_added_class() {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        for name in ["Box", "ParentBox", "LeafBox"] {
            registry.add_class(ClassDef::new(name));
        }
        for class in registry.classes() {
            let found = registry.get_class(&class.name).expect("indexed");
            assert!(std::ptr::eq(found, class));
        }
        let names: Vec<&str> = registry.classes().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Box", "ParentBox", "LeafBox"]);
    }

    #[test]
    fn test_declares_method_ignores_aliases() {
        let class = ClassDef::new("TextBox")
            .with_method("anonymous_from")
            .with_inherited_method("copy", "Box");
        assert!(class.declares_method("anonymous_from"));
        assert!(!class.declares_method("copy"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(ClassKind::from_abstract_flag("yes"), Some(ClassKind::Abstract));
    }
}
