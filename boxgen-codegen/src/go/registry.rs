//! Type registry generation.
//!
//! Emits the blocks spanning every concrete class: the type-tag enumeration,
//! the instance-check and name dispatchers, the compile-time conformance
//! assertions and the anonymous constructor dispatcher.

use crate::go::anonymous::AnonymousGenerator;
use crate::writer::CodeWriter;
use boxgen_schema::ir::ClassModel;

/// Generator for the cross-class registry blocks.
pub struct TypeRegistryGenerator<'a> {
    model: &'a ClassModel,
}

impl<'a> TypeRegistryGenerator<'a> {
    /// Creates a new type registry generator.
    #[must_use]
    pub fn new(model: &'a ClassModel) -> Self {
        Self { model }
    }

    /// Generates all registry blocks.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = CodeWriter::new();
        self.write(&mut out);
        out.finish()
    }

    /// Writes all registry blocks.
    pub fn write(&self, out: &mut CodeWriter) {
        self.write_enum(out);
        self.write_is_instance(out);
        self.write_string(out);
        self.write_assertions(out);
        self.write_anonymous_dispatch(out);
    }

    /// Writes the type-tag enumeration, zero reserved for the invalid tag.
    fn write_enum(&self, out: &mut CodeWriter) {
        let type_enum = self.type_enum();
        out.line(&format!(
            "// {type_enum} represents a {} type.",
            self.kind_word()
        ));
        out.line(&format!("type {type_enum} uint8"));
        out.blank();
        out.line("const (");
        out.indent();
        out.line(&format!("invalidType {type_enum} = iota"));
        for class in self.model.concrete() {
            out.line(&self.model.tag_name(class));
        }
        out.dedent();
        out.line(")");
        out.blank();
    }

    fn write_is_instance(&self, out: &mut CodeWriter) {
        let naming = &self.model.naming;
        let root_itf = naming.interface_name(&self.model.root);

        out.line(&format!(
            "// IsInstance returns true if the {} is an instance of t.",
            self.kind_word()
        ));
        out.block(
            &format!("func (t {}) IsInstance(box {root_itf}) bool", self.type_enum()),
            |out| {
                out.line("var isInstance bool");
                out.block("switch t", |out| {
                    for class in self.model.concrete() {
                        out.line(&format!("case {}:", self.model.tag_name(class)));
                        out.indent();
                        out.line(&format!(
                            "_, isInstance = box.({})",
                            naming.interface_name(&class.name)
                        ));
                        out.dedent();
                    }
                });
                out.line("return isInstance");
            },
        );
        out.blank();
    }

    fn write_string(&self, out: &mut CodeWriter) {
        out.block(
            &format!("func (t {}) String() string", self.type_enum()),
            |out| {
                out.block("switch t", |out| {
                    for class in self.model.concrete() {
                        out.line(&format!("case {}:", self.model.tag_name(class)));
                        out.indent();
                        out.line(&format!("return \"{}\"", class.name));
                        out.dedent();
                    }
                });
                out.line(&format!("return \"<invalid {} type>\"", self.kind_word()));
            },
        );
        out.blank();
    }

    /// Writes one `_ XITF = (*X)(nil)` line per concrete class.
    fn write_assertions(&self, out: &mut CodeWriter) {
        let naming = &self.model.naming;
        let rows: Vec<(String, String)> = self
            .model
            .concrete()
            .map(|class| {
                (
                    format!("_ {}", naming.interface_name(&class.name)),
                    format!("= (*{})(nil)", class.name),
                )
            })
            .collect();

        out.line("var (");
        out.indent();
        out.aligned(&rows);
        out.dedent();
        out.line(")");
        out.blank();
    }

    /// Writes the tag to builder dispatcher; other tags yield nil.
    fn write_anonymous_dispatch(&self, out: &mut CodeWriter) {
        let root = self.model.root.as_str();
        let builders = AnonymousGenerator::new(self.model);

        out.block(
            &format!(
                "func (t {}) AnonymousFrom(parent {root}, children []{root}) {root}",
                self.type_enum()
            ),
            |out| {
                out.block("switch t", |out| {
                    for class in self.model.anonymous_builders() {
                        out.line(&format!("case {}:", self.model.tag_name(class)));
                        out.indent();
                        out.line(&format!(
                            "return {}(parent, children)",
                            builders.builder_name(&class.name)
                        ));
                        out.dedent();
                    }
                });
                out.line("return nil");
            },
        );
        out.blank();
    }

    fn type_enum(&self) -> &str {
        &self.model.naming.type_enum
    }

    /// Lowercase root name, used in comments and messages.
    fn kind_word(&self) -> String {
        self.model.root.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxgen_schema::types::{ClassDef, Registry};

    const CANONICAL: &[&str] = &["element_tag", "style", "element", "children"];

    fn model() -> ClassModel {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box"));
        registry.add_class(
            ClassDef::new("ParentBox")
                .with_parents(&["Box"])
                .abstract_class()
                .with_constructor(CANONICAL),
        );
        registry.add_class(ClassDef::new("TableColumnGroupBox").with_parents(&["ParentBox"]));
        registry.add_class(
            ClassDef::new("LineBox")
                .with_parents(&["ParentBox"])
                .with_method("anonymous_from"),
        );
        ClassModel::from_registry(&registry).expect("valid registry")
    }

    #[test]
    fn test_enum_lists_concrete_classes_in_order() {
        let model = model();
        let out = TypeRegistryGenerator::new(&model).generate();
        assert!(out.starts_with(
            "// BoxType represents a box type.\ntype BoxType uint8\n\nconst (\n\tinvalidType BoxType = iota\n\tTableColumnGroupT\n\tLineT\n)\n"
        ));
        assert!(!out.contains("\tParentT\n"));
        assert!(!out.contains("\tT\n"));
    }

    #[test]
    fn test_is_instance_switch() {
        let model = model();
        let out = TypeRegistryGenerator::new(&model).generate();
        assert!(out.contains(
            "func (t BoxType) IsInstance(box BoxITF) bool {\n\tvar isInstance bool\n\tswitch t {\n\tcase TableColumnGroupT:\n\t\t_, isInstance = box.(TableColumnGroupBoxITF)\n\tcase LineT:\n\t\t_, isInstance = box.(LineBoxITF)\n\t}\n\treturn isInstance\n}\n"
        ));
    }

    #[test]
    fn test_string_switch() {
        let model = model();
        let out = TypeRegistryGenerator::new(&model).generate();
        assert!(out.contains("\tcase LineT:\n\t\treturn \"LineBox\"\n"));
        assert!(out.contains("\treturn \"<invalid box type>\"\n}\n"));
    }

    #[test]
    fn test_assertions_are_aligned() {
        let model = model();
        let out = TypeRegistryGenerator::new(&model).generate();
        assert!(out.contains(
            "var (\n\t_ TableColumnGroupBoxITF = (*TableColumnGroupBox)(nil)\n\t_ LineBoxITF             = (*LineBox)(nil)\n)\n"
        ));
    }

    #[test]
    fn test_anonymous_dispatch_covers_generated_builders_only() {
        let model = model();
        let out = TypeRegistryGenerator::new(&model).generate();
        let expected = "\
func (t BoxType) AnonymousFrom(parent Box, children []Box) Box {
\tswitch t {
\tcase TableColumnGroupT:
\t\treturn TableColumnGroupBoxAnonymousFrom(parent, children)
\t}
\treturn nil
}
";
        assert!(out.ends_with(expected));
    }
}
