//! Interface and helper method generation.

use crate::writer::CodeWriter;
use boxgen_schema::ir::{ClassModel, ClassNode};

/// Generator for per-class interfaces and the helper methods of concrete types.
pub struct InterfaceGenerator<'a> {
    model: &'a ClassModel,
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(model: &'a ClassModel) -> Self {
        Self { model }
    }

    /// Generates the blocks of every class, in declaration order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = CodeWriter::new();
        for class in &self.model.classes {
            self.write_class(&mut out, class);
        }
        out.finish()
    }

    /// Writes the interface of a class, then its helper methods if concrete.
    ///
    /// The root gets nothing: its interface is hand-written in the target.
    pub fn write_class(&self, out: &mut CodeWriter, class: &ClassNode) {
        if class.is_root {
            return;
        }
        self.write_interface(out, class);
        if class.is_concrete() {
            out.aligned(&self.helper_methods(class));
            out.blank();
        }
    }

    /// Writes the interface declaration.
    fn write_interface(&self, out: &mut CodeWriter, class: &ClassNode) {
        let naming = &self.model.naming;

        out.comment(&class.doc_lines);
        out.block(
            &format!("type {} interface", naming.interface_name(&class.name)),
            |out| {
                for parent in class.sorted_parents() {
                    out.line(&naming.interface_name(parent));
                }
                out.line(&format!("{}()", naming.marker_name(&class.name)));
                if class.needs_hand_written {
                    out.line(&naming.methods_group(&class.name));
                }
            },
        );
        out.blank();
    }

    /// One-line helper methods of a concrete class, as `(signature, body)` rows.
    ///
    /// Marker methods come last: the class's own, then one per ancestor in
    /// name order.
    #[must_use]
    pub fn helper_methods(&self, class: &ClassNode) -> Vec<(String, String)> {
        let naming = &self.model.naming;
        let name = class.name.as_str();
        let root = self.model.root.as_str();
        let fields = naming.fields_struct.as_str();

        let mut rows = vec![
            (
                format!("func ({name}) Type() {}", naming.type_enum),
                format!("{{ return {} }}", self.model.tag_name(class)),
            ),
            (
                format!("func (b *{name}) {root}() *{fields}"),
                format!("{{ return &b.{fields} }}"),
            ),
            (
                format!("func (b {name}) Copy() {root}"),
                "{ return &b }".to_string(),
            ),
            (
                format!("func ({name}) IsClassical{root}() bool"),
                "{ return true }".to_string(),
            ),
            (
                format!("func ({name}) {}()", naming.marker_name(name)),
                "{}".to_string(),
            ),
        ];
        rows.extend(class.ancestors.iter().map(|ancestor| {
            (
                format!("func ({name}) {}()", naming.marker_name(ancestor)),
                "{}".to_string(),
            )
        }));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxgen_schema::types::{ClassDef, Registry};

    fn model() -> ClassModel {
        let mut registry = Registry::new("boxes".to_string(), "Box".to_string());
        registry.add_class(ClassDef::new("Box").with_doc("Root box."));
        registry.add_class(
            ClassDef::new("ParentBox")
                .with_parents(&["Box"])
                .abstract_class()
                .with_doc("A box that has children."),
        );
        registry.add_class(
            ClassDef::new("BlockLevelBox")
                .with_parents(&["Box"])
                .abstract_class()
                .hand_written()
                .with_doc("A box that participates in an block formatting context."),
        );
        registry.add_class(
            ClassDef::new("BlockContainerBox")
                .with_parents(&["ParentBox"])
                .abstract_class(),
        );
        registry.add_class(
            ClassDef::new("BlockBox")
                .with_parents(&["BlockContainerBox", "BlockLevelBox"])
                .with_doc("A block-level box that is also a block container."),
        );
        ClassModel::from_registry(&registry).expect("valid registry")
    }

    #[test]
    fn test_root_emits_nothing() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let mut out = CodeWriter::new();
        generator.write_class(&mut out, model.get("Box").expect("root"));
        assert_eq!(out.finish(), "");
        assert!(!generator.generate().contains("type BoxITF"));
    }

    #[test]
    fn test_abstract_interface_only() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let mut out = CodeWriter::new();
        generator.write_class(&mut out, model.get("ParentBox").expect("declared"));
        assert_eq!(
            out.finish(),
            "// A box that has children.\ntype ParentBoxITF interface {\n\tBoxITF\n\tisParentBox()\n}\n"
        );
    }

    #[test]
    fn test_hand_written_method_group() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let mut out = CodeWriter::new();
        generator.write_class(&mut out, model.get("BlockLevelBox").expect("declared"));
        assert!(out.finish().contains("\tisBlockLevelBox()\n\tmethodsBlockLevelBox\n}\n"));
    }

    #[test]
    fn test_undocumented_class_has_no_comment() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let mut out = CodeWriter::new();
        generator.write_class(&mut out, model.get("BlockContainerBox").expect("declared"));
        assert!(out.finish().starts_with("type BlockContainerBoxITF interface {\n"));
    }

    #[test]
    fn test_concrete_class_block() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let mut out = CodeWriter::new();
        generator.write_class(&mut out, model.get("BlockBox").expect("declared"));
        let expected = "\
// A block-level box that is also a block container.
type BlockBoxITF interface {
\tBlockContainerBoxITF
\tBlockLevelBoxITF
\tisBlockBox()
}

func (BlockBox) Type() BoxType        { return BlockT }
func (b *BlockBox) Box() *BoxFields   { return &b.BoxFields }
func (b BlockBox) Copy() Box          { return &b }
func (BlockBox) IsClassicalBox() bool { return true }
func (BlockBox) isBlockBox()          {}
func (BlockBox) isBlockContainerBox() {}
func (BlockBox) isBlockLevelBox()     {}
func (BlockBox) isParentBox()         {}
";
        assert_eq!(out.finish(), expected);
    }

    #[test]
    fn test_helper_markers_follow_ancestors() {
        let model = model();
        let generator = InterfaceGenerator::new(&model);
        let rows = generator.helper_methods(model.get("BlockBox").expect("declared"));
        let markers: Vec<&str> = rows[4..].iter().map(|(sig, _)| sig.as_str()).collect();
        assert_eq!(
            markers,
            [
                "func (BlockBox) isBlockBox()",
                "func (BlockBox) isBlockContainerBox()",
                "func (BlockBox) isBlockLevelBox()",
                "func (BlockBox) isParentBox()",
            ]
        );
    }
}
