//! Anonymous builder generation.

use crate::writer::CodeWriter;
use boxgen_schema::gate::{BuilderDecision, SkipReason};
use boxgen_schema::ir::{ClassModel, ClassNode};

/// Generator for the functions building an anonymous box from a parent.
pub struct AnonymousGenerator<'a> {
    model: &'a ClassModel,
}

impl<'a> AnonymousGenerator<'a> {
    /// Creates a new anonymous builder generator.
    #[must_use]
    pub fn new(model: &'a ClassModel) -> Self {
        Self { model }
    }

    /// Generates the builders of every eligible class.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = CodeWriter::new();
        for class in &self.model.classes {
            self.write_builder(&mut out, class);
        }
        out.finish()
    }

    /// Writes the builder of a class when the gate allows it.
    pub fn write_builder(&self, out: &mut CodeWriter, class: &ClassNode) {
        match class.anonymous {
            BuilderDecision::Generate => self.write_function(out, &class.name),
            BuilderDecision::Skip(SkipReason::Abstract) => {}
            BuilderDecision::Skip(reason) => {
                tracing::debug!("No anonymous builder for {}: {}", class.name, reason);
            }
        }
    }

    fn write_function(&self, out: &mut CodeWriter, name: &str) {
        let root = self.model.root.as_str();
        let cascade = self.model.naming.style_cascade.as_str();

        out.block(
            &format!(
                "func {}(parent {root}, children []{root}) *{name}",
                self.builder_name(name)
            ),
            |out| {
                out.line(&format!(
                    "style := {cascade}(nil, nil, parent.{root}().Style, nil)"
                ));
                out.line(&format!(
                    "out := New{name}(style, parent.{root}().Element, parent.{root}().PseudoType, children)"
                ));
                out.line("return out");
            },
        );
        out.blank();
    }

    /// Name of the builder function of a class.
    #[must_use]
    pub fn builder_name(&self, class: &str) -> String {
        self.model.naming.builder_name(class)
    }
}
