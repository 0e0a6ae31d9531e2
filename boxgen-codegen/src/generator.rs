//! Main code generator.

use crate::go::{AnonymousGenerator, InterfaceGenerator, TypeRegistryGenerator};
use crate::writer::CodeWriter;
use boxgen_schema::ir::ClassModel;

/// Main code generator that orchestrates all generation.
pub struct Generator<'a> {
    model: &'a ClassModel,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given class model.
    ///
    /// # Arguments
    /// * `model` - Resolved class model
    #[must_use]
    pub fn new(model: &'a ClassModel) -> Self {
        Self { model }
    }

    /// Generates the complete Go source file.
    ///
    /// The same model always yields the same bytes.
    ///
    /// # Returns
    /// Generated Go code as a string.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = CodeWriter::new();

        self.write_header(&mut out);
        self.write_imports(&mut out);

        let interfaces = InterfaceGenerator::new(self.model);
        let builders = AnonymousGenerator::new(self.model);
        for class in &self.model.classes {
            interfaces.write_class(&mut out, class);
            builders.write_builder(&mut out, class);
        }

        TypeRegistryGenerator::new(self.model).write(&mut out);

        tracing::info!(
            "Generated package {}: {} classes, {} concrete, {} anonymous builders",
            self.model.package,
            self.model.classes.len(),
            self.model.concrete().count(),
            self.model.anonymous_builders().count()
        );

        out.finish()
    }

    fn write_header(&self, out: &mut CodeWriter) {
        out.line(&format!("package {}", self.model.package));
        out.blank();
        out.line(&format!(
            "// Code generated by {}. DO NOT EDIT.",
            self.model.generator
        ));
        out.blank();
    }

    fn write_imports(&self, out: &mut CodeWriter) {
        match self.model.imports.as_slice() {
            [] => {}
            [single] => out.line(&format!("import \"{single}\"")),
            many => {
                out.line("import (");
                out.indent();
                for path in many {
                    out.line(&format!("\"{path}\""));
                }
                out.dedent();
                out.line(")");
            }
        }
        out.blank();
    }
}
