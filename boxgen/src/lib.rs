//! # Boxgen
//!
//! Go boilerplate generator for the box class hierarchy of a layout engine.
//!
//! A registry declares every box class with its parents, documentation,
//! constructor shape and self-declared methods. Boxgen resolves the
//! hierarchy and emits one Go source file holding the per-class interfaces,
//! dispatch helper methods, anonymous builders, the type-tag enumeration and
//! its dispatchers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use boxgen::prelude::*;
//!
//! let code = generate_from_xml(&std::fs::read_to_string("boxes.xml")?)?;
//! std::fs::write("stubs.go", code)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Registry types, XML parsing, validation and class model
//! - [`codegen`] - Go code generation

pub mod prelude;

/// Registry parsing, validation and class model.
pub mod schema {
    pub use boxgen_schema::*;
}

/// Go code generation from registries.
pub mod codegen {
    pub use boxgen_codegen::*;
}

pub use boxgen_codegen::{
    CodegenError, Generator, generate_from_file, generate_from_registry, generate_from_xml,
    write_generated,
};
pub use boxgen_schema::{ClassModel, ParseError, Registry, SchemaError};

/// XML registry of the layout engine's box hierarchy.
pub const REFERENCE_SCHEMA: &str = include_str!("../schemas/boxes.xml");

/// Parses the bundled box hierarchy.
///
/// # Returns
/// The registry of the layout engine's 28 box classes.
///
/// # Errors
/// Returns `ParseError` if the bundled XML is malformed.
pub fn reference_registry() -> Result<Registry, ParseError> {
    boxgen_schema::parse_registry(REFERENCE_SCHEMA)
}

/// Generates the Go stubs of the bundled box hierarchy.
///
/// # Errors
/// Returns `CodegenError` if the bundled registry fails to parse or validate.
pub fn generate_reference() -> Result<String, CodegenError> {
    let registry = reference_registry()?;
    tracing::debug!("Generating stubs for the bundled box hierarchy");
    generate_from_registry(&registry)
}
