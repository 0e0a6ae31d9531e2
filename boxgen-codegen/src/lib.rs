//! # Boxgen Codegen
//!
//! Go boilerplate generation from box class registries.
//!
//! This crate provides:
//! - Per-class interface and helper method generation
//! - Anonymous builder generation
//! - Type-tag enumeration and dispatcher generation
//! - File helpers that only rewrite changed output

pub mod error;
pub mod generator;
pub mod go;
pub mod writer;

pub use error::CodegenError;
pub use generator::Generator;
pub use writer::CodeWriter;

use boxgen_schema::{ClassModel, Registry};
use std::path::Path;

/// Generates Go code from an in-memory registry.
///
/// # Arguments
/// * `registry` - Declared box class registry
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if the registry is invalid.
pub fn generate_from_registry(registry: &Registry) -> Result<String, CodegenError> {
    let model = ClassModel::from_registry(registry)?;
    let generator = Generator::new(&model);
    Ok(generator.generate())
}

/// Generates Go code from an XML registry string.
///
/// # Arguments
/// * `xml` - XML registry content
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let registry = boxgen_schema::parse_registry(xml)?;
    generate_from_registry(&registry)
}

/// Generates Go code from an XML registry file.
///
/// # Arguments
/// * `path` - Path to the XML registry file
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or validation fails.
pub fn generate_from_file(path: &Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Generates Go code from a registry file and writes it to `output`.
///
/// Nothing is written when generation fails, and an existing file with
/// identical content is left untouched.
///
/// # Arguments
/// * `schema` - Path to the XML registry file
/// * `output` - Path of the generated Go file
///
/// # Returns
/// `true` if the output file was written.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn write_generated(schema: &Path, output: &Path) -> Result<bool, CodegenError> {
    let code = generate_from_file(schema)?;

    if let Ok(existing) = std::fs::read_to_string(output)
        && existing == code
    {
        tracing::info!("{} is up to date", output.display());
        return Ok(false);
    }

    std::fs::write(output, code)?;
    tracing::info!("Wrote {}", output.display());
    Ok(true)
}
