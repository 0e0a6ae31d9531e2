//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use boxgen::prelude::*;
//! ```

// Registry types
pub use boxgen_schema::{
    ClassDef, ClassKind, ClassificationPolicy, ConstructorShape, MethodDecl, NamingConfig,
    ParseError, Registry, SchemaError, parse_registry, validate_registry,
};

// Class model
pub use boxgen_schema::{BuilderDecision, ClassModel, ClassNode, SkipReason};

// Generation
pub use boxgen_codegen::{
    CodeWriter, CodegenError, Generator, generate_from_file, generate_from_registry,
    generate_from_xml, write_generated,
};

pub use crate::{REFERENCE_SCHEMA, generate_reference, reference_registry};
