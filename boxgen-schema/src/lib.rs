//! # Boxgen Schema
//!
//! Box class registry parser and class model.
//!
//! This crate provides:
//! - Registry definitions for box class hierarchies
//! - XML registry parsing
//! - Registry validation
//! - Ancestor resolution, classification and the anonymous-constructor gate
//! - The resolved class model consumed by code generation

pub mod ancestors;
pub mod error;
pub mod gate;
pub mod ir;
pub mod parser;
pub mod policy;
pub mod types;
pub mod validation;

pub use ancestors::AncestorResolver;
pub use error::{ParseError, SchemaError};
pub use gate::{AnonymousGate, BuilderDecision, SkipReason};
pub use ir::{ClassModel, ClassNode};
pub use parser::parse_registry;
pub use policy::ClassificationPolicy;
pub use types::{ClassDef, ClassKind, ConstructorShape, MethodDecl, NamingConfig, Registry};
pub use validation::validate_registry;
