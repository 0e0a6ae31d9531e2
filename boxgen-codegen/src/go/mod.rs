//! Go code generation modules.

pub mod anonymous;
pub mod interfaces;
pub mod registry;

pub use anonymous::AnonymousGenerator;
pub use interfaces::InterfaceGenerator;
pub use registry::TypeRegistryGenerator;
