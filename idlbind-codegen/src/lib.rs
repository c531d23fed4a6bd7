//! # idlbind Codegen
//!
//! Binding-stub generation from IDL type graphs.
//!
//! This crate provides:
//! - Jsonipc and V8 backends behind one [`Backend`] trait
//! - Table-driven per-backend naming
//! - The shared phase-ordered [`Generator`]
//! - Host configuration, backend registry and driver

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod generator;
pub mod naming;
pub mod registry;

pub use backend::{Backend, JsonipcBackend, V8Backend};
pub use config::GeneratorConfig;
pub use driver::{RunOutcome, generate_unit, run_backend, run_with};
pub use error::CodegenError;
pub use generator::Generator;
pub use naming::NamingTable;
pub use registry::{BackendRegistration, BackendRegistry};

/// Generates stub source from an XML model string.
///
/// # Arguments
/// * `xml` - XML model content
/// * `backend` - Backend to generate for
///
/// # Returns
/// Generated stub source as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_xml(xml: &str, backend: &dyn Backend) -> Result<String, CodegenError> {
    let graph = idlbind_model::parse_unit(xml)?;
    let ir = idlbind_model::UnitIr::from_graph(&graph)?;
    let generator = Generator::new(&ir, backend);
    Ok(generator.generate())
}

/// Generates stub source from an XML model file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    backend: &dyn Backend,
) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, backend)
}
