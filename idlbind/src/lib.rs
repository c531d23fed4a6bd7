//! # idlbind
//!
//! Binding-stub generator for IDL type graphs.
//!
//! An upstream IDL front end hands over a graph of enums, records,
//! sequences and interfaces. idlbind validates that the unit lives in one
//! namespace, reduces every interface's prerequisites to its direct bases and
//! emits source code registering each type with a foreign runtime.
//!
//! ## Features
//!
//! - **Two backends** - Jsonipc introspection stubs and V8 (`v8pp`) stubs
//! - **Deterministic output** - identical input yields identical bytes
//! - **Table-driven naming** - a new backend is a naming table plus emitters
//!
//! ## Quick Start
//!
//! ```
//! use idlbind::prelude::*;
//!
//! let xml = r#"<unit>
//!   <type name="Mode" storage="enum" namespace="Audio">
//!     <option name="Fast" value="0"/>
//!   </type>
//! </unit>"#;
//!
//! let stub = generate_from_xml(xml, &JsonipcBackend::new())?;
//! assert!(stub.contains("\"mode-fast\""));
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Type graph, XML loading, namespace and ancestry resolution
//! - [`codegen`] - Backends, generator pipeline, configuration and registry

pub mod prelude;

/// Type graph model and validation.
pub mod model {
    pub use idlbind_model::*;
}

/// Stub generation.
pub mod codegen {
    pub use idlbind_codegen::*;
}

// Re-export commonly used items at the crate root
pub use idlbind_codegen::{
    Backend, BackendRegistry, CodegenError, GeneratorConfig, RunOutcome, generate_from_file,
    generate_from_xml,
};
pub use idlbind_model::{TypeGraph, parse_unit};
