//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use idlbind::prelude::*;
//! ```

// Model types
pub use idlbind_model::{
    AncestryResolver, EnumOption, Field, Method, ModelError, Namespace, NodeId, ParseError,
    Storage, TypeGraph, TypeHash, TypeNode, UnitIr, parse_unit,
};

// Generation
pub use idlbind_codegen::{
    Backend, BackendRegistration, BackendRegistry, CodegenError, Generator, GeneratorConfig,
    JsonipcBackend, RunOutcome, V8Backend, generate_from_file, generate_from_xml,
};
