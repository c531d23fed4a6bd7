//! # idlbind Model
//!
//! Read-only type graph consumed by the binding-stub generators.
//!
//! This crate provides:
//! - Type graph definitions (enums, records, sequences, interfaces)
//! - XML model loading
//! - Namespace validation for a compilation unit
//! - Ancestry resolution over the prerequisite graph
//! - Identifier mapping shared by all backends
//! - Intermediate representation for code generation

pub mod ancestry;
pub mod error;
pub mod ident;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use ancestry::AncestryResolver;
pub use error::{ModelError, ParseError};
pub use ident::{enum_tag_string, namespace_names, qualified_name, sanitize_identifier};
pub use ir::{ResolvedClass, UnitIr};
pub use parser::parse_unit;
pub use types::{EnumOption, Field, Method, NodeId, Param, Storage, TypeGraph, TypeHash, TypeNode};
pub use validation::{Namespace, resolve_namespace};
