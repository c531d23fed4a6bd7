//! # idlbind Bench
//!
//! Synthetic model builders for idlbind performance testing.

pub mod synthetic;

pub use synthetic::{chain_graph, lattice_graph, lattice_xml};
