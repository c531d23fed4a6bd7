//! Binding-stub backends.
//!
//! A backend turns the phases of a [`Generator`](crate::Generator) walk into
//! source text for one scripting runtime.

pub mod jsonipc;
pub mod v8;

pub use jsonipc::JsonipcBackend;
pub use v8::V8Backend;

use crate::naming::NamingTable;
use idlbind_model::{Namespace, NodeId, ResolvedClass, UnitIr};

/// Emission hooks of one backend, called in phase order.
pub trait Backend: Send + Sync {
    /// Registry name of the backend.
    fn name(&self) -> &'static str;

    /// Naming conventions of the backend.
    fn naming(&self) -> &NamingTable;

    /// Directory of the runtime headers, relative to the include root.
    fn include_dir(&self) -> &'static str;

    /// Identification comment, the first line of every output.
    fn banner(&self) -> &'static str;

    /// Include directives following the banner.
    fn includes(&self) -> String;

    /// Opens the registration unit.
    fn begin_unit(&self, ir: &UnitIr<'_>, namespace: &Namespace) -> String;

    /// Phase 1: registers one enum and its values.
    fn generate_enum(&self, ir: &UnitIr<'_>, id: NodeId) -> String;

    /// Phase 2: registers the universal base object.
    fn generate_base_object(&self, ir: &UnitIr<'_>) -> String;

    /// Phase 3: registers one record.
    fn generate_record(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String;

    /// Phase 3: registers one sequence.
    fn generate_sequence(&self, _ir: &UnitIr<'_>, _class: &ResolvedClass) -> String {
        String::new()
    }

    /// Phase 4: registers one interface with its bases and members.
    fn generate_interface(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String;

    /// Phase 5: registers the implementation of one interface.
    fn generate_implementation(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String;

    /// Closes the registration unit.
    fn end_unit(&self, ir: &UnitIr<'_>) -> String;
}

/// Formats a `<variable>` / `.entry` / `;` block, empty if no entries.
pub(crate) fn chained_block(variable: &str, entries: &[String]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut output = format!("  {variable}\n");
    for entry in entries {
        output.push_str(&format!("    {entry}\n"));
    }
    output.push_str("  ;\n");
    output
}
