//! Per-backend naming conventions.
//!
//! Both backends walk the same phases and differ mostly in how they spell
//! class names, runtime-visible names and wrapper variables. Those choices
//! live in a [`NamingTable`] so the emission code stays shared in shape.

use idlbind_model::{EnumOption, TypeNode, enum_tag_string, qualified_name, sanitize_identifier};

/// Naming conventions of one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingTable {
    /// Suffix of the generated interface class.
    pub iface_class_suffix: &'static str,
    /// Suffix of the runtime-visible interface name.
    pub iface_runtime_suffix: &'static str,
    /// Suffix of the concrete implementation class.
    pub impl_class_suffix: &'static str,
    /// Qualified class of the universal base object.
    pub base_object_class: &'static str,
    /// Runtime-visible name of the universal base object.
    pub base_object_runtime: &'static str,
    /// Prefix of wrapper variables.
    pub variable_prefix: &'static str,
    /// Suffix of wrapper variables.
    pub variable_suffix: &'static str,
    /// Runtime-visible names that must be escaped.
    pub reserved: &'static [&'static str],
}

/// Names the host runtimes already define on their global object.
pub const RESERVED_RUNTIME_NAMES: &[&str] = &["Object"];

impl NamingTable {
    /// Returns the qualified class name of a node.
    ///
    /// Interfaces get the interface-class suffix, every other kind keeps its
    /// plain qualified name.
    #[must_use]
    pub fn class_name(&self, node: &TypeNode) -> String {
        let qualified = qualified_name("::", node, None);
        if node.is_interface() {
            format!("{}{}", qualified, self.iface_class_suffix)
        } else {
            qualified
        }
    }

    /// Returns the qualified class name of an interface implementation.
    #[must_use]
    pub fn impl_class_name(&self, node: &TypeNode) -> String {
        format!("{}{}", qualified_name("::", node, None), self.impl_class_suffix)
    }

    /// Returns the runtime-visible name of a node, escaped if reserved.
    #[must_use]
    pub fn runtime_name(&self, node: &TypeNode) -> String {
        self.escape(&node.name)
    }

    /// Returns the runtime-visible name of an interface class.
    #[must_use]
    pub fn iface_runtime_name(&self, node: &TypeNode) -> String {
        self.escape(&format!("{}{}", node.name, self.iface_runtime_suffix))
    }

    /// Returns the wrapper variable for a qualified class name.
    #[must_use]
    pub fn variable(&self, class_name: &str) -> String {
        format!(
            "{}{}{}",
            self.variable_prefix,
            sanitize_identifier(class_name),
            self.variable_suffix
        )
    }

    /// Appends `_` to names the runtime reserves.
    #[must_use]
    pub fn escape(&self, name: &str) -> String {
        if self.reserved.contains(&name) {
            format!("{name}_")
        } else {
            name.to_string()
        }
    }
}

/// Returns the string tag an enum value is serialized as.
///
/// The tag is derived from the enum's own name and the option identifier,
/// so `Mode::Fast` becomes `mode-fast`.
#[must_use]
pub fn enum_wire_tag(node: &TypeNode, option: &EnumOption) -> String {
    enum_tag_string(&format!("{}-{}", node.name, option.ident))
}
