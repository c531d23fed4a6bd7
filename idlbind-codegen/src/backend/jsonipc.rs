//! Jsonipc introspection-framework backend.
//!
//! Emits one `static void <Namespace>_jsonipc_stub ()` function registering
//! enums, serializable records, interface classes and their `…Impl`
//! counterparts with `Jsonipc`.

use super::{Backend, chained_block};
use crate::naming::{NamingTable, RESERVED_RUNTIME_NAMES, enum_wire_tag};
use idlbind_model::{Namespace, NodeId, ResolvedClass, UnitIr, qualified_name};

/// Naming conventions of the Jsonipc backend.
pub const JSONIPC_NAMING: NamingTable = NamingTable {
    iface_class_suffix: "Iface",
    iface_runtime_suffix: "Iface",
    impl_class_suffix: "Impl",
    base_object_class: "Aida::ImplicitBase",
    base_object_runtime: "AidaImplicitBase",
    variable_prefix: "jsonipc__",
    variable_suffix: "",
    reserved: RESERVED_RUNTIME_NAMES,
};

/// Backend generating Jsonipc registration stubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonipcBackend;

impl JsonipcBackend {
    /// Creates a new Jsonipc backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Backend for JsonipcBackend {
    fn name(&self) -> &'static str {
        "jsonipc"
    }

    fn naming(&self) -> &NamingTable {
        &JSONIPC_NAMING
    }

    fn include_dir(&self) -> &'static str {
        "jsonipc"
    }

    fn banner(&self) -> &'static str {
        "// === Generated by idlbind-codegen/jsonipc ==="
    }

    fn includes(&self) -> String {
        "#include \"jsonipc/jsonipc.hh\"\n\n".to_string()
    }

    fn begin_unit(&self, _ir: &UnitIr<'_>, namespace: &Namespace) -> String {
        format!("static void\n{}_jsonipc_stub ()\n{{\n", namespace)
    }

    fn generate_enum(&self, ir: &UnitIr<'_>, id: NodeId) -> String {
        let naming = self.naming();
        let node = ir.node(id);
        let class_name = naming.class_name(node);
        let variable = naming.variable(&class_name);

        let mut output = format!(
            "  Jsonipc::Enum<{}> {} (\"{}\");\n",
            class_name,
            variable,
            naming.runtime_name(node)
        );
        let entries: Vec<String> = node
            .options
            .iter()
            .map(|opt| {
                format!(
                    ".set ({}, \"{}\") // {}",
                    qualified_name("::", node, Some(&opt.ident)),
                    enum_wire_tag(node, opt),
                    opt.value
                )
            })
            .collect();
        output.push_str(&chained_block(&variable, &entries));
        output
    }

    fn generate_base_object(&self, _ir: &UnitIr<'_>) -> String {
        let naming = self.naming();
        format!(
            "  Jsonipc::Class<{}> {} (\"{}\");\n",
            naming.base_object_class,
            naming.variable(naming.base_object_class),
            naming.base_object_runtime
        )
    }

    fn generate_record(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        let class_name = naming.class_name(node);
        let variable = naming.variable(&class_name);

        let mut output = format!(
            "  Jsonipc::Serializable<{}> {} (\"{}\");\n",
            class_name,
            variable,
            naming.runtime_name(node)
        );
        let entries: Vec<String> = node
            .fields
            .iter()
            .map(|f| format!(".set (\"{}\", &{}::{})", f.name, class_name, f.name))
            .collect();
        output.push_str(&chained_block(&variable, &entries));
        output
    }

    fn generate_interface(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        let class_name = naming.class_name(node);
        let variable = naming.variable(&class_name);

        let mut output = format!(
            "  Jsonipc::Class<{}> {} (\"{}\");\n",
            class_name,
            variable,
            naming.iface_runtime_name(node)
        );

        let mut entries = Vec::new();
        for &base in &class.bases {
            let base = ir.node(base);
            entries.push(format!(
                ".inherit<{}> (\"{}\")",
                naming.class_name(base),
                naming.iface_runtime_name(base)
            ));
        }
        if class.bases.is_empty() {
            entries.push(format!(
                ".inherit<{}> (\"{}\")",
                naming.base_object_class, naming.base_object_runtime
            ));
        }
        for field in &node.fields {
            entries.push(format!(
                ".set (\"{0}\", &{1}::{0}, &{1}::{0})",
                field.name, class_name
            ));
        }
        for method in &node.methods {
            entries.push(format!(".set (\"{0}\", &{1}::{0})", method.name, class_name));
        }

        output.push_str(&chained_block(&variable, &entries));
        output
    }

    fn generate_implementation(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        let impl_name = naming.impl_class_name(node);
        let variable = naming.variable(&impl_name);

        let mut output = format!(
            "  Jsonipc::Class<{}> {} (\"{}\");\n",
            impl_name,
            variable,
            naming.runtime_name(node)
        );
        let inherit = format!(
            ".inherit<{}> (\"{}\")",
            naming.class_name(node),
            naming.iface_runtime_name(node)
        );
        output.push_str(&chained_block(&variable, &[inherit]));
        output
    }

    fn end_unit(&self, _ir: &UnitIr<'_>) -> String {
        "}\n".to_string()
    }
}
