//! V8 engine backend built on `v8pp`.
//!
//! Output is a `V8stub` struct holding one `v8pp::class_` per class-like
//! type plus a module, and a constructor body that registers enums,
//! records, sequences and remote-handle interfaces in phase order.

use super::{Backend, chained_block};
use crate::naming::{NamingTable, RESERVED_RUNTIME_NAMES, enum_wire_tag};
use idlbind_model::{Namespace, NodeId, ResolvedClass, Storage, TypeNode, UnitIr, qualified_name};

/// Naming conventions of the V8 backend.
pub const V8_NAMING: NamingTable = NamingTable {
    iface_class_suffix: "H",
    iface_runtime_suffix: "",
    impl_class_suffix: "",
    base_object_class: "Aida::RemoteHandle",
    base_object_runtime: "AidaRemoteHandle",
    variable_prefix: "",
    variable_suffix: "_class_",
    reserved: RESERVED_RUNTIME_NAMES,
};

const ALIAS_PREFIX: &str = "V8ppType_";

/// Backend generating `v8pp` registration stubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct V8Backend;

impl V8Backend {
    /// Creates a new V8 backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn alias(node: &TypeNode) -> String {
        format!("{}{}", ALIAS_PREFIX, qualified_name("", node, None))
    }

    fn base_alias(&self) -> String {
        format!("{}{}", ALIAS_PREFIX, self.naming().base_object_runtime)
    }

    fn convert_specialisations(&self, ir: &UnitIr<'_>) -> String {
        let base = self.naming().base_object_class;
        let mut output = String::from("\n// v8pp::convert<> specialisations\nnamespace v8pp {\n");
        output.push_str(&convert_line(base, &format!("convert_AidaRemoteHandle<{base}>")));
        output.push_str(&convert_line(
            &format!("{base}*"),
            &format!("convert_AidaRemoteHandle<{base}*>"),
        ));

        for class in &ir.classes {
            let name = self.naming().class_name(ir.node(class.id));
            match class.storage {
                Storage::Interface => {
                    let handle = format!("convert_AidaRemoteHandle<{name}>");
                    let pointer = format!("convert_AidaRemoteHandle<{name}*>");
                    output.push_str(&convert_line(&name, &handle));
                    output.push_str(&convert_line(&format!("{name}*"), &pointer));
                    output.push_str(&convert_line(&format!("Aida::RemoteMember<{name}>"), &handle));
                    output.push_str(&convert_line(&format!("Aida::RemoteMember<{name}>*"), &pointer));
                }
                Storage::Sequence => {
                    output.push_str(&convert_line(&name, &format!("convert_AidaSequence<{name}>")));
                }
                _ => {}
            }
        }

        output.push_str("} // v8pp\n");
        output
    }
}

fn convert_line(target: &str, converter: &str) -> String {
    format!(
        "template<> struct convert{:<40} : {} {{}};\n",
        format!("<{target}>"),
        converter
    )
}

impl Backend for V8Backend {
    fn name(&self) -> &'static str {
        "v8"
    }

    fn naming(&self) -> &NamingTable {
        &V8_NAMING
    }

    fn include_dir(&self) -> &'static str {
        "v8"
    }

    fn banner(&self) -> &'static str {
        "// === Generated by idlbind-codegen/v8 ===            -*-mode:c++;-*-"
    }

    fn includes(&self) -> String {
        "#include \"v8pp/context.hpp\"\n\
         #include \"v8pp/module.hpp\"\n\
         #include \"v8pp/class.hpp\"\n"
            .to_string()
    }

    fn begin_unit(&self, ir: &UnitIr<'_>, _namespace: &Namespace) -> String {
        let naming = self.naming();
        let mut members: Vec<(String, String)> = Vec::new();
        let mut output = String::new();

        if ir.has_classes() {
            output.push_str("\n// v8pp::class_ aliases\n");
            let base_alias = self.base_alias();
            output.push_str(&format!(
                "typedef {:<40} {};\n",
                format!("v8pp::class_<{}>", naming.base_object_class),
                base_alias
            ));
            members.push((base_alias, naming.variable(naming.base_object_class)));

            for class in &ir.classes {
                let node = ir.node(class.id);
                let name = naming.class_name(node);
                let alias = Self::alias(node);
                output.push_str(&format!(
                    "typedef {:<40} {};\n",
                    format!("v8pp::class_<{name}>"),
                    alias
                ));
                members.push((alias, naming.variable(&name)));
            }

            output.push_str(&self.convert_specialisations(ir));
        }

        output.push_str("\n// Main binding stub\nstruct V8stub final {\n");
        output.push_str(&format!("  {:<40} *const isolate_;\n", "v8::Isolate"));
        for (alias, variable) in &members {
            output.push_str(&format!("  {alias:<40} {variable};\n"));
        }
        output.push_str(&format!("  {:<40} module_;\n", "v8pp::module"));
        output.push_str("public:\n  V8stub (v8::Isolate *const isolate);\n};\n");

        output.push_str("\nV8stub::V8stub (v8::Isolate *const isolate) :\n");
        output.push_str("  isolate_ (isolate),\n");
        for (_, variable) in &members {
            output.push_str(&format!("  {variable} (isolate),\n"));
        }
        output.push_str("  module_ (isolate)\n{\n");
        output
    }

    fn generate_enum(&self, ir: &UnitIr<'_>, id: NodeId) -> String {
        let naming = self.naming();
        let node = ir.node(id);
        let module = format!("{}_enum_", qualified_name("_", node, None));

        let mut output = format!("  v8pp::module {module} (isolate);\n");
        let entries: Vec<String> = node
            .options
            .iter()
            .map(|opt| {
                format!(
                    ".set_const (\"{}\", \"{}\") // {}",
                    opt.ident,
                    enum_wire_tag(node, opt),
                    opt.value
                )
            })
            .collect();
        output.push_str(&chained_block(&module, &entries));
        output.push_str(&format!(
            "  module_.set (\"{}\", {});\n",
            naming.runtime_name(node),
            module
        ));
        output
    }

    fn generate_base_object(&self, _ir: &UnitIr<'_>) -> String {
        let naming = self.naming();
        format!(
            "  module_.set (\"{}\", {});\n",
            naming.base_object_runtime,
            naming.variable(naming.base_object_class)
        )
    }

    fn generate_record(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        let name = naming.class_name(node);
        let variable = naming.variable(&name);

        let mut output = format!("  {variable}.ctor();\n");
        let entries: Vec<String> = node
            .fields
            .iter()
            .map(|f| format!(".set (\"{0}\", &{1}::{0})", f.name, name))
            .collect();
        output.push_str(&chained_block(&variable, &entries));
        output
    }

    fn generate_sequence(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let variable = naming.variable(&naming.class_name(ir.node(class.id)));
        format!("  {variable}.ctor();\n")
    }

    fn generate_interface(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        let name = naming.class_name(node);

        let mut entries: Vec<String> = class
            .bases
            .iter()
            .map(|&base| format!(".inherit<{}>()", naming.class_name(ir.node(base))))
            .collect();
        if entries.is_empty() {
            entries.push(format!(".inherit<{}>()", naming.base_object_class));
        }
        for field in &node.fields {
            entries.push(format!(
                ".set (\"{0}\", v8pp::property (&{1}::{0}, &{1}::{0}))",
                field.name, name
            ));
        }
        for method in &node.methods {
            entries.push(format!(".set (\"{0}\", &{1}::{0})", method.name, name));
        }

        chained_block(&naming.variable(&name), &entries)
    }

    fn generate_implementation(&self, ir: &UnitIr<'_>, class: &ResolvedClass) -> String {
        let naming = self.naming();
        let node = ir.node(class.id);
        format!(
            "  aida_remote_handle_wrapper_map (Aida::TypeHash ({}), aida_remote_handle_wrapper_impl<{}>);\n",
            ir.graph().type_hash(class.id).to_c_literal(),
            naming.class_name(node)
        )
    }

    fn end_unit(&self, ir: &UnitIr<'_>) -> String {
        let naming = self.naming();
        let mut output = String::new();
        for class in &ir.classes {
            let node = ir.node(class.id);
            output.push_str(&format!(
                "  module_.set (\"{}\", {});\n",
                naming.runtime_name(node),
                naming.variable(&naming.class_name(node))
            ));
        }
        output.push_str("}\n");
        output
    }
}
