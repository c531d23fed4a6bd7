//! Main code generator.

use crate::backend::Backend;
use idlbind_model::{Storage, UnitIr};
use tracing::debug;

/// Walks a unit in phase order and collects a backend's output.
pub struct Generator<'a, 'g> {
    ir: &'a UnitIr<'g>,
    backend: &'a dyn Backend,
    source: Option<String>,
}

impl<'a, 'g> Generator<'a, 'g> {
    /// Creates a new generator for a validated unit.
    #[must_use]
    pub fn new(ir: &'a UnitIr<'g>, backend: &'a dyn Backend) -> Self {
        Self {
            ir,
            backend,
            source: None,
        }
    }

    /// Names the input file in a `Source` comment under the banner.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Generates the complete stub source.
    ///
    /// Phases run in a fixed order: enums, the universal base object (only
    /// when classes exist), records and sequences, interfaces, then
    /// implementations. Each phase keeps declaration order.
    #[must_use]
    pub fn generate(&self) -> String {
        let backend = self.backend;
        let ir = self.ir;
        let mut output = String::new();

        output.push_str(backend.banner());
        output.push('\n');
        if let Some(source) = &self.source {
            output.push_str(&format!("// Source: {}\n", source));
        }
        output.push_str(&backend.includes());

        let Some(namespace) = &ir.namespace else {
            debug!(backend = backend.name(), "no eligible types, header only");
            return output;
        };

        debug!(
            backend = backend.name(),
            namespace = %namespace,
            enums = ir.enums.len(),
            classes = ir.classes.len(),
            skipped_forward = ir.skipped_forward,
            "generating unit"
        );

        output.push_str(&backend.begin_unit(ir, namespace));

        for &id in &ir.enums {
            output.push_str(&backend.generate_enum(ir, id));
        }

        if ir.has_classes() {
            output.push_str(&backend.generate_base_object(ir));
        }

        for class in &ir.classes {
            match class.storage {
                Storage::Record => output.push_str(&backend.generate_record(ir, class)),
                Storage::Sequence => output.push_str(&backend.generate_sequence(ir, class)),
                _ => {}
            }
        }

        for class in ir.interfaces() {
            output.push_str(&backend.generate_interface(ir, class));
        }

        for class in ir.interfaces() {
            output.push_str(&backend.generate_implementation(ir, class));
        }

        output.push_str(&backend.end_unit(ir));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonipcBackend, V8Backend};
    use idlbind_model::parse_unit;

    const MIXED_UNIT: &str = r#"<unit file="mixed.idl">
    <type name="Widget" storage="interface" namespace="App"/>
    <type name="Point" storage="record" namespace="App">
        <field name="x" type="float64"/>
    </type>
    <type name="Mode" storage="enum" namespace="App">
        <option name="On" value="1"/>
    </type>
    <type name="Items" storage="sequence" namespace="App"/>
</unit>"#;

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
    }

    #[test]
    fn test_phase_order_jsonipc() {
        let graph = parse_unit(MIXED_UNIT).expect("Failed to parse unit");
        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        let output = Generator::new(&ir, &JsonipcBackend::new()).generate();

        let enum_at = position(&output, "Jsonipc::Enum<App::Mode>");
        let base_at = position(&output, "Jsonipc::Class<Aida::ImplicitBase>");
        let record_at = position(&output, "Jsonipc::Serializable<App::Point>");
        let iface_at = position(&output, "Jsonipc::Class<App::WidgetIface>");
        let impl_at = position(&output, "Jsonipc::Class<App::WidgetImpl>");

        assert!(enum_at < base_at);
        assert!(base_at < record_at);
        assert!(record_at < iface_at);
        assert!(iface_at < impl_at);
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_phase_order_v8() {
        let graph = parse_unit(MIXED_UNIT).expect("Failed to parse unit");
        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        let output = Generator::new(&ir, &V8Backend::new()).generate();

        let enum_at = position(&output, "module_.set (\"Mode\"");
        let base_at = position(&output, "module_.set (\"AidaRemoteHandle\"");
        let record_at = position(&output, "App_Point_class_.ctor();");
        let sequence_at = position(&output, "App_Items_class_.ctor();");
        let iface_at = position(&output, ".inherit<Aida::RemoteHandle>()");
        let impl_at = position(&output, "aida_remote_handle_wrapper_map");

        assert!(enum_at < base_at);
        assert!(base_at < record_at);
        assert!(record_at < sequence_at);
        assert!(sequence_at < iface_at);
        assert!(iface_at < impl_at);
    }

    #[test]
    fn test_source_line() {
        let graph = parse_unit(MIXED_UNIT).expect("Failed to parse unit");
        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        let output = Generator::new(&ir, &JsonipcBackend::new())
            .with_source("mixed.idl")
            .generate();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some(JsonipcBackend::new().banner()));
        assert_eq!(lines.next(), Some("// Source: mixed.idl"));
    }

    #[test]
    fn test_no_base_object_without_classes() {
        let xml = r#"<unit>
    <type name="Mode" storage="enum" namespace="App">
        <option name="On" value="1"/>
    </type>
</unit>"#;
        let graph = parse_unit(xml).expect("Failed to parse unit");
        let ir = UnitIr::from_graph(&graph).expect("valid unit");

        let jsonipc = Generator::new(&ir, &JsonipcBackend::new()).generate();
        assert!(!jsonipc.contains("ImplicitBase"));

        let v8 = Generator::new(&ir, &V8Backend::new()).generate();
        assert!(!v8.contains("AidaRemoteHandle"));
    }

    #[test]
    fn test_empty_unit_is_header_only() {
        let graph = parse_unit("<unit/>").expect("Failed to parse unit");
        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        let backend = JsonipcBackend::new();
        let output = Generator::new(&ir, &backend).generate();

        assert_eq!(output, format!("{}\n{}", backend.banner(), backend.includes()));
    }
}
