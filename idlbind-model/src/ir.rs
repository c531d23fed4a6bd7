//! Intermediate representation for code generation.
//!
//! This module provides the validated, partitioned view of a compilation unit
//! the backends walk: the resolved namespace, enums and class-like types in
//! declaration order, and the direct bases of every interface.

use crate::ancestry::AncestryResolver;
use crate::error::ModelError;
use crate::types::{NodeId, Storage, TypeGraph, TypeNode};
use crate::validation::{Namespace, resolve_namespace};

/// Class-like type (record, sequence or interface) ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    /// Node id.
    pub id: NodeId,
    /// Storage kind.
    pub storage: Storage,
    /// Direct bases (interfaces only, empty otherwise).
    pub bases: Vec<NodeId>,
}

/// Validated view of one compilation unit.
#[derive(Debug, Clone)]
pub struct UnitIr<'g> {
    graph: &'g TypeGraph,
    /// Resolved namespace, `None` when the unit has no eligible types.
    pub namespace: Option<Namespace>,
    /// Enum types in declaration order.
    pub enums: Vec<NodeId>,
    /// Class-like types in declaration order.
    pub classes: Vec<ResolvedClass>,
    /// Forward declarations that were skipped.
    pub skipped_forward: usize,
}

impl<'g> UnitIr<'g> {
    /// Creates the intermediate representation for a graph.
    ///
    /// Only nodes flagged as implementation types take part. Forward
    /// declarations are skipped after namespace validation.
    ///
    /// # Errors
    /// Returns [`ModelError`] if the eligible nodes do not share exactly one
    /// single-level namespace or if the prerequisite graph has a cycle.
    pub fn from_graph(graph: &'g TypeGraph) -> Result<Self, ModelError> {
        let mut ir = Self {
            graph,
            namespace: None,
            enums: Vec::new(),
            classes: Vec::new(),
            skipped_forward: 0,
        };

        let eligible: Vec<(NodeId, &TypeNode)> =
            graph.nodes().filter(|(_, node)| node.is_impl).collect();
        if eligible.is_empty() {
            return Ok(ir);
        }

        ir.namespace = Some(resolve_namespace(eligible.iter().map(|(_, node)| *node))?);
        let ancestry = AncestryResolver::new(graph)?;

        for (id, node) in eligible {
            if node.is_forward {
                ir.skipped_forward += 1;
                continue;
            }
            match node.storage {
                Storage::Enum => ir.enums.push(id),
                Storage::Interface => ir.classes.push(ResolvedClass {
                    id,
                    storage: node.storage,
                    bases: ancestry.direct_bases(id),
                }),
                Storage::Record | Storage::Sequence => ir.classes.push(ResolvedClass {
                    id,
                    storage: node.storage,
                    bases: Vec::new(),
                }),
                Storage::Other => {}
            }
        }

        Ok(ir)
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// Returns the node for an id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &'g TypeNode {
        self.graph.node(id)
    }

    /// Returns true if nothing is eligible for emission.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.classes.is_empty()
    }

    /// Returns true if any class-like type is present.
    #[must_use]
    pub fn has_classes(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Iterates over class-like types of one storage kind.
    pub fn classes_of(&self, storage: Storage) -> impl Iterator<Item = &ResolvedClass> {
        self.classes.iter().filter(move |c| c.storage == storage)
    }

    /// Iterates over interfaces in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &ResolvedClass> {
        self.classes_of(Storage::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnumOption;

    #[test]
    fn test_unit_ir_partitions_in_declaration_order() {
        let mut graph = TypeGraph::new();
        let mode = graph.add(
            TypeNode::new("Mode", Storage::Enum)
                .with_namespace("Audio")
                .with_option(EnumOption::new("Fast", "Fast", "", 0)),
        );
        let point = graph.add(TypeNode::new("Point", Storage::Record).with_namespace("Audio"));
        let base = graph.add(TypeNode::new("Base", Storage::Interface).with_namespace("Audio"));
        let list = graph.add(TypeNode::new("List", Storage::Sequence).with_namespace("Audio"));
        let derived = graph.add(
            TypeNode::new("Derived", Storage::Interface)
                .with_namespace("Audio")
                .with_prerequisite(base),
        );
        graph.add(TypeNode::new("Opaque", Storage::Other).with_namespace("Audio"));

        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        assert_eq!(ir.namespace.as_ref().map(Namespace::as_str), Some("Audio"));
        assert_eq!(ir.enums, vec![mode]);
        let ids: Vec<NodeId> = ir.classes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![point, base, list, derived]);
        let ifaces: Vec<&ResolvedClass> = ir.interfaces().collect();
        assert_eq!(ifaces.len(), 2);
        assert!(ifaces[0].bases.is_empty());
        assert_eq!(ifaces[1].bases, vec![base]);
        assert!(ir.has_classes());
    }

    #[test]
    fn test_unit_ir_ignores_reference_types() {
        let mut graph = TypeGraph::new();
        let external = graph.add(
            TypeNode::new("Object", Storage::Interface)
                .with_namespace("Aida")
                .with_impl(false),
        );
        graph.add(
            TypeNode::new("Widget", Storage::Interface)
                .with_namespace("App")
                .with_prerequisite(external),
        );

        let ir = UnitIr::from_graph(&graph).expect("reference types do not count");
        assert_eq!(ir.namespace.as_ref().map(Namespace::as_str), Some("App"));
        assert_eq!(ir.classes.len(), 1);
        assert_eq!(ir.classes[0].bases, vec![external]);
    }

    #[test]
    fn test_unit_ir_skips_forward_declarations() {
        let mut graph = TypeGraph::new();
        graph.add(
            TypeNode::new("Widget", Storage::Interface)
                .with_namespace("App")
                .forward(),
        );
        graph.add(TypeNode::new("Point", Storage::Record).with_namespace("App"));

        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        assert_eq!(ir.skipped_forward, 1);
        assert_eq!(ir.classes.len(), 1);
    }

    #[test]
    fn test_unit_ir_emits_definition_of_forward_declared_type() {
        let mut graph = TypeGraph::new();
        graph.add(
            TypeNode::new("Window", Storage::Interface)
                .with_namespace("App")
                .forward(),
        );
        let window = graph.add(TypeNode::new("Window", Storage::Interface).with_namespace("App"));
        let widget = graph.add(
            TypeNode::new("Widget", Storage::Interface)
                .with_namespace("App")
                .with_prerequisite(window),
        );

        let ir = UnitIr::from_graph(&graph).expect("valid unit");
        assert_eq!(ir.skipped_forward, 1);
        let ids: Vec<NodeId> = ir.classes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![window, widget]);
        assert_eq!(ir.classes[1].bases, vec![window]);
    }

    #[test]
    fn test_unit_ir_empty() {
        let graph = TypeGraph::new();
        let ir = UnitIr::from_graph(&graph).expect("empty is valid");
        assert!(ir.namespace.is_none());
        assert!(ir.is_empty());
        assert!(!ir.has_classes());
    }

    #[test]
    fn test_unit_ir_rejects_two_namespaces() {
        let mut graph = TypeGraph::new();
        graph.add(TypeNode::new("A", Storage::Record).with_namespace("Audio"));
        graph.add(TypeNode::new("B", Storage::Record).with_namespace("Video"));

        let err = UnitIr::from_graph(&graph).expect_err("two namespaces");
        assert!(matches!(err, ModelError::NamespaceCount { count: 2, .. }));
    }
}
