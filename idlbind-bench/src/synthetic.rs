//! Synthetic inheritance graphs.
//!
//! Every builder places its types in the single namespace [`NAMESPACE`] so
//! the graphs pass unit validation.

use idlbind_model::{EnumOption, Method, NodeId, Storage, TypeGraph, TypeNode};
use std::fmt::Write;

/// Namespace of all synthetic types.
pub const NAMESPACE: &str = "Bench";

fn interface(name: String) -> TypeNode {
    TypeNode::new(name, Storage::Interface)
        .with_namespace(NAMESPACE)
        .with_field("label", "String")
        .with_method(Method::new("update", "void").with_param("value", "int"))
}

/// Builds a single inheritance chain of `depth` interfaces.
///
/// Every interface lists all of its ancestors as prerequisites, so base
/// reduction has to discard all but the nearest one.
#[must_use]
pub fn chain_graph(depth: usize) -> TypeGraph {
    let mut graph = TypeGraph::new();
    let mut ancestors: Vec<NodeId> = Vec::with_capacity(depth);
    for i in 0..depth {
        let node = ancestors
            .iter()
            .fold(interface(format!("Chain{i}")), |n, &a| n.with_prerequisite(a));
        ancestors.push(graph.add(node));
    }
    graph
}

/// Builds `layers` layers of `width` interfaces, each deriving from every
/// interface of the previous layer, plus one enum and one record.
#[must_use]
pub fn lattice_graph(layers: usize, width: usize) -> TypeGraph {
    let mut graph = TypeGraph::new();
    graph.add(
        TypeNode::new("Level", Storage::Enum)
            .with_namespace(NAMESPACE)
            .with_option(EnumOption::new("Low", "Low", "", 0))
            .with_option(EnumOption::new("High", "High", "", 1)),
    );
    graph.add(
        TypeNode::new("Sample", Storage::Record)
            .with_namespace(NAMESPACE)
            .with_field("x", "float64")
            .with_field("y", "float64"),
    );

    let mut previous: Vec<NodeId> = Vec::new();
    for layer in 0..layers {
        let mut current = Vec::with_capacity(width);
        for column in 0..width {
            let node = previous.iter().fold(
                interface(format!("Node{layer}x{column}")),
                |n, &p| n.with_prerequisite(p),
            );
            current.push(graph.add(node));
        }
        previous = current;
    }
    graph
}

/// Renders [`lattice_graph`] as an XML model document.
#[must_use]
pub fn lattice_xml(layers: usize, width: usize) -> String {
    let mut xml = String::from("<unit file=\"bench.idl\">\n");
    let _ = writeln!(
        xml,
        "  <type name=\"Level\" storage=\"enum\" namespace=\"{NAMESPACE}\">\
         <option name=\"Low\" value=\"0\"/><option name=\"High\" value=\"1\"/></type>"
    );
    for layer in 0..layers {
        for column in 0..width {
            let _ = write!(
                xml,
                "  <type name=\"Node{layer}x{column}\" storage=\"interface\" namespace=\"{NAMESPACE}\">"
            );
            if layer > 0 {
                for p in 0..width {
                    let _ = write!(xml, "<prerequisite ref=\"Node{}x{p}\"/>", layer - 1);
                }
            }
            xml.push_str("<field name=\"label\" type=\"String\"/><method name=\"update\"/></type>\n");
        }
    }
    xml.push_str("</unit>\n");
    xml
}
