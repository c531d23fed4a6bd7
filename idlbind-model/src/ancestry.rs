//! Ancestry resolution over the prerequisite graph.
//!
//! The transitive ancestor set of every node is computed once, in
//! topological order, so ancestor tests during base linearization are plain
//! set lookups. Cycles are rejected up front.

use crate::error::ModelError;
use crate::ident::qualified_name;
use crate::types::{NodeId, TypeGraph};
use std::collections::BTreeSet;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Precomputed reachability table for one [`TypeGraph`].
#[derive(Debug, Clone)]
pub struct AncestryResolver<'g> {
    graph: &'g TypeGraph,
    ancestors: Vec<BTreeSet<NodeId>>,
}

impl<'g> AncestryResolver<'g> {
    /// Builds the ancestor table for `graph`.
    ///
    /// # Errors
    /// Returns [`ModelError::CyclicPrerequisites`] if a node is reachable from
    /// itself through prerequisites.
    pub fn new(graph: &'g TypeGraph) -> Result<Self, ModelError> {
        let mut marks = vec![Mark::Unvisited; graph.len()];
        let mut ancestors = vec![BTreeSet::new(); graph.len()];
        let mut path = Vec::new();

        for id in graph.ids() {
            visit(graph, id, &mut marks, &mut ancestors, &mut path)?;
        }

        Ok(Self { graph, ancestors })
    }

    /// Returns the graph this table was built for.
    #[must_use]
    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    /// Returns true if `parent` is reachable from `child` through prerequisites.
    #[must_use]
    pub fn is_ancestor(&self, child: NodeId, parent: NodeId) -> bool {
        self.ancestors[child.index()].contains(&parent)
    }

    /// Returns every transitive ancestor of `id`.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        &self.ancestors[id.index()]
    }

    /// Reduces the prerequisites of `id` to its direct, non-redundant bases.
    ///
    /// A prerequisite is dropped when another prerequisite equals it or
    /// already has it as an ancestor. The result keeps input order.
    #[must_use]
    pub fn direct_bases(&self, id: NodeId) -> Vec<NodeId> {
        let mut candidates = self.graph.node(id).prerequisites.clone();
        let mut reduced: Vec<NodeId> = Vec::with_capacity(candidates.len());

        while let Some(p) = candidates.pop() {
            let implied = candidates
                .iter()
                .chain(reduced.iter())
                .any(|&c| c == p || self.is_ancestor(c, p));
            if !implied {
                reduced.insert(0, p);
            }
        }

        reduced
    }
}

fn visit(
    graph: &TypeGraph,
    id: NodeId,
    marks: &mut [Mark],
    ancestors: &mut [BTreeSet<NodeId>],
    path: &mut Vec<NodeId>,
) -> Result<(), ModelError> {
    match marks[id.index()] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let start = path.iter().position(|&p| p == id).unwrap_or(0);
            let mut names: Vec<String> = path[start..]
                .iter()
                .map(|&p| qualified_name("::", graph.node(p), None))
                .collect();
            names.push(qualified_name("::", graph.node(id), None));
            return Err(ModelError::CyclicPrerequisites {
                path: names.join(" -> "),
            });
        }
        Mark::Unvisited => {}
    }

    marks[id.index()] = Mark::InProgress;
    path.push(id);

    let mut reachable = BTreeSet::new();
    for &p in &graph.node(id).prerequisites {
        visit(graph, p, marks, ancestors, path)?;
        reachable.insert(p);
        reachable.extend(ancestors[p.index()].iter().copied());
    }

    path.pop();
    ancestors[id.index()] = reachable;
    marks[id.index()] = Mark::Done;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Storage, TypeNode};

    fn iface(name: &str) -> TypeNode {
        TypeNode::new(name, Storage::Interface).with_namespace("App")
    }

    #[test]
    fn test_is_ancestor_transitive() {
        let mut graph = TypeGraph::new();
        let c = graph.add(iface("C"));
        let b = graph.add(iface("B").with_prerequisite(c));
        let a = graph.add(iface("A").with_prerequisite(b));

        let resolver = AncestryResolver::new(&graph).expect("acyclic");
        assert!(resolver.is_ancestor(a, b));
        assert!(resolver.is_ancestor(a, c));
        assert!(resolver.is_ancestor(b, c));
        assert!(!resolver.is_ancestor(c, a));
        assert!(!resolver.is_ancestor(a, a));
        assert_eq!(resolver.ancestors(a).len(), 2);
    }

    #[test]
    fn test_direct_bases_chain_is_minimal() {
        let mut graph = TypeGraph::new();
        let c = graph.add(iface("C"));
        let b = graph.add(iface("B").with_prerequisite(c));
        let a = graph.add(iface("A").with_prerequisite(b));
        let x = graph.add(
            iface("X")
                .with_prerequisite(a)
                .with_prerequisite(b)
                .with_prerequisite(c),
        );

        let resolver = AncestryResolver::new(&graph).expect("acyclic");
        assert_eq!(resolver.direct_bases(x), vec![a]);
    }

    #[test]
    fn test_direct_bases_chain_order_independent() {
        let mut graph = TypeGraph::new();
        let c = graph.add(iface("C"));
        let b = graph.add(iface("B").with_prerequisite(c));
        let a = graph.add(iface("A").with_prerequisite(b));
        let x = graph.add(
            iface("X")
                .with_prerequisite(c)
                .with_prerequisite(b)
                .with_prerequisite(a),
        );

        let resolver = AncestryResolver::new(&graph).expect("acyclic");
        assert_eq!(resolver.direct_bases(x), vec![a]);
    }

    #[test]
    fn test_direct_bases_diamond() {
        let mut graph = TypeGraph::new();
        let a = graph.add(iface("A"));
        let b = graph.add(iface("B").with_prerequisite(a));
        let c = graph.add(iface("C").with_prerequisite(a));
        let d = graph.add(iface("D").with_prerequisite(b).with_prerequisite(c));

        let resolver = AncestryResolver::new(&graph).expect("acyclic");
        assert_eq!(resolver.direct_bases(d), vec![b, c]);
        assert_eq!(resolver.direct_bases(b), vec![a]);
        assert!(resolver.direct_bases(a).is_empty());
    }

    #[test]
    fn test_direct_bases_collapses_duplicates() {
        let mut graph = TypeGraph::new();
        let a = graph.add(iface("A"));
        let b = graph.add(iface("B"));
        let x = graph.add(
            iface("X")
                .with_prerequisite(a)
                .with_prerequisite(b)
                .with_prerequisite(a),
        );

        let resolver = AncestryResolver::new(&graph).expect("acyclic");
        assert_eq!(resolver.direct_bases(x), vec![a, b]);
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = TypeGraph::new();
        let a = graph.add(iface("A"));
        let b = graph.add(iface("B").with_prerequisite(a));
        graph.node_mut(a).prerequisites.push(b);

        let err = AncestryResolver::new(&graph).expect_err("cycle");
        assert_eq!(
            err,
            ModelError::CyclicPrerequisites {
                path: "App::A -> App::B -> App::A".to_string()
            }
        );
    }

    #[test]
    fn test_self_prerequisite_is_cycle() {
        let mut graph = TypeGraph::new();
        let a = graph.add(iface("A"));
        graph.node_mut(a).prerequisites.push(a);

        assert!(matches!(
            AncestryResolver::new(&graph),
            Err(ModelError::CyclicPrerequisites { .. })
        ));
    }
}
