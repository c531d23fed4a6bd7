//! Namespace validation for a compilation unit.
//!
//! Every statement a backend emits is qualified by a single runtime-visible
//! namespace, so the nodes of one unit must agree on exactly one namespace,
//! exactly one level deep.

use crate::error::ModelError;
use crate::types::TypeNode;
use std::fmt;

/// The single namespace a compilation unit resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Returns the namespace name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the single namespace shared by `nodes`.
///
/// Empty (synthetic) namespace entries are stripped, consecutive identical
/// chains are collapsed, and exactly one chain of depth one must remain.
///
/// # Errors
/// Returns [`ModelError::NamespaceCount`] when zero or several distinct
/// chains remain, [`ModelError::NestedNamespace`] for a chain deeper than one
/// level and [`ModelError::MissingNamespace`] for a root-level type.
pub fn resolve_namespace<'a, I>(nodes: I) -> Result<Namespace, ModelError>
where
    I: IntoIterator<Item = &'a TypeNode>,
{
    let mut chains: Vec<(Vec<&str>, &str)> = Vec::new();
    for node in nodes {
        let chain: Vec<&str> = node
            .namespaces
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .collect();
        if chains.last().is_some_and(|(last, _)| *last == chain) {
            continue;
        }
        chains.push((chain, node.name.as_str()));
    }

    let mut distinct: Vec<&Vec<&str>> = Vec::new();
    for (chain, _) in &chains {
        if !distinct.contains(&chain) {
            distinct.push(chain);
        }
    }

    if distinct.len() != 1 {
        return Err(ModelError::NamespaceCount {
            count: distinct.len(),
            chains: distinct.iter().map(|chain| chain.join("::")).collect(),
        });
    }

    let (chain, type_name) = &chains[0];
    match chain.as_slice() {
        [single] => Ok(Namespace((*single).to_string())),
        [] => Err(ModelError::MissingNamespace {
            type_name: (*type_name).to_string(),
        }),
        _ => Err(ModelError::NestedNamespace {
            chain: chain.join("::"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Storage;

    fn node(name: &str, namespaces: &[&str]) -> TypeNode {
        namespaces
            .iter()
            .fold(TypeNode::new(name, Storage::Record), |n, ns| {
                n.with_namespace(*ns)
            })
    }

    #[test]
    fn test_resolve_single_namespace() {
        let nodes = [node("A", &["Audio"]), node("B", &["Audio"])];
        let ns = resolve_namespace(&nodes).expect("single namespace");
        assert_eq!(ns.as_str(), "Audio");
        assert_eq!(ns.to_string(), "Audio");
    }

    #[test]
    fn test_resolve_strips_synthetic_root() {
        let nodes = [node("A", &["", "Audio"]), node("B", &["Audio"])];
        let ns = resolve_namespace(&nodes).expect("synthetic root is stripped");
        assert_eq!(ns.as_str(), "Audio");
    }

    #[test]
    fn test_resolve_multiple_namespaces() {
        let nodes = [
            node("A", &["Audio"]),
            node("B", &["Video"]),
            node("C", &["Audio"]),
        ];
        let err = resolve_namespace(&nodes).expect_err("two namespaces");
        assert_eq!(
            err,
            ModelError::NamespaceCount {
                count: 2,
                chains: vec!["Audio".to_string(), "Video".to_string()],
            }
        );
    }

    #[test]
    fn test_resolve_nested_namespace() {
        let nodes = [node("A", &["Audio", "Codec"])];
        let err = resolve_namespace(&nodes).expect_err("nested");
        assert_eq!(
            err,
            ModelError::NestedNamespace {
                chain: "Audio::Codec".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_root_level_type() {
        let nodes = [node("Loose", &[""])];
        let err = resolve_namespace(&nodes).expect_err("no namespace");
        assert_eq!(
            err,
            ModelError::MissingNamespace {
                type_name: "Loose".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_empty_input() {
        let nodes: [TypeNode; 0] = [];
        let err = resolve_namespace(&nodes).expect_err("nothing to resolve");
        assert!(matches!(err, ModelError::NamespaceCount { count: 0, .. }));
    }
}
