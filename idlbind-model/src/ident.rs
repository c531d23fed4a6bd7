//! Identifier mapping shared by all backends.
//!
//! Pure functions turning type nodes and member names into qualified names,
//! bare identifiers and enum wire tags.

use crate::types::TypeNode;

/// Returns the enclosing namespace names of a node, empty entries stripped.
#[must_use]
pub fn namespace_names(node: &TypeNode) -> Vec<&str> {
    node.namespaces
        .iter()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Joins namespaces, the type name and an optional member with `sep`.
///
/// ```
/// use idlbind_model::{Storage, TypeNode, qualified_name};
///
/// let node = TypeNode::new("Mode", Storage::Enum).with_namespace("Audio");
/// assert_eq!(qualified_name("::", &node, None), "Audio::Mode");
/// assert_eq!(qualified_name("::", &node, Some("Fast")), "Audio::Mode::Fast");
/// assert_eq!(qualified_name("", &node, None), "AudioMode");
/// ```
#[must_use]
pub fn qualified_name(sep: &str, node: &TypeNode, member: Option<&str>) -> String {
    let mut parts = namespace_names(node);
    parts.push(&node.name);
    if let Some(member) = member {
        parts.push(member);
    }
    parts.join(sep)
}

/// Replaces every run of characters outside `[A-Za-z0-9_]` with one `_`.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push('_');
            in_run = true;
        }
    }
    result
}

/// Lower-cases `name` and replaces every run of non-alphanumerics with one `-`.
#[must_use]
pub fn enum_tag_string(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut result = String::with_capacity(lower.len());
    let mut in_run = false;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push('-');
            in_run = true;
        }
    }
    result
}
