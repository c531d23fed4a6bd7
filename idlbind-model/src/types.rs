//! Type graph definitions.
//!
//! This module contains the data structures handed over by the IDL front end:
//! type nodes with their storage kind, namespaces, prerequisites, members and
//! content fingerprint, collected into a [`TypeGraph`].

use crate::ident::qualified_name;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Index of a node inside its [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the declaration index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Storage kind of a type node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Storage {
    /// Enumeration with named options.
    Enum,
    /// Record (struct) with fields.
    Record,
    /// Homogeneous sequence.
    Sequence,
    /// Interface with properties, methods and multiple inheritance.
    Interface,
    /// Any other kind the front end produces; never emitted.
    Other,
}

impl Storage {
    /// Parses a storage kind from its keyword.
    ///
    /// Unknown keywords map to [`Storage::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "enum" | "enumeration" => Self::Enum,
            "record" => Self::Record,
            "sequence" => Self::Sequence,
            "interface" => Self::Interface,
            _ => Self::Other,
        }
    }

    /// Returns the keyword for this storage kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Sequence => "sequence",
            Self::Interface => "interface",
            Self::Other => "other",
        }
    }

    /// Returns true for kinds registered as runtime classes.
    #[must_use]
    pub const fn is_class_like(self) -> bool {
        matches!(self, Self::Record | Self::Sequence | Self::Interface)
    }
}

/// Content fingerprint of a type, a pair of 64-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHash {
    /// High word.
    pub hi: u64,
    /// Low word.
    pub lo: u64,
}

impl TypeHash {
    /// Creates a fingerprint from its two words.
    #[must_use]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Derives a fingerprint from a structural signature string.
    ///
    /// Uses the first 16 bytes of the SHA-256 digest, big-endian.
    #[must_use]
    pub fn from_signature(signature: &str) -> Self {
        let digest = Sha256::digest(signature.as_bytes());
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&digest[..8]);
        lo.copy_from_slice(&digest[8..16]);
        Self {
            hi: u64::from_be_bytes(hi),
            lo: u64::from_be_bytes(lo),
        }
    }

    /// Parses `"0x<hi>, 0x<lo>"`; `0x` prefixes and `ULL` suffixes are optional.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (hi, lo) = s.split_once(',')?;
        Some(Self {
            hi: parse_hex_word(hi)?,
            lo: parse_hex_word(lo)?,
        })
    }

    /// Formats the fingerprint as two C++ `unsigned long long` literals.
    #[must_use]
    pub fn to_c_literal(&self) -> String {
        format!("0x{:016x}ULL, 0x{:016x}ULL", self.hi, self.lo)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

fn parse_hex_word(s: &str) -> Option<u64> {
    let s = s.trim();
    let s = s.strip_suffix("ULL").unwrap_or(s);
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(s, 16).ok()
}

/// Record member or interface property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Member name.
    pub name: String,
    /// Member type name as written in the IDL.
    pub type_name: String,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type name.
    pub type_name: String,
}

/// Interface operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Return type name.
    pub return_type: String,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
}

impl Method {
    /// Creates a method without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }
}

/// Enumeration option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    /// Symbolic name of the option.
    pub ident: String,
    /// Human readable label.
    pub label: String,
    /// Longer description.
    pub blurb: String,
    /// Numeric value.
    pub value: i64,
}

impl EnumOption {
    /// Creates a new enum option.
    #[must_use]
    pub fn new(
        ident: impl Into<String>,
        label: impl Into<String>,
        blurb: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            ident: ident.into(),
            label: label.into(),
            blurb: blurb.into(),
            value,
        }
    }
}

/// A type declaration from the IDL front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// Unqualified type name.
    pub name: String,
    /// Storage kind.
    pub storage: Storage,
    /// Enclosing namespaces, outermost first. Empty entries are synthetic.
    pub namespaces: Vec<String>,
    /// Ancestors (interfaces) in declaration order.
    pub prerequisites: Vec<NodeId>,
    /// Record members or interface properties.
    pub fields: Vec<Field>,
    /// Interface operations.
    pub methods: Vec<Method>,
    /// Enumeration options.
    pub options: Vec<EnumOption>,
    /// Forward declaration without a body.
    pub is_forward: bool,
    /// Declared by the unit being generated, not merely referenced.
    pub is_impl: bool,
    /// Fingerprint supplied by the front end, if any.
    pub type_hash: Option<TypeHash>,
}

impl TypeNode {
    /// Creates a new generation-eligible node without namespaces or members.
    #[must_use]
    pub fn new(name: impl Into<String>, storage: Storage) -> Self {
        Self {
            name: name.into(),
            storage,
            namespaces: Vec::new(),
            prerequisites: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            options: Vec::new(),
            is_forward: false,
            is_impl: true,
            type_hash: None,
        }
    }

    /// Appends an enclosing namespace (outermost first).
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Appends a prerequisite.
    #[must_use]
    pub fn with_prerequisite(mut self, id: NodeId) -> Self {
        self.prerequisites.push(id);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, type_name));
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends an enum option.
    #[must_use]
    pub fn with_option(mut self, option: EnumOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the implementation flag.
    #[must_use]
    pub fn with_impl(mut self, is_impl: bool) -> Self {
        self.is_impl = is_impl;
        self
    }

    /// Marks the node as a forward declaration.
    #[must_use]
    pub fn forward(mut self) -> Self {
        self.is_forward = true;
        self
    }

    /// Sets an explicit fingerprint.
    #[must_use]
    pub fn with_type_hash(mut self, hash: TypeHash) -> Self {
        self.type_hash = Some(hash);
        self
    }

    /// Returns true if this is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.storage == Storage::Interface
    }
}

/// Ordered collection of type nodes for one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    /// IDL file the nodes were declared in.
    pub file: Option<String>,
    nodes: Vec<TypeNode>,
    /// Qualified-name lookup map (built while adding).
    by_name: HashMap<String, NodeId>,
}

impl TypeGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node in declaration order and returns its id.
    ///
    /// A forward declaration and the full definition of the same type are
    /// both kept; name lookup resolves to the full definition.
    pub fn add(&mut self, node: TypeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = qualified_name("::", &node, None);
        let indexed = match self.by_name.get(&name) {
            Some(&existing) => self.nodes[existing.0].is_forward && !node.is_forward,
            None => true,
        };
        if indexed {
            self.by_name.insert(name, id);
        }
        self.nodes.push(node);
        id
    }

    /// Returns the node for an id.
    ///
    /// # Panics
    /// Panics if the id was issued by another graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.0]
    }

    /// Returns the node for an id, if it belongs to this graph.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TypeNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TypeNode {
        &mut self.nodes[id.0]
    }

    /// Looks up a node by its `::`-qualified name (empty namespaces stripped).
    ///
    /// Prefers the full definition over a forward declaration.
    #[must_use]
    pub fn lookup(&self, qualified: &str) -> Option<NodeId> {
        self.by_name.get(qualified).copied()
    }

    /// Iterates over ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterates over nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TypeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Structural signature the computed fingerprint is derived from.
    #[must_use]
    pub fn signature(&self, id: NodeId) -> String {
        let node = self.node(id);
        let mut signature = format!(
            "{} {}",
            node.storage.keyword(),
            qualified_name("::", node, None)
        );
        if !node.prerequisites.is_empty() {
            let bases: Vec<String> = node
                .prerequisites
                .iter()
                .map(|&p| qualified_name("::", self.node(p), None))
                .collect();
            signature.push_str(": ");
            signature.push_str(&bases.join(","));
        }
        signature
    }

    /// Returns the content fingerprint of a node.
    ///
    /// The front-end supplied hash wins; otherwise it is derived from
    /// [`TypeGraph::signature`].
    #[must_use]
    pub fn type_hash(&self, id: NodeId) -> TypeHash {
        self.node(id)
            .type_hash
            .unwrap_or_else(|| TypeHash::from_signature(&self.signature(id)))
    }
}
