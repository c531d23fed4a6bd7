//! Error types for model loading and validation.

use thiserror::Error;

/// Error type for model loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Prerequisite reference that names no type in the unit.
    #[error("unknown type '{type_name}' referenced as prerequisite of '{referrer}'")]
    UnknownType {
        /// Referenced type name.
        type_name: String,
        /// Type carrying the reference.
        referrer: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, field, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid model structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for model-shape violations detected before emission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The unit spans zero or several distinct namespaces.
    #[error("code generation requires exactly 1 namespace ({count} given: {chains:?})")]
    NamespaceCount {
        /// Number of distinct namespace chains found.
        count: usize,
        /// The distinct chains, `::`-joined.
        chains: Vec<String>,
    },

    /// A namespace chain is deeper than one level.
    #[error("nested namespace '{chain}' unsupported, code generation requires exactly 1 level")]
    NestedNamespace {
        /// The offending chain, `::`-joined.
        chain: String,
    },

    /// A type is declared at the root, outside any namespace.
    #[error("type '{type_name}' is not declared inside a namespace")]
    MissingNamespace {
        /// Type name.
        type_name: String,
    },

    /// The prerequisite graph contains a cycle.
    #[error("circular prerequisite chain detected: {path}")]
    CyclicPrerequisites {
        /// Types along the cycle, `->`-joined.
        path: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}
