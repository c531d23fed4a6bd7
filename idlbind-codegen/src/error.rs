//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model loading error.
    #[error("model parse error: {0}")]
    Parse(#[from] idlbind_model::ParseError),

    /// Model-shape error (namespaces, prerequisite cycles).
    #[error("model error: {0}")]
    Model(#[from] idlbind_model::ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Standard output was requested as the output destination.
    #[error("-: stdout is not supported for generation of multiple files")]
    StdoutOutput,

    /// Not exactly one input file was configured.
    #[error("exactly one IDL input file is required ({count} given)")]
    InputFileCount {
        /// Number of configured input files.
        count: usize,
    },

    /// No backend registered under the requested name.
    #[error("unknown backend '{name}'")]
    UnknownBackend {
        /// Requested backend name.
        name: String,
    },
}

impl CodegenError {
    /// Returns true for host-configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::StdoutOutput | Self::InputFileCount { .. } | Self::UnknownBackend { .. }
        )
    }
}
