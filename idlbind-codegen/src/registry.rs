//! Backend registry.
//!
//! Hosts select a backend by name. Built-in backends register on
//! construction; hosts may add their own entry points.

use crate::backend::{JsonipcBackend, V8Backend};
use crate::config::GeneratorConfig;
use crate::driver::{RunOutcome, run_backend};
use crate::error::CodegenError;
use idlbind_model::TypeGraph;
use tracing::{debug, error, warn};

/// Entry point of a registered backend.
pub type EntryPoint = fn(&TypeGraph, &GeneratorConfig) -> Result<RunOutcome, CodegenError>;

/// One registered backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendRegistration {
    /// Lookup name.
    pub name: &'static str,
    /// One-line description.
    pub doc: &'static str,
    /// Entry point.
    pub entry: EntryPoint,
}

/// Jsonipc registration.
pub const JSONIPC: BackendRegistration = BackendRegistration {
    name: "jsonipc",
    doc: "Jsonipc introspection bindings",
    entry: run_backend::<JsonipcBackend>,
};

/// V8 registration.
pub const V8: BackendRegistration = BackendRegistration {
    name: "v8",
    doc: "V8 engine bindings via v8pp",
    entry: run_backend::<V8Backend>,
};

/// Name-indexed set of backends.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: Vec<BackendRegistration>,
}

impl BackendRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in backends.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.add_backend(JSONIPC);
        registry.add_backend(V8);
        registry
    }

    /// Registers a backend, replacing one of the same name.
    pub fn add_backend(&mut self, registration: BackendRegistration) {
        debug!(name = registration.name, "registering backend");
        match self.backends.iter_mut().find(|b| b.name == registration.name) {
            Some(existing) => *existing = registration,
            None => self.backends.push(registration),
        }
    }

    /// Looks up a backend by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BackendRegistration> {
        self.backends.iter().find(|b| b.name == name)
    }

    /// Iterates over registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.iter().map(|b| b.name)
    }

    /// Runs the named backend.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnknownBackend`] for unregistered names and
    /// otherwise whatever the backend's entry point returns.
    pub fn run(
        &self,
        name: &str,
        graph: &TypeGraph,
        config: &GeneratorConfig,
    ) -> Result<RunOutcome, CodegenError> {
        let result = match self.get(name) {
            Some(backend) => (backend.entry)(graph, config),
            None => Err(CodegenError::UnknownBackend {
                name: name.to_string(),
            }),
        };
        result.inspect_err(|err| {
            if err.is_config() {
                warn!(backend = name, error = %err, "invalid generator configuration");
            } else {
                error!(backend = name, error = %err, "generation failed");
            }
        })
    }
}
