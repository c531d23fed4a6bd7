//! Host driver: runs one backend for one compilation unit.

use crate::backend::Backend;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::generator::Generator;
use idlbind_model::{TypeGraph, UnitIr};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of a backend run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stub source was written.
    Generated {
        /// Destination path.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Only the include directory was requested.
    IncludePath(PathBuf),
}

/// Runs backend `B` with its default construction.
///
/// # Errors
/// See [`run_with`].
pub fn run_backend<B: Backend + Default>(
    graph: &TypeGraph,
    config: &GeneratorConfig,
) -> Result<RunOutcome, CodegenError> {
    run_with(&B::default(), graph, config)
}

/// Runs `backend` for `graph` and writes the output file.
///
/// With `--print-include-path` no output is generated; the backend's runtime
/// include directory is returned instead. The output file is written only
/// after generation completed.
///
/// # Errors
/// Returns `CodegenError` on invalid configuration, an invalid unit or when
/// the output cannot be written.
pub fn run_with(
    backend: &dyn Backend,
    graph: &TypeGraph,
    config: &GeneratorConfig,
) -> Result<RunOutcome, CodegenError> {
    if config.print_include_path() {
        let path = config.include_root_path().join(backend.include_dir());
        info!(backend = backend.name(), path = %path.display(), "include path requested");
        return Ok(RunOutcome::IncludePath(path));
    }

    config.validate()?;
    let text = generate_unit(backend, graph, config)?;

    let path = config.output_path();
    std::fs::write(&path, text.as_bytes())?;
    info!(
        backend = backend.name(),
        path = %path.display(),
        bytes = text.len(),
        "stub written"
    );

    Ok(RunOutcome::Generated {
        path,
        bytes: text.len(),
    })
}

/// Validates `graph` and generates the stub source without writing it.
///
/// # Errors
/// Returns [`CodegenError::Model`] if the unit violates the namespace
/// invariant or has cyclic prerequisites.
pub fn generate_unit(
    backend: &dyn Backend,
    graph: &TypeGraph,
    config: &GeneratorConfig,
) -> Result<String, CodegenError> {
    let ir = UnitIr::from_graph(graph)?;
    let mut generator = Generator::new(&ir, backend);
    if let Some(source) = config.source_name() {
        debug!(source = %source, "source line");
        generator = generator.with_source(source);
    }
    Ok(generator.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonipcBackend, V8Backend};
    use crate::config::PRINT_INCLUDE_PATH;
    use idlbind_model::parse_unit;

    const UNIT: &str = r#"<unit file="app.idl">
    <type name="Widget" storage="interface" namespace="App"/>
</unit>"#;

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("app_jsonipc.cc");
        let graph = parse_unit(UNIT).expect("Failed to parse unit");
        let config = GeneratorConfig::new()
            .output(out.to_string_lossy())
            .file("/src/app.idl")
            .backend_option("strip-path=/src/");

        let outcome = run_backend::<JsonipcBackend>(&graph, &config).expect("run");
        let written = std::fs::read_to_string(&out).expect("output file");

        assert_eq!(
            outcome,
            RunOutcome::Generated {
                path: out.clone(),
                bytes: written.len()
            }
        );
        assert!(written.contains("// Source: app.idl\n"));
        assert!(written.contains("App_jsonipc_stub ()"));
    }

    #[test]
    fn test_print_include_path_skips_generation() {
        let graph = parse_unit(UNIT).expect("Failed to parse unit");
        let config = GeneratorConfig::new()
            .output("-")
            .backend_option(PRINT_INCLUDE_PATH)
            .include_root("/usr/share/idlbind");

        let outcome = run_backend::<V8Backend>(&graph, &config).expect("run");
        assert_eq!(
            outcome,
            RunOutcome::IncludePath(PathBuf::from("/usr/share/idlbind/v8"))
        );
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let graph = parse_unit(UNIT).expect("Failed to parse unit");

        let stdout = GeneratorConfig::new().output("-").file("app.idl");
        assert!(matches!(
            run_backend::<JsonipcBackend>(&graph, &stdout),
            Err(CodegenError::StdoutOutput)
        ));

        let two = GeneratorConfig::new().file("a.idl").file("b.idl");
        assert!(matches!(
            run_backend::<JsonipcBackend>(&graph, &two),
            Err(CodegenError::InputFileCount { count: 2 })
        ));
    }

    #[test]
    fn test_namespace_error_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("broken.cc");
        let graph = parse_unit(
            r#"<unit>
    <type name="A" storage="record" namespace="Audio"/>
    <type name="B" storage="record" namespace="Video"/>
</unit>"#,
        )
        .expect("Failed to parse unit");
        let config = GeneratorConfig::new()
            .output(out.to_string_lossy())
            .file("broken.idl");

        let err = run_backend::<V8Backend>(&graph, &config).expect_err("two namespaces");
        assert!(matches!(err, CodegenError::Model(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_unit_without_source() {
        let graph = parse_unit(UNIT).expect("Failed to parse unit");
        let text = generate_unit(&JsonipcBackend::new(), &graph, &GeneratorConfig::new())
            .expect("generate");
        assert!(!text.contains("// Source:"));
    }
}
