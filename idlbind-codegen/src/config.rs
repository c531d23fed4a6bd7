//! Generator configuration.
//!
//! Hosts hand every backend the same configuration: the output destination,
//! the IDL input files and free-form backend options such as
//! `strip-path=<prefix>` or `--print-include-path`.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// Output destination used when the host names none.
pub const DEFAULT_OUTPUT: &str = "testmodule";
/// Output name that requests standard output; always rejected.
pub const STDOUT_OUTPUT: &str = "-";
/// Backend option asking for the runtime include directory instead of output.
pub const PRINT_INCLUDE_PATH: &str = "--print-include-path";

const STRIP_PATH_PREFIX: &str = "strip-path=";

/// Configuration for one generator run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    output: Option<String>,
    files: Vec<PathBuf>,
    backend_options: Vec<String>,
    include_root: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output destination.
    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Adds an input file.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Adds a backend option.
    #[must_use]
    pub fn backend_option(mut self, option: impl Into<String>) -> Self {
        self.backend_options.push(option.into());
        self
    }

    /// Overrides the directory runtime headers are installed under.
    #[must_use]
    pub fn include_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.include_root = Some(root.into());
        self
    }

    /// Returns the output path, [`DEFAULT_OUTPUT`] if none was set.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.output.as_deref().unwrap_or(DEFAULT_OUTPUT))
    }

    /// Returns the configured input files.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the backend options.
    #[must_use]
    pub fn backend_options(&self) -> &[String] {
        &self.backend_options
    }

    /// Returns the concatenation of every `strip-path=` option value.
    #[must_use]
    pub fn strip_path(&self) -> String {
        self.backend_options
            .iter()
            .filter_map(|opt| opt.strip_prefix(STRIP_PATH_PREFIX))
            .collect()
    }

    /// Returns true if the include directory was requested.
    #[must_use]
    pub fn print_include_path(&self) -> bool {
        self.backend_options.iter().any(|opt| opt == PRINT_INCLUDE_PATH)
    }

    /// Returns the root of the runtime include directories.
    #[must_use]
    pub fn include_root_path(&self) -> PathBuf {
        self.include_root
            .clone()
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("include"))
    }

    /// Returns the input file name for the `Source` line, prefix stripped.
    #[must_use]
    pub fn source_name(&self) -> Option<String> {
        let file = self.files.first()?.to_string_lossy().into_owned();
        let strip = self.strip_path();
        match file.strip_prefix(strip.as_str()) {
            Some(rest) if !strip.is_empty() => Some(rest.to_string()),
            _ => Some(file),
        }
    }

    /// Validates the configuration for a generating run.
    ///
    /// # Errors
    /// Returns [`CodegenError::StdoutOutput`] if the output is `-` and
    /// [`CodegenError::InputFileCount`] unless exactly one file is given.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.output.as_deref() == Some(STDOUT_OUTPUT) {
            return Err(CodegenError::StdoutOutput);
        }
        if self.files.len() != 1 {
            return Err(CodegenError::InputFileCount {
                count: self.files.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        let config = GeneratorConfig::new();
        assert_eq!(config.output_path(), PathBuf::from("testmodule"));
        assert!(!config.print_include_path());
        assert!(config.source_name().is_none());
    }

    #[test]
    fn test_validate_rejects_stdout() {
        let config = GeneratorConfig::new().output("-").file("app.idl");
        assert!(matches!(
            config.validate(),
            Err(CodegenError::StdoutOutput)
        ));
    }

    #[test]
    fn test_validate_file_count() {
        let none = GeneratorConfig::new();
        assert!(matches!(
            none.validate(),
            Err(CodegenError::InputFileCount { count: 0 })
        ));

        let two = GeneratorConfig::new().file("a.idl").file("b.idl");
        assert!(matches!(
            two.validate(),
            Err(CodegenError::InputFileCount { count: 2 })
        ));

        let one = GeneratorConfig::new().file("a.idl").output("out.cc");
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_strip_path() {
        let config = GeneratorConfig::new()
            .file("/build/src/app.idl")
            .backend_option("strip-path=/build/")
            .backend_option("verbose")
            .backend_option("strip-path=src/");

        assert_eq!(config.strip_path(), "/build/src/");
        assert_eq!(config.source_name().as_deref(), Some("app.idl"));
    }

    #[test]
    fn test_source_name_without_matching_prefix() {
        let config = GeneratorConfig::new()
            .file("app.idl")
            .backend_option("strip-path=/elsewhere/");
        assert_eq!(config.source_name().as_deref(), Some("app.idl"));
    }

    #[test]
    fn test_print_include_path_and_root() {
        let config = GeneratorConfig::new()
            .backend_option(PRINT_INCLUDE_PATH)
            .include_root("/opt/idlbind/include");

        assert!(config.print_include_path());
        assert_eq!(
            config.include_root_path(),
            PathBuf::from("/opt/idlbind/include")
        );
        assert_eq!(config.backend_options().len(), 1);
    }
}
