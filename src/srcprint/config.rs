//! Configuration loading for srcprint.
//!
//! `defaults/srcprint.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. On top of the defaults, in increasing priority:
//!
//! - `srcprint.toml` in the working directory, if there is one
//! - a file named on the command line (must exist)
//! - the scanner flags given on the command line
//!
//! [`Loader`] stacks these layers and deserializes the result into [`SrcprintConfig`].

use crate::srcprint::lexer::ScannerOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/srcprint.default.toml");

/// Project-local configuration file looked up by [`Loader::with_local_file`]
pub const LOCAL_CONFIG_FILE: &str = "srcprint.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SrcprintConfig {
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
}

/// Mirrors [`ScannerOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub tab_size: usize,
    pub strict: bool,
}

/// Which format to use depending on where the source comes from.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub stdin_format: String,
    pub file_format: String,
}

impl SrcprintConfig {
    pub fn scanner_options(&self) -> ScannerOptions {
        ScannerOptions {
            tab_size: self.scanner.tab_size.max(1),
            strict: self.scanner.strict,
        }
    }

    /// The format for a run, given whether the source is a named file
    pub fn default_format(&self, from_file: bool) -> &str {
        if from_file {
            &self.output.file_format
        } else {
            &self.output.stdin_format
        }
    }
}

/// Stacks configuration layers over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer `srcprint.toml` from `dir` when it exists.
    pub fn with_local_file(self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(LOCAL_CONFIG_FILE);
        self.with_source(&path, false)
    }

    /// Layer a configuration file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(path.as_ref(), true)
    }

    /// Force strict scanning on or off.
    pub fn with_strict(mut self, strict: bool) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("scanner.strict", strict)?;
        Ok(self)
    }

    /// Force the tab width used for indentation.
    pub fn with_tab_size(mut self, tab_size: u64) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("scanner.tab_size", tab_size)?;
        Ok(self)
    }

    /// Finalize the layers and deserialize them.
    pub fn build(self) -> Result<SrcprintConfig, ConfigError> {
        let config: SrcprintConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(
            tab_size = config.scanner.tab_size,
            strict = config.scanner.strict,
            "configuration loaded"
        );
        Ok(config)
    }

    fn with_source(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
