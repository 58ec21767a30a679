//! Configuration loading
//!
//! `defaults/chemeq.default.toml` is embedded into the binary so that documentation and runtime
//! behavior stay in sync. Callers layer user files and single key overrides on top of those
//! defaults via [`Loader`] before deserializing into [`ChemConfig`].

use crate::chem::formats::{FormatRegistry, TextFormatter};
use crate::chem::formula::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/chemeq.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChemConfig {
    pub parsing: ParsingConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub max_group_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub default_format: String,
    pub unicode_scripts: bool,
}

impl ChemConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_group_depth(self.parsing.max_group_depth)
    }

    /// Built-in formatters with the render settings applied.
    pub fn registry(&self) -> FormatRegistry {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(TextFormatter {
            unicode_scripts: self.render.unicode_scripts,
        });
        registry
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ChemConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ChemConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chem::equation::Equation;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parsing.max_group_depth, 64);
        assert_eq!(config.render.default_format, "text");
        assert!(config.render.unicode_scripts);
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parsing.max_group_depth", 2i64)
            .expect("override to apply")
            .set_override("render.unicode_scripts", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parse_options().max_group_depth, 2);

        let equation = Equation::parse("H2O");
        assert_eq!(config.registry().serialize(&equation, "text").unwrap(), "H2O");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[render]\ndefault_format = \"html\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.render.default_format, "html");
        assert!(config.render.unicode_scripts, "unset keys keep defaults");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/chemeq.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.parsing.max_group_depth, 64);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/chemeq.toml").build();
        assert!(result.is_err());
    }
}
