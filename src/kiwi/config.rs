//! Configuration loader for the kiwi toolchain.
//!
//! `defaults/kiwi.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`KiwiConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/kiwi.default.toml");

/// Top-level configuration consumed by kiwi applications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KiwiConfig {
    pub lexer: LexerConfig,
    pub parser: ParserConfig,
    pub inspect: InspectConfig,
}

/// Knobs of the token stream adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct LexerConfig {
    pub fuse_sigil_names: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            fuse_sigil_names: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub packrat: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { packrat: true }
    }
}

/// Controls tree output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_spans: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self { show_spans: true }
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

    /// Layer a TOML file over what is loaded so far; a missing file is an
    /// error at `build` time.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Like [`Loader::with_file`], but an absent file is skipped
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
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
    pub fn build(self) -> Result<KiwiConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<KiwiConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.lexer.fuse_sigil_names);
        assert!(config.parser.packrat);
        assert!(config.inspect.show_spans);
    }

    #[test]
    fn embedded_defaults_match_default_impl() {
        let loaded = load_defaults().expect("defaults to deserialize");
        let built = KiwiConfig::default();
        assert_eq!(loaded.lexer.fuse_sigil_names, built.lexer.fuse_sigil_names);
        assert_eq!(loaded.parser.packrat, built.parser.packrat);
        assert_eq!(loaded.inspect.show_spans, built.inspect.show_spans);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.packrat", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.parser.packrat);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("config to build");
        assert!(config.lexer.fuse_sigil_names);
    }
}
