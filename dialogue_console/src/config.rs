//! Console configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading a console configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How the console lays out a dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Column at which prompt and response text wraps.
    pub wrap_width: usize,

    /// Print the variable store before each prompt.
    pub show_globals: bool,

    /// Shown before reading a choice.
    pub input_marker: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            wrap_width: 78,
            show_globals: true,
            input_marker: "> ".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Set the wrap width.
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Set whether globals are printed.
    pub fn with_show_globals(mut self, show: bool) -> Self {
        self.show_globals = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.wrap_width, 78);
        assert!(config.show_globals);
        assert_eq!(config.input_marker, "> ");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConsoleConfig::from_toml_str("wrap_width = 40").unwrap();
        assert_eq!(config.wrap_width, 40);
        assert!(config.show_globals);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ConsoleConfig::from_toml_str("wrap_width = \"wide\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_globals = false").unwrap();
        writeln!(file, "input_marker = \"? \"").unwrap();

        let config = ConsoleConfig::load(file.path()).unwrap();
        assert!(!config.show_globals);
        assert_eq!(config.input_marker, "? ");
    }

    #[test]
    fn test_builder() {
        let config = ConsoleConfig::default()
            .with_wrap_width(20)
            .with_show_globals(false);
        assert_eq!(config.wrap_width, 20);
        assert!(!config.show_globals);
    }
}
