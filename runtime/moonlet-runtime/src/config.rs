///
/// # Runtime Configuration
///
/// A `RuntimeConfig` tunes the behavior of one `RuntimeContext`. It is read
/// from the `[runtime]` table of a TOML file; every field has a default, so
/// an empty file (or a file without the table) yields the defaults.
///
/// ## Example moonlet.toml
///
/// ```toml
/// [runtime]
/// truthiness = "zero-is-false"   # or "nil-and-false"
/// library_prefix = "Library"
/// builtin_prefix = "lua_"
/// ```
///
/// `library_prefix` is the declared-name prefix that marks a library
/// provider; `builtin_prefix` marks the global scope's methods that are
/// published as built-in functions. Both are matched case-insensitively
/// and stripped to form the script-visible name.
///

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::TruthinessRule;

pub const DEFAULT_LIBRARY_PREFIX: &str = "Library";
pub const DEFAULT_BUILTIN_PREFIX: &str = "lua_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse runtime config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid runtime config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub truthiness: TruthinessRule,
    pub library_prefix: String,
    pub builtin_prefix: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            truthiness: TruthinessRule::default(),
            library_prefix: DEFAULT_LIBRARY_PREFIX.to_string(),
            builtin_prefix: DEFAULT_BUILTIN_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    pub fn load(path: &Path) -> Result<RuntimeConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<RuntimeConfig, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.runtime.validate()?;
        Ok(file.runtime)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "library_prefix must not be empty".to_string(),
            ));
        }
        if self.builtin_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "builtin_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RuntimeConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.truthiness, TruthinessRule::ZeroIsFalse);
    }

    #[test]
    fn test_parse_runtime_table() {
        let config = RuntimeConfig::from_toml_str(
            r#"
[runtime]
truthiness = "nil-and-false"
builtin_prefix = "global_"
"#,
        )
        .expect("config parses");
        assert_eq!(config.truthiness, TruthinessRule::NilAndFalse);
        assert_eq!(config.builtin_prefix, "global_");
        assert_eq!(config.library_prefix, DEFAULT_LIBRARY_PREFIX);
    }

    #[test]
    fn test_unknown_truthiness_rejected() {
        let err = RuntimeConfig::from_toml_str("[runtime]\ntruthiness = \"lua\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = RuntimeConfig::from_toml_str("[runtime]\nlibrary_prefix = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("library_prefix"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("moonlet.toml");
        std::fs::write(&path, "[runtime]\nlibrary_prefix = \"Lib\"\n").expect("write config");

        let config = RuntimeConfig::load(&path).expect("config loads");
        assert_eq!(config.library_prefix, "Lib");

        let missing = RuntimeConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
