//! Tool configuration types.
//!
//! Configuration is read from `.rectool.toml` in the workspace root. Every
//! field is optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! done_keyword = "done"
//! termination = "level"
//! indent_width = 2
//! ```

use std::path::Path;

use anyhow::Context;
use recordtree::{BuildOptions, Termination};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default configuration file name inside the workspace.
pub const CONFIG_FILE: &str = ".rectool.toml";

/// Root tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    /// Field name that finishes a level while defining a schema.
    pub done_keyword: String,
    /// How far the finish word reaches.
    pub termination: TerminationMode,
    /// Spaces of prompt indentation per nesting level.
    pub indent_width: usize,
}

/// Scope of the finish word while defining a schema.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TerminationMode {
    /// Finish only the level where the word was typed.
    #[default]
    Level,
    /// Finish every open level.
    Session,
}

impl Default for ToolConfig {
    fn default() -> Self {
        let options = BuildOptions::default();
        Self {
            done_keyword: options.done_keyword,
            termination: TerminationMode::Level,
            indent_width: options.indent_width,
        }
    }
}

impl From<TerminationMode> for Termination {
    fn from(mode: TerminationMode) -> Self {
        match mode {
            TerminationMode::Level => Termination::Level,
            TerminationMode::Session => Termination::Session,
        }
    }
}

impl ToolConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults unless `required` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub fn load(path: &Path, required: bool) -> anyhow::Result<Self> {
        if !path.exists() {
            if required {
                bail!("Config file does not exist: {}", path.display());
            }
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ToolConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if config.done_keyword.is_empty() {
            bail!("done_keyword in {} must not be empty", path.display());
        }
        Ok(config)
    }

    /// Options for the interactive builder and collector.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            done_keyword: self.done_keyword.clone(),
            termination: self.termination.into(),
            indent_width: self.indent_width,
        }
    }

    /// JSON Schema of the configuration file, pretty printed.
    pub fn json_schema() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(ToolConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = ToolConfig::load(&tmp.path().join(CONFIG_FILE), false).unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.build_options(), BuildOptions::default());

        assert!(ToolConfig::load(&tmp.path().join(CONFIG_FILE), true).is_err());
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "termination = \"session\"\n").unwrap();

        let config = ToolConfig::load(&path, true).unwrap();
        assert_eq!(config.termination, TerminationMode::Session);
        assert_eq!(config.done_keyword, "done");

        let options = config.build_options();
        assert_eq!(options.termination, Termination::Session);
        assert_eq!(options.indent_width, 2);
    }

    #[test]
    fn test_invalid_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        std::fs::write(&path, "termination = \"forever\"\n").unwrap();
        assert!(ToolConfig::load(&path, false).is_err());

        std::fs::write(&path, "done_keyword = \"\"\n").unwrap();
        assert!(ToolConfig::load(&path, false).is_err());
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = ToolConfig::json_schema().unwrap();
        assert!(schema.contains("done_keyword"));
        assert!(schema.contains("termination"));
        assert!(schema.contains("indent_width"));
    }
}
