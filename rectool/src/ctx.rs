//! Application context and state management.
//!
//! This module provides the [`AppContext`] type which holds the workspace
//! paths and the loaded tool configuration.

use std::path::PathBuf;

use recordtree::{BuildOptions, FsRepository};

use crate::config::{CONFIG_FILE, ToolConfig};

/// Path configuration grouping all path-related fields.
#[derive(Default, Clone, Debug)]
pub struct PathConfig {
    /// Workspace root; submodule folder names are resolved against it.
    pub workspace: PathBuf,
    /// Configuration file in use.
    pub config: PathBuf,
}

/// The main application context holding all state.
#[derive(Default, Clone, Debug)]
pub struct AppContext {
    /// Workspace and configuration paths.
    pub paths: PathConfig,
    /// Loaded tool configuration.
    pub config: ToolConfig,
}

impl AppContext {
    /// Create a context rooted at `workspace`.
    ///
    /// Without an explicit `config` path, `.rectool.toml` in the workspace is
    /// used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or any config
    /// file fails to parse.
    pub fn init(workspace: PathBuf, config: Option<PathBuf>) -> anyhow::Result<Self> {
        let required = config.is_some();
        let config_path = config.unwrap_or_else(|| workspace.join(CONFIG_FILE));
        let config = ToolConfig::load(&config_path, required)?;
        debug!("workspace {} with {:?}", workspace.display(), config);

        Ok(Self {
            paths: PathConfig {
                workspace,
                config: config_path,
            },
            config,
        })
    }

    /// Repository rooted at the workspace.
    pub fn repository(&self) -> FsRepository {
        FsRepository::new(&self.paths.workspace)
    }

    /// Options for the interactive builder and collector.
    pub fn build_options(&self) -> BuildOptions {
        self.config.build_options()
    }
}
