//! Project configuration
//!
//! A project is configured by `ember.toml` in its root directory. Every key
//! is optional and a missing file means all defaults. The start scene can be
//! overridden with the `EMBER_START_SCENE` environment variable.

use ember_core::{EmberError, Result};
use ember_ecs::BehaviorRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "ember.toml";

const START_SCENE_ENV: &str = "EMBER_START_SCENE";

/// `[project]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Scene directory, relative to the project root
    #[serde(default = "default_scene_dir")]
    pub scene_dir: String,
    #[serde(default = "default_start_scene")]
    pub start_scene: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            scene_dir: default_scene_dir(),
            start_scene: default_start_scene(),
        }
    }
}

fn default_name() -> String {
    "Game".to_string()
}
fn default_scene_dir() -> String {
    "scenes".to_string()
}
fn default_start_scene() -> String {
    "Default".to_string()
}

/// `[scripts]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Namespace that qualifies host-defined behaviors, e.g. `game::Player`
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    "game".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmberConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub scripts: ScriptsConfig,
}

impl EmberConfig {
    /// Load `ember.toml` from a project directory, falling back to defaults
    /// when the file does not exist
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_file(&path)?
        } else {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, project_dir.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific file path only, without overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_file(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Absolute location of the scene directory
    pub fn scene_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.project.scene_dir)
    }

    /// A registry with the built-in behaviors and this project's namespace
    pub fn registry(&self) -> BehaviorRegistry {
        BehaviorRegistry::with_builtins(self.scripts.namespace.clone())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            EmberError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(scene) = lookup(START_SCENE_ENV) {
            if !scene.is_empty() {
                self.project.start_scene = scene;
            }
        }
    }
}
