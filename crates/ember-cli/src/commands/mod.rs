//! CLI command implementations

pub mod behaviors;
pub mod check;
pub mod dump;
pub mod init;
pub mod scene;

use anyhow::{Context, Result};
use ember_ecs::{BehaviorRegistry, Scene};
use ember_runtime::EmberConfig;
use std::path::Path;

/// Registry for the project in `project`, honoring its script namespace
pub(crate) fn project_registry(project: &str) -> Result<BehaviorRegistry> {
    let config = EmberConfig::load(Path::new(project))
        .with_context(|| format!("Failed to load project config from {}", project))?;
    log::debug!(
        "Project \"{}\" uses behavior namespace \"{}\"",
        config.project.name,
        config.scripts.namespace
    );
    Ok(config.registry())
}

/// An empty scene backed by the file at `path`, which must exist
pub(crate) fn scene_at(path: &str) -> Result<Scene> {
    let path = Path::new(path);
    if !path.is_file() {
        anyhow::bail!("Scene file not found: {}", path.display());
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Scene file name is not valid UTF-8")?;
    let root = path.parent().unwrap_or(Path::new(""));

    Ok(Scene::with_root(root, Path::new(""), name))
}
