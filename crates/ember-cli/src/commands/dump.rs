//! Canonical scene dump command

use super::{project_registry, scene_at};
use anyhow::{Context, Result};
use ember_scene::{write_scene, FileSceneSource, SceneLoader};

pub fn run(path: &str, project: &str) -> Result<()> {
    let registry = project_registry(project)?;
    let mut scene = scene_at(path)?;

    let source = FileSceneSource::new();
    SceneLoader::new(&registry, &source)
        .try_load(&mut scene)
        .with_context(|| format!("Failed to load scene {}", path))?;

    print!("{}", write_scene(&scene)?);
    Ok(())
}
