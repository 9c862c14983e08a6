//! Scene management commands

use super::{project_registry, scene_at};
use anyhow::{Context, Result};
use clap::Subcommand;
use ember_ecs::Scene;
use ember_runtime::SceneManager;
use ember_scene::{FileSceneSource, SceneLoader};
use std::path::Path;

#[derive(Subcommand)]
pub enum SceneCommands {
    /// Create a new scene file
    Create {
        /// Path to scene file
        path: String,
    },

    /// List all scene files under a directory
    List {
        /// Directory to search
        #[arg(default_value = "scenes")]
        path: String,
    },

    /// Show scene information
    Info {
        /// Path to scene file
        path: String,
    },
}

pub fn run(cmd: SceneCommands, project: &str) -> Result<()> {
    match cmd {
        SceneCommands::Create { path } => create(&path),
        SceneCommands::List { path } => list(&path, project),
        SceneCommands::Info { path } => info(&path, project),
    }
}

fn create(path: &str) -> Result<()> {
    let path = if path.ends_with(".txt") {
        path.to_string()
    } else {
        format!("{}.txt", path)
    };

    let file = Path::new(&path);
    if file.exists() {
        anyhow::bail!("Scene file already exists: {}", path);
    }

    let name = file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Scene file name is not valid UTF-8")?;
    let root = file.parent().unwrap_or(Path::new(""));

    Scene::with_root(root, Path::new(""), name).open_file()?;

    println!("Created scene: {}", path);

    Ok(())
}

fn list(dir: &str, project: &str) -> Result<()> {
    let path = Path::new(dir);

    if !path.exists() {
        anyhow::bail!("Directory not found: {}", dir);
    }

    if !path.is_dir() {
        anyhow::bail!("Not a directory: {}", dir);
    }

    let mut manager = SceneManager::new(path, project_registry(project)?);
    manager.discover()?;

    let mut count = 0;
    for scene in manager.scenes() {
        println!("  {} ({})", scene.name(), scene.path().display());
        count += 1;
    }

    if count == 0 {
        println!("No scene files found in {}", dir);
    } else {
        println!("\n{} scene(s)", count);
    }

    Ok(())
}

fn info(path: &str, project: &str) -> Result<()> {
    let registry = project_registry(project)?;
    let mut scene = scene_at(path)?;

    let source = FileSceneSource::new();
    let report = SceneLoader::new(&registry, &source)
        .try_load(&mut scene)
        .with_context(|| format!("Failed to load scene {}", path))?;

    println!("Scene: {}", scene.name());
    println!("File: {}", scene.path().display());
    println!("Objects: {}", scene.object_count());
    if !report.diagnostics.is_empty() {
        println!("Warnings: {}", report.warning_count());
    }

    for object in scene.objects() {
        let behaviors: Vec<&str> = object.behaviors().map(|b| b.type_name()).collect();
        println!("  {}: {}", object.name(), behaviors.join(", "));
    }

    Ok(())
}
