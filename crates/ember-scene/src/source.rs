//! Where scene text comes from

use ember_core::{EmberError, Result};
use ember_ecs::Scene;
use std::collections::HashMap;

/// Supplies the raw text backing a scene
pub trait SceneSource {
    fn read(&self, scene: &Scene) -> Result<String>;
}

/// Reads a scene from its backing file
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSceneSource {
    create_missing: bool,
}

impl FileSceneSource {
    /// A missing file is an error
    pub fn new() -> Self {
        Self::default()
    }

    /// A missing file is created with a placeholder comment
    pub fn creating() -> Self {
        Self {
            create_missing: true,
        }
    }
}

impl SceneSource for FileSceneSource {
    fn read(&self, scene: &Scene) -> Result<String> {
        if self.create_missing {
            return scene.open_file();
        }

        std::fs::read_to_string(scene.path()).map_err(|err| {
            EmberError::SceneError(format!(
                "Unable to find or open scene file at path \"{}\": {}",
                scene.path().display(),
                err
            ))
        })
    }
}

/// Scene text held in memory, keyed by scene name
#[derive(Debug, Clone, Default)]
pub struct MemorySceneSource {
    scenes: HashMap<String, String>,
}

impl MemorySceneSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.scenes.insert(name.into(), text.into());
    }
}

impl SceneSource for MemorySceneSource {
    fn read(&self, scene: &Scene) -> Result<String> {
        self.scenes
            .get(scene.name())
            .cloned()
            .ok_or_else(|| EmberError::SceneNotFound(scene.name().to_string()))
    }
}
