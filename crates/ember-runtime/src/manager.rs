//! Scene discovery and switching

use crate::config::EmberConfig;
use ember_core::{EmberError, Result};
use ember_ecs::{BehaviorRegistry, Canvas, FrameTime, Scene};
use ember_scene::{FileSceneSource, LoadError, LoadReport, SceneLoader, SceneSource};
use std::path::{Path, PathBuf};

const SCENE_EXTENSION: &str = "txt";

/// Owns every known scene and the one currently running.
///
/// Only the current scene holds objects. Opening another scene unloads the
/// current one first.
pub struct SceneManager {
    scene_root: PathBuf,
    start_scene: String,
    registry: BehaviorRegistry,
    source: Box<dyn SceneSource>,
    scenes: Vec<Scene>,
    current: Option<usize>,
    started: bool,
}

impl SceneManager {
    /// A manager reading scene files under `scene_root`. Missing files are
    /// created on open.
    pub fn new(scene_root: impl Into<PathBuf>, registry: BehaviorRegistry) -> Self {
        Self {
            scene_root: scene_root.into(),
            start_scene: "Default".to_string(),
            registry,
            source: Box::new(FileSceneSource::creating()),
            scenes: Vec::new(),
            current: None,
            started: false,
        }
    }

    pub fn from_config(project_dir: &Path, config: &EmberConfig) -> Self {
        let mut manager = Self::new(config.scene_root(project_dir), config.registry());
        manager.start_scene = config.project.start_scene.clone();
        manager
    }

    /// Replace where scene text is read from
    pub fn with_source(mut self, source: impl SceneSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn scene_root(&self) -> &Path {
        &self.scene_root
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    /// For registering host behaviors before the first scene is opened
    pub fn registry_mut(&mut self) -> &mut BehaviorRegistry {
        &mut self.registry
    }

    /// Register every `.txt` file under the scene root, creating the root if
    /// it does not exist. Returns how many scenes were added.
    pub fn discover(&mut self) -> Result<usize> {
        if !self.scene_root.exists() {
            std::fs::create_dir_all(&self.scene_root)?;
            log::info!("Created scene directory {}", self.scene_root.display());
        }

        let mut found = Vec::new();
        collect_scene_files(&self.scene_root, Path::new(""), &mut found)?;
        found.sort();

        let mut added = 0;
        for (sub_path, name) in found {
            let scene = Scene::with_root(&self.scene_root, &sub_path, &name);
            if self.add_scene(scene) {
                added += 1;
            } else {
                log::warn!(
                    "Skipping {}: a scene named \"{}\" already exists",
                    sub_path.join(format!("{}.{}", name, SCENE_EXTENSION)).display(),
                    name
                );
            }
        }

        log::debug!("Discovered {} scene(s) in {}", added, self.scene_root.display());
        Ok(added)
    }

    /// Register a scene. Returns false, leaving the manager unchanged, if a
    /// scene with the same name is already registered.
    pub fn add_scene(&mut self, scene: Scene) -> bool {
        if self.index_of(scene.name()).is_some() {
            return false;
        }
        self.scenes.push(scene);
        true
    }

    /// Register a scene at `<scene_root>/<sub_path>/<name>.txt`
    pub fn create_scene(&mut self, sub_path: &Path, name: &str) -> bool {
        let scene = Scene::with_root(&self.scene_root, sub_path, name);
        self.add_scene(scene)
    }

    /// Look up a registered scene. A trailing `.txt` is ignored.
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.index_of(name).map(|index| &self.scenes[index])
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.map(|index| &self.scenes[index])
    }

    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        let index = self.current?;
        self.scenes.get_mut(index)
    }

    /// Load a registered scene and make it current.
    ///
    /// The scene must not already hold objects. On a fatal load error no
    /// scene is current and the objects loaded before the error are kept.
    pub fn open_scene(&mut self, name: &str) -> Result<LoadReport> {
        let index = self
            .index_of(name)
            .ok_or_else(|| EmberError::SceneNotFound(name.to_string()))?;

        if !self.scenes[index].is_empty() {
            return Err(EmberError::SceneError(format!(
                "Scene \"{}\" already loaded",
                self.scenes[index].name()
            )));
        }

        if let Some(current) = self.current.take() {
            self.scenes[current].unload_objects();
        }
        self.started = false;

        let loader = SceneLoader::new(&self.registry, &*self.source);
        let scene = &mut self.scenes[index];
        let report = loader
            .try_load(scene)
            .map_err(|err| load_failure(scene.name(), &err))?;

        log::info!("{}", report.summary());
        self.current = Some(index);
        Ok(report)
    }

    /// Open the configured start scene, registering it first if it was not
    /// discovered
    pub fn open_start_scene(&mut self) -> Result<LoadReport> {
        let name = self.start_scene.clone();
        if self.scene(&name).is_none() {
            self.create_scene(Path::new(""), &name);
        }
        self.open_scene(&name)
    }

    /// Run one frame of the current scene. The first frame after a scene is
    /// opened also starts it.
    pub fn frame(&mut self, time: FrameTime, canvas: &mut dyn Canvas) {
        let Some(index) = self.current else {
            return;
        };
        let scene = &mut self.scenes[index];

        if !self.started {
            scene.start(time);
            self.started = true;
        }
        scene.update(time);
        scene.draw(time, canvas);
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.strip_suffix(".txt").unwrap_or(name);
        self.scenes.iter().position(|scene| scene.name() == name)
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("scene_root", &self.scene_root)
            .field("scenes", &self.scenes.len())
            .field("current", &self.current_scene().map(Scene::name))
            .finish()
    }
}

fn load_failure(scene: &str, err: &LoadError) -> EmberError {
    match err.position() {
        Some(position) => EmberError::SceneError(format!(
            "Failed to load scene \"{}\": {} [{}]",
            scene, err, position
        )),
        None => EmberError::SceneError(format!("Failed to load scene \"{}\": {}", scene, err)),
    }
}

fn collect_scene_files(root: &Path, sub_path: &Path, out: &mut Vec<(PathBuf, String)>) -> Result<()> {
    for entry in std::fs::read_dir(root.join(sub_path))? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(dir) = path.file_name() {
                collect_scene_files(root, &sub_path.join(dir), out)?;
            }
        } else if path.extension().is_some_and(|ext| ext == SCENE_EXTENSION) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.push((sub_path.to_path_buf(), stem.to_string()));
            }
        }
    }
    Ok(())
}
