//! Scenes: named collections of objects backed by a text file

use crate::behavior::{Canvas, FrameTime};
use crate::object::Object;
use ember_core::{ObjectId, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Text written to a scene file that is opened before it exists
pub const SCENE_PLACEHOLDER: &str = "# Define objects here";

/// A scene groups objects by name. Names need not be unique; objects that
/// share a name are kept in creation order under the same key.
#[derive(Debug)]
pub struct Scene {
    name: String,
    sub_path: PathBuf,
    path: PathBuf,
    objects: IndexMap<String, Vec<Object>>,
}

impl Scene {
    /// A scene backed by `<name>.txt` in the current directory
    pub fn new(name: &str) -> Self {
        Self::with_root(Path::new(""), Path::new(""), name)
    }

    /// A scene backed by `<root>/<sub_path>/<name>.txt`.
    ///
    /// A trailing `.txt` on `name` is stripped.
    pub fn with_root(root: &Path, sub_path: &Path, name: &str) -> Self {
        let name = name.strip_suffix(".txt").unwrap_or(name).to_string();
        let path = root.join(sub_path).join(format!("{}.txt", name));

        Self {
            name,
            sub_path: sub_path.to_path_buf(),
            path,
            objects: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory of the scene file relative to the scene root
    pub fn sub_path(&self) -> &Path {
        &self.sub_path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing file, creating it with a placeholder comment if it
    /// does not exist yet.
    pub fn open_file(&self) -> Result<String> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&self.path, SCENE_PLACEHOLDER)?;
            log::info!("Created scene file {}", self.path.display());
            return Ok(SCENE_PLACEHOLDER.to_string());
        }

        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Add an object under its name
    pub fn add(&mut self, object: Object) -> ObjectId {
        let id = object.id();
        self.objects
            .entry(object.name().to_string())
            .or_default()
            .push(object);
        id
    }

    /// The first object added under `name`
    pub fn find(&self, name: &str) -> Option<&Object> {
        self.objects.get(name).and_then(|list| list.first())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.get_mut(name).and_then(|list| list.first_mut())
    }

    /// Every object named `name`, in the order they were added
    pub fn find_all(&self, name: &str) -> &[Object] {
        self.objects.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_by_id(&self, id: ObjectId) -> Option<&Object> {
        self.objects().find(|o| o.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects_mut().find(|o| o.id() == id)
    }

    /// Remove one object. Returns false if no object has that id.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        let found = self.objects.iter().find_map(|(name, list)| {
            list.iter()
                .position(|o| o.id() == id)
                .map(|index| (name.clone(), index))
        });

        let Some((name, index)) = found else {
            return false;
        };

        if let Some(list) = self.objects.get_mut(&name) {
            list.remove(index);
            if list.is_empty() {
                self.objects.shift_remove(&name);
            }
        }
        true
    }

    /// Remove every object. Safe to call on an empty scene.
    pub fn unload_objects(&mut self) {
        self.objects.clear();
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects, grouped by name in first-seen order
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values().flatten()
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.values_mut().flatten()
    }

    /// Start every object, enabled or not
    pub fn start(&mut self, time: FrameTime) {
        for object in self.objects_mut() {
            object.start(time);
        }
    }

    pub fn update(&mut self, time: FrameTime) {
        for object in self.objects_mut().filter(|o| o.is_enabled()) {
            object.update(time);
        }
    }

    pub fn draw(&mut self, time: FrameTime, canvas: &mut dyn Canvas) {
        for object in self.objects_mut().filter(|o| o.is_enabled()) {
            object.draw(time, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{SpriteDraw, TextDraw};
    use crate::behaviors::{SpriteRenderer, Transform};
    use crate::object::BehaviorSlot;

    #[derive(Default)]
    struct RecordingCanvas {
        sprites: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn draw_sprite(&mut self, sprite: &SpriteDraw<'_>) {
            self.sprites.push(sprite.sprite_path.to_string());
        }

        fn draw_text(&mut self, _text: &TextDraw<'_>) {}
    }

    fn sprite_object(name: &str, path: &str) -> Object {
        let mut object = Object::named(name);
        object
            .add_behavior(Box::new(SpriteRenderer::new(path)))
            .unwrap();
        object
    }

    #[test]
    fn test_scene_name_strips_txt() {
        let scene = Scene::with_root(Path::new("scenes"), Path::new("levels"), "Intro.txt");
        assert_eq!(scene.name(), "Intro");
        assert_eq!(scene.path(), Path::new("scenes/levels/Intro.txt"));
        assert_eq!(scene.sub_path(), Path::new("levels"));
    }

    #[test]
    fn test_add_and_find_shared_names() {
        let mut scene = Scene::new("Test");
        let first = scene.add(Object::named("Enemy"));
        let second = scene.add(Object::named("Enemy"));
        scene.add(Object::named("Player"));

        assert_eq!(scene.object_count(), 3);
        assert_eq!(scene.find("Enemy").unwrap().id(), first);
        let all: Vec<ObjectId> = scene.find_all("Enemy").iter().map(|o| o.id()).collect();
        assert_eq!(all, vec![first, second]);
        assert!(scene.find("Nobody").is_none());
        assert!(scene.find_all("Nobody").is_empty());
    }

    #[test]
    fn test_destroy() {
        let mut scene = Scene::new("Test");
        let first = scene.add(Object::named("Enemy"));
        let second = scene.add(Object::named("Enemy"));

        assert!(scene.destroy(first));
        assert!(!scene.destroy(first));
        assert_eq!(scene.find("Enemy").unwrap().id(), second);

        assert!(scene.destroy(second));
        assert!(scene.find("Enemy").is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_unload_objects_is_idempotent() {
        let mut scene = Scene::new("Test");
        scene.add(Object::named("A"));
        scene.unload_objects();
        assert!(scene.is_empty());
        scene.unload_objects();
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_draw_respects_enabled_flags() {
        let mut scene = Scene::new("Test");
        scene.add(sprite_object("Visible", "visible.png"));

        let mut hidden = sprite_object("Hidden", "hidden.png");
        hidden.set_enabled(false);
        scene.add(hidden);

        let mut muted = sprite_object("Muted", "muted.png");
        muted.set_behavior_enabled(BehaviorSlot::Attached(0), false);
        scene.add(muted);

        let mut canvas = RecordingCanvas::default();
        scene.draw(FrameTime::default(), &mut canvas);
        assert_eq!(canvas.sprites, vec!["visible.png".to_string()]);
    }

    #[test]
    fn test_find_by_id_mut() {
        let mut scene = Scene::new("Test");
        let id = scene.add(Object::named("Mover"));
        scene
            .find_by_id_mut(id)
            .unwrap()
            .get_behavior_mut::<Transform>()
            .unwrap()
            .scale = 3.0;
        assert_eq!(scene.find("Mover").unwrap().transform().scale, 3.0);
    }

    #[test]
    fn test_open_file_creates_placeholder() {
        let root = std::env::temp_dir().join(format!("ember_scene_test_{}", uuid::Uuid::new_v4()));
        let scene = Scene::with_root(&root, Path::new("nested"), "Fresh");

        let text = scene.open_file().unwrap();
        assert_eq!(text, SCENE_PLACEHOLDER);
        assert!(scene.path().exists());

        std::fs::write(scene.path(), "{ }").unwrap();
        assert_eq!(scene.open_file().unwrap(), "{ }");

        let _ = std::fs::remove_dir_all(&root);
    }
}
