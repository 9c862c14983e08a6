//! Project initialization command

use anyhow::Result;
use ember_core::Vec3;
use ember_ecs::{Object, Scene, SpriteRenderer, TextRenderer};
use ember_runtime::{EmberConfig, CONFIG_FILE};
use ember_scene::write_scene;
use std::fs;
use std::path::Path;

pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);

    if project_dir.exists() {
        anyhow::bail!("Directory '{}' already exists", name);
    }

    create_project(project_dir)?;

    println!("Created Ember project: {}", name);
    println!();
    println!("Next steps:");
    println!("  cd {}", name);
    println!("  ember check scenes/Default.txt");
    println!("  ember behaviors");

    Ok(())
}

fn create_project(project_dir: &Path) -> Result<()> {
    let mut config = EmberConfig::default();
    if let Some(dir_name) = project_dir.file_name().and_then(|s| s.to_str()) {
        config.project.name = dir_name.to_string();
    }

    let scene_root = config.scene_root(project_dir);
    fs::create_dir_all(&scene_root)?;
    fs::create_dir_all(project_dir.join("assets/sprites"))?;
    fs::create_dir_all(project_dir.join("assets/fonts"))?;

    config.save(&project_dir.join(CONFIG_FILE))?;

    let scene = starter_scene(&config.project.start_scene)?;
    let content = format!(
        "# Starter scene for {}\n\n{}",
        config.project.name,
        write_scene(&scene)?
    );
    fs::write(scene_root.join(format!("{}.txt", scene.name())), content)?;

    Ok(())
}

fn starter_scene(name: &str) -> Result<Scene> {
    let mut scene = Scene::new(name);

    let mut player = Object::named("Player");
    player.transform_mut().set_position(0.0, 0.0, 0.5);
    player.add_behavior(Box::new(SpriteRenderer::new("assets/sprites/player.png")))?;
    scene.add(player);

    let mut title = Object::named("Title");
    title.transform_mut().position = Vec3::new(-100.0, 200.0, 1.0);
    title.add_behavior(Box::new(TextRenderer::new("Hello, Ember", "assets/fonts/default")))?;
    scene.add(title);

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_ecs::BehaviorRegistry;
    use ember_scene::{FileSceneSource, SceneLoader};

    #[test]
    fn test_create_project_layout() {
        let project_dir =
            std::env::temp_dir().join(format!("ember_init_test_{}", uuid::Uuid::new_v4()));

        create_project(&project_dir).unwrap();

        let config = EmberConfig::load_from_file(&project_dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.project.scene_dir, "scenes");

        let scene_path = project_dir.join("scenes/Default.txt");
        assert!(scene_path.is_file());

        let registry = BehaviorRegistry::with_builtins(config.scripts.namespace.clone());
        let mut scene = Scene::with_root(&project_dir.join("scenes"), Path::new(""), "Default");
        let report = SceneLoader::new(&registry, &FileSceneSource::new())
            .try_load(&mut scene)
            .unwrap();

        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        assert_eq!(scene.object_count(), 2);
        assert!(scene
            .find("Player")
            .unwrap()
            .get_behavior::<SpriteRenderer>()
            .is_some());

        let _ = fs::remove_dir_all(&project_dir);
    }
}
