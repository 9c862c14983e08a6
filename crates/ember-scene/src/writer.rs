//! Scene writing in the canonical text form

use ember_core::Result;
use ember_ecs::Scene;
use ember_schema::FieldValue;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render every object of `scene` as scene text that loads back into an
/// equivalent scene.
///
/// Each object gets its name and every behavior, Transform first, with all
/// declared fields. Enabled flags are not part of the format.
pub fn write_scene(scene: &Scene) -> Result<String> {
    let mut out = String::new();

    for object in scene.objects() {
        let name = FieldValue::String(object.name().to_string()).to_literal()?;
        writeln!(out, "{{")?;
        writeln!(out, "{INDENT}name: {name}")?;

        for behavior in object.behaviors() {
            writeln!(out, "{INDENT}add_script: \"{}\"", behavior.type_name())?;
            writeln!(out, "{INDENT}{{")?;
            for decl in behavior.fields() {
                if let Some(value) = behavior.field(decl.name) {
                    writeln!(out, "{INDENT}{INDENT}{}: {}", decl.name, value.to_literal()?)?;
                }
            }
            writeln!(out, "{INDENT}}}")?;
        }

        writeln!(out, "}}")?;
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SceneLoader;
    use crate::source::MemorySceneSource;
    use ember_core::{Color, EmberError, SpriteAnchor, Vec2, Vec3};
    use ember_ecs::{Animation, BehaviorRegistry, Object, SpriteRenderer, TextRenderer};

    fn reload(text: &str) -> Scene {
        let registry = BehaviorRegistry::with_builtins("game");
        let source = MemorySceneSource::new().with_scene("Copy", text);
        let mut scene = Scene::new("Copy");
        let report = SceneLoader::new(&registry, &source)
            .try_load(&mut scene)
            .unwrap();
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        scene
    }

    #[test]
    fn test_write_minimal_object() {
        let mut scene = Scene::new("Test");
        scene.add(Object::named("Player"));

        let text = write_scene(&scene).unwrap();
        assert_eq!(
            text,
            "{\n    name: \"Player\"\n    add_script: \"Transform\"\n    {\n        position: (0, 0, 1)\n        scale: 1\n        rotation: 0\n    }\n}\n\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let mut scene = Scene::new("Test");

        let mut hero = Object::named("Hero \"the brave\"");
        hero.transform_mut().position = Vec3::new(10.5, -3.0, 0.25);
        hero.transform_mut().scale = 2.5;
        let mut sprite = SpriteRenderer::new("sprites/hero.png");
        sprite.color = Color::rgba(1, 0, 1, 1);
        hero.add_behavior(Box::new(sprite)).unwrap();
        let mut label = TextRenderer::new("HP: 10", "fonts/main");
        label.anchor = SpriteAnchor::BottomRight;
        label.world_space = true;
        hero.add_behavior(Box::new(label)).unwrap();
        hero.add_behavior(Box::new(TextRenderer::new("second", "fonts/main")))
            .unwrap();
        scene.add(hero);

        let mut walker = Object::named("Walker");
        let mut anim = Animation::new();
        anim.frame_size = Vec2::new(16.0, 16.0);
        anim.frame_count = 4;
        anim.fps = 8;
        walker.add_behavior(Box::new(anim)).unwrap();
        scene.add(walker);
        scene.add(Object::named("Walker"));

        let copy = reload(&write_scene(&scene).unwrap());
        assert_eq!(copy.object_count(), 3);

        for (original, loaded) in scene.objects().zip(copy.objects()) {
            assert_eq!(original.name(), loaded.name());
            assert_eq!(original.behavior_count(), loaded.behavior_count());
            for (a, b) in original.behaviors().zip(loaded.behaviors()) {
                assert_eq!(a.type_name(), b.type_name());
                for decl in a.fields() {
                    assert_eq!(a.field(decl.name), b.field(decl.name), "{}", decl.name);
                }
            }
        }
    }

    #[test]
    fn test_unrepresentable_name() {
        let mut scene = Scene::new("Test");
        scene.add(Object::named("two\nlines"));
        assert!(matches!(
            write_scene(&scene),
            Err(EmberError::Unrepresentable(_))
        ));
    }
}
