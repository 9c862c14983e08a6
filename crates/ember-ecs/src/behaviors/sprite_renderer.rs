//! Draws a single sprite at the object's transform

use crate::behavior::{unknown_field, Behavior, BehaviorContext, Canvas, SpriteDraw};
use ember_core::{Color, Result};
use ember_schema::{FieldDecl, FieldKind, FieldValue};
use std::any::Any;

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new("sprite_path", FieldKind::String, "Content path of the sprite texture"),
    FieldDecl::new("color", FieldKind::Color, "Tint applied when drawing"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRenderer {
    pub sprite_path: String,
    pub color: Color,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            sprite_path: String::new(),
            color: Color::WHITE,
        }
    }
}

impl SpriteRenderer {
    pub fn new(sprite_path: impl Into<String>) -> Self {
        Self {
            sprite_path: sprite_path.into(),
            ..Self::default()
        }
    }
}

impl Behavior for SpriteRenderer {
    fn type_name(&self) -> &'static str {
        "SpriteRenderer"
    }

    fn duplicates_allowed(&self) -> bool {
        false
    }

    fn fields(&self) -> &'static [FieldDecl] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "sprite_path" => Some(self.sprite_path.clone().into()),
            "color" => Some(self.color.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "sprite_path" => self.sprite_path = value.try_into()?,
            "color" => self.color = value.try_into()?,
            _ => return Err(unknown_field(self.type_name(), name)),
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut BehaviorContext<'_>, canvas: &mut dyn Canvas) {
        if self.sprite_path.is_empty() {
            return;
        }

        canvas.draw_sprite(&SpriteDraw {
            sprite_path: &self.sprite_path,
            position: ctx.transform.position,
            scale: ctx.transform.scale,
            rotation: ctx.transform.rotation,
            color: self.color,
            source: ctx.sprite_frame,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
