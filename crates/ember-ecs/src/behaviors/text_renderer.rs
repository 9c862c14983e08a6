//! Draws a string at the object's transform

use crate::behavior::{unknown_field, Behavior, BehaviorContext, Canvas, TextDraw};
use ember_core::{Color, Result, SpriteAnchor};
use ember_schema::{FieldDecl, FieldKind, FieldValue};
use std::any::Any;

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new("text", FieldKind::String, "String to draw"),
    FieldDecl::new("font_path", FieldKind::String, "Content path of the font"),
    FieldDecl::new("color", FieldKind::Color, "Text color"),
    FieldDecl::new("world_space", FieldKind::Bool, "Position in world space instead of screen space"),
    FieldDecl::new("anchor", FieldKind::Anchor, "Point of the text placed at the position"),
    FieldDecl::new("rich_text", FieldKind::Bool, "Interpret inline color markup"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct TextRenderer {
    pub text: String,
    pub font_path: String,
    pub color: Color,
    pub world_space: bool,
    pub anchor: SpriteAnchor,
    pub rich_text: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_path: String::new(),
            color: Color::BLACK,
            world_space: false,
            anchor: SpriteAnchor::MiddleLeft,
            rich_text: false,
        }
    }
}

impl TextRenderer {
    pub fn new(text: impl Into<String>, font_path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_path: font_path.into(),
            ..Self::default()
        }
    }
}

impl Behavior for TextRenderer {
    fn type_name(&self) -> &'static str {
        "TextRenderer"
    }

    fn fields(&self) -> &'static [FieldDecl] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "text" => Some(self.text.clone().into()),
            "font_path" => Some(self.font_path.clone().into()),
            "color" => Some(self.color.into()),
            "world_space" => Some(self.world_space.into()),
            "anchor" => Some(self.anchor.into()),
            "rich_text" => Some(self.rich_text.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "text" => self.text = value.try_into()?,
            "font_path" => self.font_path = value.try_into()?,
            "color" => self.color = value.try_into()?,
            "world_space" => self.world_space = value.try_into()?,
            "anchor" => self.anchor = value.try_into()?,
            "rich_text" => self.rich_text = value.try_into()?,
            _ => return Err(unknown_field(self.type_name(), name)),
        }
        Ok(())
    }

    fn start(&mut self, ctx: &mut BehaviorContext<'_>) {
        if self.font_path.is_empty() {
            log::warn!(
                "No font set for TextRenderer behavior on object \"{}\"",
                ctx.object_name
            );
        }
    }

    fn draw(&mut self, ctx: &mut BehaviorContext<'_>, canvas: &mut dyn Canvas) {
        if self.font_path.is_empty() {
            return;
        }

        canvas.draw_text(&TextDraw {
            text: &self.text,
            font_path: &self.font_path,
            color: self.color,
            anchor: self.anchor,
            rich_text: self.rich_text,
            screen_space: !self.world_space,
            position: ctx.transform.position,
            scale: ctx.transform.scale,
            rotation: ctx.transform.rotation,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
