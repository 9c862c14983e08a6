//! The behavior trait and the context its hooks run in

use crate::behaviors::{FrameRect, Transform};
use ember_core::{Color, EmberError, ObjectId, Result, SpriteAnchor, Vec3};
use ember_schema::{FieldDecl, FieldValue};
use std::any::Any;

/// Timing information for one frame, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Time since the previous frame
    pub delta: f32,
    /// Total time since the clock started
    pub total: f64,
}

impl FrameTime {
    pub fn new(delta: f32, total: f64) -> Self {
        Self { delta, total }
    }
}

/// What a behavior hook can see of the object that owns it
pub struct BehaviorContext<'a> {
    pub object_id: ObjectId,
    pub object_name: &'a str,
    pub transform: &'a mut Transform,
    pub time: FrameTime,
    /// Current frame of the object's first enabled animation, set while drawing
    pub sprite_frame: Option<FrameRect>,
}

/// A sprite draw request
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw<'a> {
    pub sprite_path: &'a str,
    pub position: Vec3,
    pub scale: f32,
    pub rotation: f32,
    pub color: Color,
    /// Region of the sprite sheet to draw, or the whole texture
    pub source: Option<FrameRect>,
}

/// A text draw request
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw<'a> {
    pub text: &'a str,
    pub font_path: &'a str,
    pub color: Color,
    pub anchor: SpriteAnchor,
    pub rich_text: bool,
    /// Position is in screen space rather than world space
    pub screen_space: bool,
    pub position: Vec3,
    pub scale: f32,
    pub rotation: f32,
}

/// Drawing surface provided by the host renderer
pub trait Canvas {
    fn draw_sprite(&mut self, sprite: &SpriteDraw<'_>);
    fn draw_text(&mut self, text: &TextDraw<'_>);
}

/// A unit of data and logic attached to an object.
///
/// Each variant declares its fields up front; scene text is coerced to the
/// declared kind and written through `set_field`.
pub trait Behavior: 'static {
    /// Name used in scene files, e.g. `SpriteRenderer`
    fn type_name(&self) -> &'static str;

    /// Whether an object may carry more than one instance of this variant
    fn duplicates_allowed(&self) -> bool {
        true
    }

    /// Declared fields, in the order they are written out
    fn fields(&self) -> &'static [FieldDecl];

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    fn field_decl(&self, name: &str) -> Option<&'static FieldDecl> {
        self.fields().iter().find(|decl| decl.name == name)
    }

    /// Called once before the first update, regardless of enabled flags
    fn start(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    fn update(&mut self, _ctx: &mut BehaviorContext<'_>) {}

    fn draw(&mut self, _ctx: &mut BehaviorContext<'_>, _canvas: &mut dyn Canvas) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Error for a field name the behavior does not declare
pub(crate) fn unknown_field(behavior: &str, field: &str) -> EmberError {
    EmberError::FieldNotFound {
        behavior: behavior.to_string(),
        field: field.to_string(),
    }
}
