//! Sprite sheet animation

use crate::behavior::{unknown_field, Behavior, BehaviorContext};
use ember_core::{Result, Vec2};
use ember_schema::{FieldDecl, FieldKind, FieldValue};
use std::any::Any;

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new("sprite_source", FieldKind::String, "Content path of the sprite sheet"),
    FieldDecl::new("frame_size", FieldKind::Vec2, "Width and height of one frame"),
    FieldDecl::new("sheet_origin", FieldKind::Vec2, "Top-left corner of the first frame"),
    FieldDecl::new("frame_count", FieldKind::I32, "Number of frames in the strip"),
    FieldDecl::new("fps", FieldKind::I32, "Playback rate in frames per second"),
];

/// Most frames `fetch_frames` will cut from one strip
pub const MAX_FRAMES: i32 = 4096;

/// A rectangle of the sprite sheet, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FrameRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Steps through a horizontal strip of frames at a fixed rate.
///
/// Frames are cut from the sheet on `start` when `frame_size` is positive;
/// more can be appended with `add_frame`. Playback starts with `play`.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub sprite_source: String,
    pub frame_size: Vec2,
    pub sheet_origin: Vec2,
    pub frame_count: i32,
    pub fps: i32,
    frames: Vec<FrameRect>,
    playing: bool,
    current_frame: usize,
    time_until_next_frame: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            sprite_source: String::new(),
            frame_size: Vec2::ZERO,
            sheet_origin: Vec2::ZERO,
            frame_count: 1,
            fps: 15,
            frames: Vec::new(),
            playing: false,
            current_frame: 0,
            time_until_next_frame: 0.0,
        }
    }
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_frame(&mut self, frame: FrameRect) {
        self.frames.push(frame);
    }

    /// Append up to `frame_count` frames laid out left to right from
    /// `sheet_origin`.
    ///
    /// The count is capped at [`MAX_FRAMES`], and cutting stops at the first
    /// frame whose position does not fit in an `i32`.
    pub fn fetch_frames(&mut self) {
        let width = self.frame_size.x as i32;
        let height = self.frame_size.y as i32;
        if width <= 0 || height <= 0 {
            return;
        }

        let mut count = self.frame_count.max(0);
        if count > MAX_FRAMES {
            log::warn!(
                "Animation frame_count {} exceeds the maximum of {}; cutting {} frames",
                count,
                MAX_FRAMES,
                MAX_FRAMES
            );
            count = MAX_FRAMES;
        }

        let origin_x = self.sheet_origin.x as i32;
        let origin_y = self.sheet_origin.y as i32;
        for i in 0..count {
            let Some(x) = i.checked_mul(width).and_then(|dx| dx.checked_add(origin_x)) else {
                log::warn!(
                    "Animation frame {} lies outside the sheet coordinate range; stopping at {} frames",
                    i,
                    i
                );
                break;
            };
            self.frames.push(FrameRect::new(x, origin_y, width, height));
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
        self.time_until_next_frame = self.frame_step();
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn current_rect(&self) -> Option<FrameRect> {
        self.frames.get(self.current_frame).copied()
    }

    fn frame_step(&self) -> f32 {
        if self.fps > 0 {
            1.0 / self.fps as f32
        } else {
            0.0
        }
    }
}

impl Behavior for Animation {
    fn type_name(&self) -> &'static str {
        "Animation"
    }

    fn fields(&self) -> &'static [FieldDecl] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "sprite_source" => Some(self.sprite_source.clone().into()),
            "frame_size" => Some(self.frame_size.into()),
            "sheet_origin" => Some(self.sheet_origin.into()),
            "frame_count" => Some(self.frame_count.into()),
            "fps" => Some(self.fps.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "sprite_source" => self.sprite_source = value.try_into()?,
            "frame_size" => self.frame_size = value.try_into()?,
            "sheet_origin" => self.sheet_origin = value.try_into()?,
            "frame_count" => self.frame_count = value.try_into()?,
            "fps" => self.fps = value.try_into()?,
            _ => return Err(unknown_field(self.type_name(), name)),
        }
        Ok(())
    }

    fn start(&mut self, _ctx: &mut BehaviorContext<'_>) {
        self.fetch_frames();
    }

    fn update(&mut self, ctx: &mut BehaviorContext<'_>) {
        if !self.playing || self.frames.is_empty() || self.fps <= 0 {
            return;
        }

        self.time_until_next_frame -= ctx.time.delta;
        if self.time_until_next_frame <= 0.0 {
            self.current_frame = (self.current_frame + 1) % self.frames.len();
            self.time_until_next_frame += self.frame_step();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::FrameTime;
    use crate::behaviors::Transform;
    use ember_core::ObjectId;

    fn tick(anim: &mut Animation, transform: &mut Transform, delta: f32) {
        let mut ctx = BehaviorContext {
            object_id: ObjectId::from_raw(1),
            object_name: "anim",
            transform,
            time: FrameTime::new(delta, 0.0),
            sprite_frame: None,
        };
        anim.update(&mut ctx);
    }

    #[test]
    fn test_fetch_frames_strip() {
        let mut anim = Animation::new();
        anim.frame_size = Vec2::new(16.0, 32.0);
        anim.sheet_origin = Vec2::new(8.0, 4.0);
        anim.frame_count = 3;
        anim.fetch_frames();

        assert_eq!(
            anim.frames(),
            &[
                FrameRect::new(8, 4, 16, 32),
                FrameRect::new(24, 4, 16, 32),
                FrameRect::new(40, 4, 16, 32),
            ]
        );
    }

    #[test]
    fn test_fetch_frames_stops_before_overflow() {
        let mut anim = Animation::new();
        anim.frame_size = Vec2::new(1_000_000_000.0, 16.0);
        anim.frame_count = 4;
        anim.fetch_frames();

        assert_eq!(anim.frames().len(), 3);
        assert_eq!(anim.frames()[2], FrameRect::new(2_000_000_000, 0, 1_000_000_000, 16));
    }

    #[test]
    fn test_fetch_frames_caps_count() {
        let mut anim = Animation::new();
        anim.frame_size = Vec2::new(1.0, 1.0);
        anim.frame_count = 2_000_000_000;
        anim.fetch_frames();

        assert_eq!(anim.frames().len(), MAX_FRAMES as usize);
    }

    #[test]
    fn test_no_frames_without_size() {
        let mut anim = Animation::new();
        anim.fetch_frames();
        assert!(anim.frames().is_empty());
        assert_eq!(anim.current_rect(), None);
    }

    #[test]
    fn test_playback_steps_and_wraps() {
        let mut transform = Transform::new();
        let mut anim = Animation::new();
        anim.fps = 10;
        anim.add_frame(FrameRect::new(0, 0, 8, 8));
        anim.add_frame(FrameRect::new(8, 0, 8, 8));

        // Not playing yet
        tick(&mut anim, &mut transform, 0.5);
        assert_eq!(anim.current_frame(), 0);

        anim.play();
        tick(&mut anim, &mut transform, 0.05);
        assert_eq!(anim.current_frame(), 0);
        tick(&mut anim, &mut transform, 0.06);
        assert_eq!(anim.current_frame(), 1);
        tick(&mut anim, &mut transform, 0.1);
        assert_eq!(anim.current_frame(), 0);

        anim.stop();
        tick(&mut anim, &mut transform, 1.0);
        assert_eq!(anim.current_frame(), 0);
        assert!(!anim.is_playing());
    }
}
