//! Ember ECS - Objects, behaviors and scenes
//!
//! An `Object` owns exactly one `Transform` plus an ordered list of
//! behaviors. A `Scene` groups objects by name, and the `BehaviorRegistry`
//! maps behavior names from scene text to constructors.

mod behavior;
pub mod behaviors;
mod object;
mod registry;
mod scene;

pub use behavior::{Behavior, BehaviorContext, Canvas, FrameTime, SpriteDraw, TextDraw};
pub use behaviors::{Animation, FrameRect, SpriteRenderer, TextRenderer, Transform};
pub use object::{AttachPolicy, BehaviorSlot, Object};
pub use registry::{BehaviorFactory, BehaviorRegistry, BUILTIN_NAMESPACE};
pub use scene::{Scene, SCENE_PLACEHOLDER};
