//! Built-in behaviors

mod animation;
mod sprite_renderer;
mod text_renderer;
mod transform;

pub use animation::{Animation, FrameRect, MAX_FRAMES};
pub use sprite_renderer::SpriteRenderer;
pub use text_renderer::TextRenderer;
pub use transform::Transform;
