//! Ember Runtime - Project configuration and scene management

mod clock;
mod config;
mod manager;

pub use clock::FrameClock;
pub use config::{EmberConfig, ProjectConfig, ScriptsConfig, CONFIG_FILE};
pub use manager::SceneManager;
