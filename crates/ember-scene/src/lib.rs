//! Ember Scene - Scene file tokenizing, loading and writing
//!
//! Scene files are plain text: each `{ ... }` block at the top level is an
//! object, and each `add_script: "<Name>"` inside it attaches a behavior
//! whose fields follow in a nested block.

mod loader;
mod report;
mod source;
mod token;
mod tokenizer;
mod writer;

pub use loader::{LoadError, SceneLoader};
pub use report::{Diagnostic, LoadReport, Severity};
pub use source::{FileSceneSource, MemorySceneSource, SceneSource};
pub use token::{Position, Scope, Token, TokenKind};
pub use tokenizer::{SyntaxError, SyntaxErrorKind, Tokenizer};
pub use writer::write_scene;
