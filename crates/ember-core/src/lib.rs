//! Ember Core - Foundational types for the Ember engine
//!
//! This crate provides the core types that all other Ember crates depend on:
//! - `ObjectId` - Process-unique object identifiers
//! - `Vec2`, `Vec3`, `Color`, `SpriteAnchor` - Value types stored in behavior fields
//! - `literal` - Parsing of `(a, b[, c[, d]])` vector and color literals
//! - Error types and Result alias

mod error;
mod id;
pub mod literal;
mod types;

pub use error::{EmberError, Result};
pub use id::ObjectId;
pub use literal::{parse_color, parse_vec2, parse_vec3, parse_vec4, parse_vector, LiteralError};
pub use types::{Color, SpriteAnchor, Vec2, Vec3};
