//! Position, scale and rotation of an object

use crate::behavior::{unknown_field, Behavior};
use ember_core::{Result, Vec3};
use ember_schema::{FieldDecl, FieldKind, FieldValue};
use std::any::Any;

const FIELDS: &[FieldDecl] = &[
    FieldDecl::new("position", FieldKind::Vec3, "World position, z is draw depth"),
    FieldDecl::new("scale", FieldKind::F32, "Uniform scale factor"),
    FieldDecl::new("rotation", FieldKind::F32, "Rotation in radians"),
];

/// Every object carries exactly one Transform
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position, clamping depth into `0..=1`
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z.clamp(0.0, 1.0));
    }
}

impl Behavior for Transform {
    fn type_name(&self) -> &'static str {
        "Transform"
    }

    fn duplicates_allowed(&self) -> bool {
        false
    }

    fn fields(&self) -> &'static [FieldDecl] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "position" => Some(self.position.into()),
            "scale" => Some(self.scale.into()),
            "rotation" => Some(self.rotation.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "position" => self.position = value.try_into()?,
            "scale" => self.scale = value.try_into()?,
            "rotation" => self.rotation = value.try_into()?,
            _ => return Err(unknown_field(self.type_name(), name)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
