//! Value types carried by behavior fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// A 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Formats as a vector literal, e.g. `(1.5, 2)`
impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

/// Formats as a vector literal, e.g. `(0, 0, 1)`
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// RGBA color with 8-bit channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 3 or 4 parsed literal components.
    ///
    /// If any component exceeds 1 the components are 0-255 channel values,
    /// otherwise they are normalized 0-1 floats. Missing alpha is opaque.
    pub fn from_components(components: &[f32]) -> Self {
        let integer = components.iter().any(|&c| c > 1.0);
        let channel = |index: usize, fallback: u8| -> u8 {
            match components.get(index) {
                Some(&v) => {
                    let v = if integer { v } else { v * 255.0 };
                    v.clamp(0.0, 255.0) as u8
                }
                None => fallback,
            }
        };

        Self {
            r: channel(0, 0),
            g: channel(1, 0),
            b: channel(2, 0),
            a: channel(3, 255),
        }
    }

    /// Render as a 4-component literal that `from_components` maps back to `self`.
    pub fn to_literal(&self) -> String {
        let channels = [self.r, self.g, self.b, self.a];

        if channels.iter().all(|&c| c <= 1) {
            // Half-step bias: normalized channels are truncated on the way back in
            let n = |c: u8| (c as f32 + 0.5) / 255.0;
            format!("({}, {}, {}, {})", n(self.r), n(self.g), n(self.b), n(self.a))
        } else {
            format!("({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Anchor point used when positioning a sprite or text relative to its transform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteAnchor {
    #[default]
    Center,
    MiddleTop,
    MiddleBottom,
    MiddleLeft,
    MiddleRight,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SpriteAnchor {
    pub const ALL: [SpriteAnchor; 9] = [
        SpriteAnchor::Center,
        SpriteAnchor::MiddleTop,
        SpriteAnchor::MiddleBottom,
        SpriteAnchor::MiddleLeft,
        SpriteAnchor::MiddleRight,
        SpriteAnchor::TopLeft,
        SpriteAnchor::TopRight,
        SpriteAnchor::BottomLeft,
        SpriteAnchor::BottomRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpriteAnchor::Center => "Center",
            SpriteAnchor::MiddleTop => "MiddleTop",
            SpriteAnchor::MiddleBottom => "MiddleBottom",
            SpriteAnchor::MiddleLeft => "MiddleLeft",
            SpriteAnchor::MiddleRight => "MiddleRight",
            SpriteAnchor::TopLeft => "TopLeft",
            SpriteAnchor::TopRight => "TopRight",
            SpriteAnchor::BottomLeft => "BottomLeft",
            SpriteAnchor::BottomRight => "BottomRight",
        }
    }
}

impl fmt::Display for SpriteAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-sensitive match on the variant name
impl FromStr for SpriteAnchor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SpriteAnchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == s)
            .ok_or_else(|| format!("unknown sprite anchor '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_add() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_vector_display() {
        assert_eq!(Vec2::new(1.5, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(Vec3::new(0.0, 0.0, 1.0).to_string(), "(0, 0, 1)");
    }

    #[test]
    fn test_color_components_boundary() {
        assert_eq!(Color::from_components(&[1.0, 0.0, 0.0]), Color::RED);
        assert_eq!(Color::from_components(&[255.0, 0.0, 0.0]), Color::RED);

        let normalized = Color::from_components(&[0.5, 0.5, 0.5]);
        let channels = Color::from_components(&[128.0, 128.0, 128.0]);
        assert_eq!(normalized, Color::rgb(127, 127, 127));
        assert_eq!(channels, Color::rgb(128, 128, 128));
        assert_ne!(normalized, channels);
    }

    #[test]
    fn test_color_components_alpha() {
        assert_eq!(
            Color::from_components(&[255.0, 0.0, 0.0, 128.0]),
            Color::rgba(255, 0, 0, 128)
        );
        assert_eq!(
            Color::from_components(&[0.0, 0.0, 1.0, 0.0]),
            Color::rgba(0, 0, 255, 0)
        );
    }

    #[test]
    fn test_color_components_clamp() {
        assert_eq!(
            Color::from_components(&[300.0, -4.0, 12.9]),
            Color::rgb(255, 0, 12)
        );
    }

    #[test]
    fn test_color_literal_maps_back() {
        for color in [
            Color::WHITE,
            Color::BLACK,
            Color::rgba(1, 0, 1, 1),
            Color::rgba(0, 0, 0, 0),
            Color::rgba(1, 1, 1, 1),
            Color::rgba(12, 200, 1, 0),
        ] {
            let literal = color.to_literal();
            let parsed: Vec<f32> = literal
                .trim_matches(|c| c == '(' || c == ')')
                .split(',')
                .map(|s| s.trim().parse().unwrap())
                .collect();
            assert_eq!(Color::from_components(&parsed), color, "literal {}", literal);
        }
    }

    #[test]
    fn test_anchor_names_are_case_sensitive() {
        assert_eq!("TopLeft".parse::<SpriteAnchor>(), Ok(SpriteAnchor::TopLeft));
        assert!("topleft".parse::<SpriteAnchor>().is_err());
        for anchor in SpriteAnchor::ALL {
            assert_eq!(anchor.to_string().parse::<SpriteAnchor>(), Ok(anchor));
        }
    }
}
