//! Vector and color literals
//!
//! Scene files write vectors and colors as parenthesized, comma-separated
//! float lists: `(1.5, 2, -3)`. This module turns that text into numbers.
//! Every failure reports the offending fragment and its character offset
//! inside the literal; a failed parse never yields a default value.

use crate::types::{Color, Vec2, Vec3};
use thiserror::Error;

/// Error produced while parsing a vector or color literal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralError {
    #[error("Cannot parse a vector with {0} axes")]
    UnsupportedAxes(usize),

    #[error("Unexpected character '{found}' at character {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("Expected {expected} components but found {found} at character {offset}")]
    AxisCount {
        expected: usize,
        found: usize,
        offset: usize,
    },

    #[error("\"{text}\" is not a valid float at character {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("Unexpected \"{text}\" after vector at character {offset}")]
    TrailingInput { text: String, offset: usize },

    #[error("Unexpected end of vector string at character {offset}")]
    UnexpectedEnd { offset: usize },
}

impl LiteralError {
    /// Character offset within the literal where the problem was found
    pub fn offset(&self) -> Option<usize> {
        match self {
            LiteralError::UnsupportedAxes(_) => None,
            LiteralError::UnexpectedChar { offset, .. }
            | LiteralError::AxisCount { offset, .. }
            | LiteralError::InvalidNumber { offset, .. }
            | LiteralError::TrailingInput { offset, .. }
            | LiteralError::UnexpectedEnd { offset } => Some(*offset),
        }
    }
}

/// Parse `(a, b[, c[, d]])` into exactly `axes` floats.
///
/// `axes` must be 2, 3 or 4. Whitespace is allowed before the opening
/// parenthesis, around each component and after the closing parenthesis.
pub fn parse_vector(text: &str, axes: usize) -> Result<Vec<f32>, LiteralError> {
    if !(2..=4).contains(&axes) {
        return Err(LiteralError::UnsupportedAxes(axes));
    }

    let mut components = Vec::with_capacity(axes);
    let mut current = String::new();
    let mut current_start = 0;
    let mut opened = false;
    let mut closed = false;

    for (offset, c) in text.chars().enumerate() {
        if closed {
            if c.is_whitespace() {
                continue;
            }
            return Err(LiteralError::TrailingInput {
                text: text.chars().skip(offset).collect(),
                offset,
            });
        }

        if !opened {
            match c {
                '(' => {
                    opened = true;
                    current_start = offset + 1;
                }
                c if c.is_whitespace() => {}
                found => return Err(LiteralError::UnexpectedChar { found, offset }),
            }
            continue;
        }

        match c {
            ',' | ')' => {
                components.push(parse_component(&current, current_start)?);
                current.clear();
                current_start = offset + 1;

                if c == ')' {
                    if components.len() != axes {
                        return Err(LiteralError::AxisCount {
                            expected: axes,
                            found: components.len(),
                            offset,
                        });
                    }
                    closed = true;
                } else if components.len() == axes {
                    return Err(LiteralError::AxisCount {
                        expected: axes,
                        found: axes + 1,
                        offset,
                    });
                }
            }
            '(' => return Err(LiteralError::UnexpectedChar { found: c, offset }),
            other => current.push(other),
        }
    }

    if !closed {
        return Err(LiteralError::UnexpectedEnd {
            offset: text.chars().count(),
        });
    }

    Ok(components)
}

/// Parse one float component. `start` is the character offset of `raw`.
fn parse_component(raw: &str, start: usize) -> Result<f32, LiteralError> {
    let offset = start + raw.chars().take_while(|c| c.is_whitespace()).count();
    let text = raw.trim();

    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LiteralError::InvalidNumber {
            text: text.to_string(),
            offset,
        }),
    }
}

/// Parse a 2-axis literal such as `(16, 32)`
pub fn parse_vec2(text: &str) -> Result<Vec2, LiteralError> {
    let c = parse_vector(text, 2)?;
    Ok(Vec2::new(c[0], c[1]))
}

/// Parse a 3-axis literal such as `(1.0, 2.0, 0.5)`
pub fn parse_vec3(text: &str) -> Result<Vec3, LiteralError> {
    let c = parse_vector(text, 3)?;
    Ok(Vec3::new(c[0], c[1], c[2]))
}

/// Parse a 4-axis literal into its raw components, in order
pub fn parse_vec4(text: &str) -> Result<[f32; 4], LiteralError> {
    let c = parse_vector(text, 4)?;
    Ok([c[0], c[1], c[2], c[3]])
}

/// Parse a 3- or 4-component color literal.
///
/// Both axis counts are attempted; whichever succeeds decides the color (see
/// [`Color::from_components`] for the 0-1 versus 0-255 rule). When neither
/// parses, the 3-component error is returned.
pub fn parse_color(text: &str) -> Result<Color, LiteralError> {
    let rgb = parse_vector(text, 3);
    let rgba = parse_vector(text, 4);

    let components = match (rgb, rgba) {
        (Ok(components), _) | (Err(_), Ok(components)) => components,
        (Err(err), Err(_)) => return Err(err),
    };

    Ok(Color::from_components(&components))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_axis_count() {
        assert_eq!(parse_vector("(1, 2)", 2).unwrap(), vec![1.0, 2.0]);
        assert_eq!(parse_vector("(1,2,3)", 3).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            parse_vector("(0.25, -4.5, 1e2, .5)", 4).unwrap(),
            vec![0.25, -4.5, 100.0, 0.5]
        );
    }

    #[test]
    fn test_parse_tolerates_outer_whitespace() {
        assert_eq!(parse_vec2("  ( 3 ,  4 )  ").unwrap(), Vec2::new(3.0, 4.0));
        assert_eq!(
            parse_vec3("\t(1.5,2.5,3.5)").unwrap(),
            Vec3::new(1.5, 2.5, 3.5)
        );
    }

    #[test]
    fn test_missing_parenthesis() {
        assert_eq!(
            parse_vector("1, 2)", 2),
            Err(LiteralError::UnexpectedChar {
                found: '1',
                offset: 0
            })
        );
        assert_eq!(
            parse_vector("(1, 2", 2),
            Err(LiteralError::UnexpectedEnd { offset: 5 })
        );
    }

    #[test]
    fn test_wrong_axis_count() {
        assert_eq!(
            parse_vector("(1, 2)", 3),
            Err(LiteralError::AxisCount {
                expected: 3,
                found: 2,
                offset: 5
            })
        );
        assert_eq!(
            parse_vector("(1, 2, 3)", 2),
            Err(LiteralError::AxisCount {
                expected: 2,
                found: 3,
                offset: 5
            })
        );
    }

    #[test]
    fn test_non_numeric_component() {
        assert_eq!(
            parse_vector("(1, abc)", 2),
            Err(LiteralError::InvalidNumber {
                text: "abc".to_string(),
                offset: 4
            })
        );
        assert!(parse_vector("(1, , 3)", 3).is_err());
        assert!(parse_vector("(1 2, 3)", 2).is_err());
        assert!(parse_vector("(inf, 3)", 2).is_err());
        assert!(parse_vector("(NaN, 3)", 2).is_err());
    }

    #[test]
    fn test_trailing_characters() {
        let err = parse_vector("(1, 2)x", 2).unwrap_err();
        assert_eq!(
            err,
            LiteralError::TrailingInput {
                text: "x".to_string(),
                offset: 6
            }
        );
        assert_eq!(err.offset(), Some(6));
        assert!(parse_vector("(1, 2)(3, 4)", 2).is_err());
    }

    #[test]
    fn test_unsupported_axes() {
        assert_eq!(parse_vector("(1)", 1), Err(LiteralError::UnsupportedAxes(1)));
        assert_eq!(
            parse_vector("(1, 2, 3, 4, 5)", 5),
            Err(LiteralError::UnsupportedAxes(5))
        );
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("(1, 0, 0)").unwrap(), Color::RED);
        assert_eq!(parse_color("(255, 0, 0)").unwrap(), Color::RED);
        assert_eq!(
            parse_color("(0, 0, 255, 128)").unwrap(),
            Color::rgba(0, 0, 255, 128)
        );
        assert_eq!(
            parse_color("(0, 1, 0, 0.5)").unwrap(),
            Color::rgba(0, 255, 0, 127)
        );
        assert_ne!(
            parse_color("(0.5, 0.5, 0.5)").unwrap(),
            parse_color("(128, 128, 128)").unwrap()
        );
    }

    #[test]
    fn test_parse_color_reports_three_axis_error() {
        let err = parse_color("(1, 2)").unwrap_err();
        assert_eq!(
            err,
            LiteralError::AxisCount {
                expected: 3,
                found: 2,
                offset: 5
            }
        );
        assert!(parse_color("red").is_err());
    }
}
