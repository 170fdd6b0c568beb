//! Color definitions as they appear in configuration.

use crate::error::{CssVarsError, Result};
use crate::types::color::{Hsl, RgbaColor};
use serde::{Deserialize, Serialize};

/// A base color as written by the user.
///
/// Deserializes from either an object (`{"h": 42, "s": 42, "l": 42}` or
/// `{"r": 82, "g": 145, "b": 163}`) or a string (`"#5291a3"`, `"coral"`,
/// `"rgb(82, 145, 163)"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hsl {
        h: f32,
        s: f32,
        l: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        a: Option<f32>,
    },
    Rgb {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        a: Option<f32>,
    },
    Hex(String),
}

impl ColorValue {
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::Hsl { h, s, l, a: None }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::Rgb { r, g, b, a: None }
    }

    pub fn hex(value: impl Into<String>) -> Self {
        Self::Hex(value.into())
    }

    pub fn to_rgb(&self) -> Result<RgbaColor> {
        match self {
            Self::Hsl { h, s, l, a } => Ok(self.checked_hsl(*h, *s, *l, *a)?.to_rgb()),
            Self::Rgb { r, g, b, a } => {
                let channel = |v: f32| {
                    if (0.0..=255.0).contains(&v) {
                        Ok(v.round() as u8)
                    } else {
                        Err(CssVarsError::ParseError(format!(
                            "rgb component out of range (0-255): {}",
                            v
                        )))
                    }
                };
                Ok(RgbaColor::rgba(
                    channel(*r)?,
                    channel(*g)?,
                    channel(*b)?,
                    checked_alpha(*a)?,
                ))
            }
            Self::Hex(value) => RgbaColor::parse(value),
        }
    }

    /// Normalizes to HSL, rounded to whole units.
    pub fn to_hsl(&self) -> Result<Hsl> {
        match self {
            Self::Hsl { h, s, l, a } => Ok(self.checked_hsl(*h, *s, *l, *a)?.rounded()),
            _ => Ok(self.to_rgb()?.to_hsl().rounded()),
        }
    }

    fn checked_hsl(&self, h: f32, s: f32, l: f32, a: Option<f32>) -> Result<Hsl> {
        if !h.is_finite() || !(0.0..=100.0).contains(&s) || !(0.0..=100.0).contains(&l) {
            return Err(CssVarsError::ParseError(format!(
                "hsl components out of range: {}, {}%, {}%",
                h, s, l
            )));
        }
        Ok(Hsl::new(h, s, l, checked_alpha(a)?))
    }
}

fn checked_alpha(a: Option<f32>) -> Result<f32> {
    match a {
        None => Ok(1.0),
        Some(a) if (0.0..=1.0).contains(&a) => Ok(a),
        Some(a) => Err(CssVarsError::ParseError(format!(
            "alpha out of range (0-1): {}",
            a
        ))),
    }
}

impl From<RgbaColor> for ColorValue {
    fn from(color: RgbaColor) -> Self {
        Self::Rgb {
            r: color.r as f32,
            g: color.g as f32,
            b: color.b as f32,
            a: (!color.is_opaque()).then_some(color.a),
        }
    }
}

impl From<Hsl> for ColorValue {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl {
            h: hsl.h,
            s: hsl.s,
            l: hsl.l,
            a: (hsl.a < 1.0).then_some(hsl.a),
        }
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_value_converts_to_rgb() {
        let value = ColorValue::hsl(0.0, 100.0, 50.0);
        assert_eq!(value.to_rgb().unwrap(), RgbaColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_hex_value_normalizes_to_rounded_hsl() {
        let hsl = ColorValue::hex("#5291a3").to_hsl().unwrap();
        assert_eq!((hsl.h, hsl.s, hsl.l), (193.0, 33.0, 48.0));
    }

    #[test]
    fn test_out_of_range_components_fail() {
        assert!(matches!(
            ColorValue::rgb(300.0, 0.0, 0.0).to_rgb(),
            Err(CssVarsError::ParseError(_))
        ));
        assert!(ColorValue::hsl(10.0, 120.0, 50.0).to_hsl().is_err());
        assert!(ColorValue::hex("#12345").to_rgb().is_err());
    }
}
