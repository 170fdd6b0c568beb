//! The fixed catalogue of color functions.
//!
//! Each function maps an [`Hsl`] color and an optional argument string to a
//! new color. The catalogue mirrors Bulma's Sass helpers so that values
//! computed here agree with the ones Bulma would compute at build time.
//!
//! ## Arguments
//!
//! Arguments come either from configuration (`"42%"`, `"42deg"`) or from
//! custom property names written by the Sass side (`4200`, `42deg`). Bare
//! numbers use the Sass encoding: the Sass value multiplied by 100, so
//! `4200` is `42%` for `lighten` and `70` is `0.7` for `rgba`. In names, a
//! decimal point is written as `_`.
//!
//! | Function         | Argument            | Effect                                 |
//! |------------------|---------------------|----------------------------------------|
//! | `lighten`        | percentage          | lightness + amount, clamped            |
//! | `darken`         | percentage          | lightness - amount, clamped            |
//! | `saturate`       | percentage          | saturation + amount, clamped           |
//! | `desaturate`     | percentage          | saturation - amount, clamped           |
//! | `adjusthue`      | degrees             | hue + amount, modulo 360               |
//! | `transparentize` | alpha               | alpha - amount, floored at 0           |
//! | `rgba`           | alpha               | alpha set to amount                    |
//! | `color-invert`   | none                | readable text color for the background |
//! | `light-color`    | none                | light counterpart (Bulma)              |
//! | `dark-color`     | none                | dark counterpart (Bulma)               |

use crate::error::{CssVarsError, Result};
use crate::types::color::{Hsl, RgbaColor};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    combinator::{all_consuming, opt},
    number::complete::recognize_float,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A color function from the supported catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorFn {
    #[serde(rename = "rgba")]
    Rgba,
    #[serde(rename = "adjusthue", alias = "adjust-hue")]
    AdjustHue,
    #[serde(rename = "saturate")]
    Saturate,
    #[serde(rename = "desaturate")]
    Desaturate,
    #[serde(rename = "lighten")]
    Lighten,
    #[serde(rename = "darken")]
    Darken,
    #[serde(rename = "color-invert")]
    ColorInvert,
    #[serde(rename = "dark-color")]
    DarkColor,
    #[serde(rename = "light-color")]
    LightColor,
    #[serde(rename = "transparentize")]
    Transparentize,
}

/// How a function interprets its numeric argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArgKind {
    None,
    Percentage,
    Degrees,
    Alpha,
}

/// A parsed function argument before unit interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Argument {
    /// A bare number, Sass value times 100 (or degrees for hue).
    Scaled(f32),
    Percent(f32),
    Degrees(f32),
}

/// Luminance above which `color-invert` switches to dark text.
const INVERT_LUMINANCE_THRESHOLD: f32 = 0.55;
const LIGHT_COLOR_LIGHTNESS: f32 = 96.0;
const DARK_COLOR_BASE_LIGHTNESS: f32 = 29.0;

impl ColorFn {
    pub const ALL: [ColorFn; 10] = [
        ColorFn::Rgba,
        ColorFn::AdjustHue,
        ColorFn::Saturate,
        ColorFn::Desaturate,
        ColorFn::Lighten,
        ColorFn::Darken,
        ColorFn::ColorInvert,
        ColorFn::DarkColor,
        ColorFn::LightColor,
        ColorFn::Transparentize,
    ];

    /// The name used in configuration and in custom property names.
    pub fn name(self) -> &'static str {
        match self {
            ColorFn::Rgba => "rgba",
            ColorFn::AdjustHue => "adjusthue",
            ColorFn::Saturate => "saturate",
            ColorFn::Desaturate => "desaturate",
            ColorFn::Lighten => "lighten",
            ColorFn::Darken => "darken",
            ColorFn::ColorInvert => "color-invert",
            ColorFn::DarkColor => "dark-color",
            ColorFn::LightColor => "light-color",
            ColorFn::Transparentize => "transparentize",
        }
    }

    fn arg_kind(self) -> ArgKind {
        match self {
            ColorFn::Lighten | ColorFn::Darken | ColorFn::Saturate | ColorFn::Desaturate => {
                ArgKind::Percentage
            }
            ColorFn::AdjustHue => ArgKind::Degrees,
            ColorFn::Rgba | ColorFn::Transparentize => ArgKind::Alpha,
            ColorFn::ColorInvert | ColorFn::DarkColor | ColorFn::LightColor => ArgKind::None,
        }
    }

    /// Returns true if the function needs an argument.
    pub fn takes_argument(self) -> bool {
        self.arg_kind() != ArgKind::None
    }

    /// Applies the function to `color`.
    pub fn apply(self, color: Hsl, arg: Option<&str>) -> Result<Hsl> {
        let Hsl { h, s, l, a } = color;
        let result = match self {
            ColorFn::Lighten => Hsl::new(h, s, l + self.amount(arg)?, a),
            ColorFn::Darken => Hsl::new(h, s, l - self.amount(arg)?, a),
            ColorFn::Saturate => Hsl::new(h, s + self.amount(arg)?, l, a),
            ColorFn::Desaturate => Hsl::new(h, s - self.amount(arg)?, l, a),
            ColorFn::AdjustHue => Hsl::new(h + self.amount(arg)?, s, l, a),
            ColorFn::Transparentize => Hsl::new(h, s, l, a - self.amount(arg)?),
            ColorFn::Rgba => Hsl::new(h, s, l, self.amount(arg)?),
            ColorFn::ColorInvert => {
                if color.to_rgb().luminance() > INVERT_LUMINANCE_THRESHOLD {
                    RgbaColor::rgba(0, 0, 0, 0.7).to_hsl()
                } else {
                    RgbaColor::white().to_hsl()
                }
            }
            ColorFn::LightColor => Hsl::new(h, s, l.max(LIGHT_COLOR_LIGHTNESS), a),
            ColorFn::DarkColor => {
                let delta = 0.53 - color.to_rgb().luminance();
                let target = (DARK_COLOR_BASE_LIGHTNESS + delta * 53.0).round();
                Hsl::new(h, s, target.max(DARK_COLOR_BASE_LIGHTNESS), a)
            }
        };
        log::trace!("{}({:?}): {} -> {}", self, arg, color, result);
        Ok(result)
    }

    /// Decodes `arg` into the unit the function works in: percentage points,
    /// degrees, or an alpha fraction.
    fn amount(self, arg: Option<&str>) -> Result<f32> {
        let raw = arg.ok_or_else(|| self.invalid("", "missing argument"))?;
        let parsed = parse_argument(raw).ok_or_else(|| self.invalid(raw, "not a number"))?;

        match (self.arg_kind(), parsed) {
            (ArgKind::Percentage, Argument::Percent(p)) => Ok(p),
            (ArgKind::Percentage, Argument::Scaled(n)) => Ok(n / 100.0),
            (ArgKind::Degrees, Argument::Degrees(d) | Argument::Scaled(d)) => Ok(d),
            (ArgKind::Alpha, Argument::Percent(p) | Argument::Scaled(p)) => Ok(p / 100.0),
            (ArgKind::None, _) => Err(self.invalid(raw, "function takes no argument")),
            (_, Argument::Degrees(_)) => {
                Err(self.invalid(raw, "degrees are only valid for adjusthue"))
            }
            (ArgKind::Degrees, Argument::Percent(_)) => Err(self.invalid(raw, "expected degrees")),
        }
    }

    /// Encodes `arg` the way it appears inside a custom property name.
    ///
    /// Percentages are rewritten in the scaled form (`42%` becomes `4200`),
    /// degree arguments keep their unit, and a decimal point becomes `_`.
    /// Encoding an already encoded token returns it unchanged.
    pub fn name_token(self, arg: &str) -> Result<String> {
        let raw = arg.trim();
        let parsed = parse_argument(raw).ok_or_else(|| self.invalid(raw, "not a number"))?;

        let token = match (self.arg_kind(), parsed) {
            (ArgKind::None, _) => return Err(self.invalid(raw, "function takes no argument")),
            (ArgKind::Degrees, Argument::Degrees(d)) => format!("{}deg", format_number(d)),
            (_, Argument::Percent(p)) => format_number(p * 100.0),
            (_, Argument::Scaled(n)) => format_number(n),
            (_, Argument::Degrees(_)) => {
                return Err(self.invalid(raw, "degrees are only valid for adjusthue"));
            }
        };
        // Validate the unit against the function.
        self.amount(Some(raw))?;

        Ok(token
            .chars()
            .filter_map(|c| match c {
                '.' => Some('_'),
                c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
                _ => None,
            })
            .collect())
    }

    fn invalid(self, argument: &str, reason: &str) -> CssVarsError {
        CssVarsError::InvalidArgument {
            function: self.name().to_string(),
            argument: argument.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ColorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFn {
    type Err = CssVarsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "adjust-hue" => Ok(ColorFn::AdjustHue),
            name => ColorFn::ALL
                .into_iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| CssVarsError::UnknownFunction(name.to_string())),
        }
    }
}

fn parse_argument(raw: &str) -> Option<Argument> {
    let normalized = raw.trim().replace('_', ".");
    let (_, (number, unit)) = all_consuming(number_with_unit)(normalized.as_str()).ok()?;
    let value: f32 = number.parse().ok()?;
    Some(match unit {
        Some("%") => Argument::Percent(value),
        Some(_) => Argument::Degrees(value),
        None => Argument::Scaled(value),
    })
}

fn number_with_unit(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, number) = recognize_float(input)?;
    let (input, unit) = opt(alt((tag("%"), tag("deg"))))(input)?;
    Ok((input, (number, unit)))
}

fn format_number(value: f32) -> String {
    let value = (value * 10_000.0).round() / 10_000.0;
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
