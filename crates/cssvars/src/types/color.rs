//! RGBA and HSL color types with parsing and conversion.
//!
//! [`RgbaColor`] is the working representation for every resolved variable
//! value; [`Hsl`] is the space the color functions operate in.
//!
//! ## Supported Color Formats
//!
//! - **Hex**: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - **RGB**: `rgb(r, g, b)`, `rgba(r, g, b, a)`
//! - **HSL**: `hsl(h, s%, l%)`, `hsla(h, s%, l%, a)`
//! - **Named**: CSS color names like `red`, `aliceblue`, `rebeccapurple`
//! - **Special**: `transparent`
//!
//! ## Output
//!
//! Colors render as `rgb(r, g, b)` when opaque and `rgba(r, g, b, a)`
//! otherwise, which is the form written into custom properties:
//!
//! ```
//! use cssvars::types::RgbaColor;
//!
//! let teal = RgbaColor::parse("#5291a3").unwrap();
//! assert_eq!(teal.to_string(), "rgb(82, 145, 163)");
//! assert_eq!(teal.with_alpha(0.5).to_string(), "rgba(82, 145, 163, 0.5)");
//! ```

use crate::error::{CssVarsError, Result};
use std::fmt;

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbaColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
}

/// A color in HSL space.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness are percentages
/// `[0, 100]`, alpha is `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl RgbaColor {
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Returns a fully transparent color.
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0.0)
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Returns a copy of this color with the specified alpha value.
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, alpha)
    }

    /// Returns true if the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Relative luminance the way Bulma computes it for contrast decisions.
    ///
    /// Channels below `0.03928` are divided by `12.92`, the rest go through
    /// `((c + 0.055) / 1.055)^2`. Bulma squares instead of raising to 2.4
    /// because Sass has no fractional power; the thresholds in
    /// [`ColorFn`](crate::types::ColorFn) are tuned against that.
    pub fn luminance(&self) -> f32 {
        let r = Self::srgb_to_linear(self.r as f32 / 255.0);
        let g = Self::srgb_to_linear(self.g as f32 / 255.0);
        let b = Self::srgb_to_linear(self.b as f32 / 255.0);

        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    fn srgb_to_linear(c: f32) -> f32 {
        if c < 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powi(2)
        }
    }

    /// Renders the color as `#rrggbb`, or `#rrggbbaa` when translucent.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, a)
        }
    }

    /// Parse a color string in various formats.
    ///
    /// Supported formats:
    /// - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
    /// - RGB: `rgb(r,g,b)`, `rgba(r,g,b,a)`
    /// - HSL: `hsl(h,s%,l%)`, `hsla(h,s%,l%,a)`
    /// - Named: CSS color names like `red`, `blue`, `aliceblue`
    /// - Special: `transparent`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(parse_error("empty color string"));
        }

        let lower = input.to_lowercase();

        if lower == "transparent" {
            return Ok(Self::transparent());
        }

        if let Some(hex) = lower.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        match lower.split_once('(').map(|(name, _)| name.trim_end()) {
            Some("rgb" | "rgba") => Self::parse_rgb_func(&lower),
            Some("hsl" | "hsla") => Self::parse_hsl_func(&lower),
            Some(name) => Err(parse_error(format!("unknown color function: {}", name))),
            None => Self::parse_named(&lower),
        }
    }

    fn parse_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .chars()
            .map(Self::parse_hex_digit)
            .collect::<Result<Vec<u8>>>()?;

        match digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r, g, b, a] => Ok(Self::rgba(r * 17, g * 17, b * 17, (a * 17) as f32 / 255.0)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Self::rgba(
                r1 * 16 + r2,
                g1 * 16 + g2,
                b1 * 16 + b2,
                (a1 * 16 + a2) as f32 / 255.0,
            )),
            _ => Err(parse_error(format!(
                "invalid hex color length: {}",
                digits.len()
            ))),
        }
    }

    fn parse_hex_digit(c: char) -> Result<u8> {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| parse_error(format!("invalid hex digit: {}", c)))
    }

    /// Splits `name(a, b, c)` into its comma separated arguments.
    fn function_args<'a>(input: &'a str, name: &str) -> Result<Vec<&'a str>> {
        let start = input
            .find('(')
            .ok_or_else(|| parse_error(format!("missing '(' in {} function", name)))?;
        let end = input
            .rfind(')')
            .filter(|end| *end > start && *end == input.len() - 1)
            .ok_or_else(|| parse_error(format!("missing ')' in {} function", name)))?;

        let parts: Vec<&str> = input[start + 1..end].split(',').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(parse_error(format!(
                "{} requires 3 or 4 components",
                name
            )));
        }
        Ok(parts)
    }

    fn parse_rgb_func(input: &str) -> Result<Self> {
        let parts = Self::function_args(input, "rgb")?;

        let r = Self::parse_u8(parts[0])?;
        let g = Self::parse_u8(parts[1])?;
        let b = Self::parse_u8(parts[2])?;
        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Ok(Self::rgba(r, g, b, a))
    }

    fn parse_hsl_func(input: &str) -> Result<Self> {
        let parts = Self::function_args(input, "hsl")?;

        let h: f32 = parts[0]
            .trim_end_matches("deg")
            .parse()
            .map_err(|_| parse_error(format!("invalid hue: {}", parts[0])))?;
        let s = Self::parse_percentage(parts[1])?;
        let l = Self::parse_percentage(parts[2])?;
        let a = match parts.get(3) {
            Some(alpha) => Self::parse_alpha(alpha)?,
            None => 1.0,
        };

        Ok(Hsl::new(h, s, l, a).to_rgb())
    }

    fn parse_u8(s: &str) -> Result<u8> {
        let val: f32 = s
            .parse()
            .map_err(|_| parse_error(format!("invalid number: {}", s)))?;
        if !(0.0..=255.0).contains(&val) {
            return Err(parse_error(format!("value out of range (0-255): {}", s)));
        }
        Ok(val.round() as u8)
    }

    fn parse_alpha(s: &str) -> Result<f32> {
        let val = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().map(|v| v / 100.0),
            None => s.parse::<f32>(),
        }
        .map_err(|_| parse_error(format!("invalid alpha: {}", s)))?;
        if !(0.0..=1.0).contains(&val) {
            return Err(parse_error(format!("alpha out of range (0-1): {}", s)));
        }
        Ok(val)
    }

    fn parse_percentage(s: &str) -> Result<f32> {
        let val: f32 = s
            .trim_end_matches('%')
            .parse()
            .map_err(|_| parse_error(format!("invalid percentage: {}", s)))?;
        if !(0.0..=100.0).contains(&val) {
            return Err(parse_error(format!("percentage out of range: {}", s)));
        }
        Ok(val)
    }

    /// Converts to HSL without rounding.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0, self.a);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + (if g < b { 6.0 } else { 0.0 })
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0, self.a)
    }

    fn parse_named(name: &str) -> Result<Self> {
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
            .ok_or_else(|| parse_error(format!("unknown color name: {}", name)))
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

impl std::str::FromStr for RgbaColor {
    type Err = CssVarsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Rounds hue, saturation and lightness to whole units.
    ///
    /// Derived colors are computed from the rounded form so that values match
    /// the ones the Sass side of the toolchain produces.
    pub fn rounded(&self) -> Self {
        Self::new(self.h.round(), self.s.round(), self.l.round(), self.a)
    }

    pub fn to_rgb(&self) -> RgbaColor {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 {
                l * (1.0 + s)
            } else {
                l + s - l * s
            };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        RgbaColor::rgba(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            self.a,
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
        } else {
            write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
        }
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn parse_error(message: impl Into<String>) -> CssVarsError {
    CssVarsError::ParseError(message.into())
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];


#[cfg(test)]
mod hsl_math_tests {
    use super::*;

    #[test]
    fn test_hsl_roundtrip_within_one() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(51) {
                for b in (0..=255).step_by(85) {
                    let original = RgbaColor::rgb(r as u8, g as u8, b as u8);
                    let back = original.to_hsl().to_rgb();
                    assert!((original.r as i16 - back.r as i16).abs() <= 1);
                    assert!((original.g as i16 - back.g as i16).abs() <= 1);
                    assert!((original.b as i16 - back.b as i16).abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_rounded_hsl_of_reference_color() {
        let hsl = RgbaColor::rgb(82, 145, 163).to_hsl().rounded();
        assert_eq!((hsl.h, hsl.s, hsl.l), (193.0, 33.0, 48.0));
    }

    #[test]
    fn test_hue_wraps() {
        let hsl = Hsl::new(400.0, 50.0, 50.0, 1.0);
        assert_eq!(hsl.h, 40.0);
        let hsl = Hsl::new(-30.0, 50.0, 50.0, 1.0);
        assert_eq!(hsl.h, 330.0);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(RgbaColor::black().luminance(), 0.0);
        assert!((RgbaColor::white().luminance() - 1.0).abs() < 1e-4);
    }
}
