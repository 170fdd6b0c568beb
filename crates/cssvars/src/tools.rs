//! One-shot color helpers.
//!
//! These take any color string [`ColorValue`] accepts and return the result
//! as `rgb(...)` / `rgba(...)` text, computed exactly like the derived
//! variables are.
//!
//! ```
//! use cssvars::tools::{darken, rgba};
//!
//! assert_eq!(darken("#ffffff", "50%").unwrap(), "rgb(128, 128, 128)");
//! assert_eq!(rgba("black", "50%").unwrap(), "rgba(0, 0, 0, 0.5)");
//! ```

use crate::error::Result;
use crate::types::{ColorFn, ColorValue};

fn apply(function: ColorFn, color: &str, amount: &str) -> Result<String> {
    let hsl = ColorValue::from(color).to_hsl()?;
    Ok(function.apply(hsl, Some(amount))?.to_rgb().to_string())
}

pub fn darken(color: &str, amount: &str) -> Result<String> {
    apply(ColorFn::Darken, color, amount)
}

pub fn lighten(color: &str, amount: &str) -> Result<String> {
    apply(ColorFn::Lighten, color, amount)
}

/// Sets the alpha channel.
pub fn rgba(color: &str, alpha: &str) -> Result<String> {
    apply(ColorFn::Rgba, color, alpha)
}

/// Lowers the alpha channel.
pub fn transparentize(color: &str, amount: &str) -> Result<String> {
    apply(ColorFn::Transparentize, color, amount)
}

/// A color definition from RGB channels.
pub fn rgb(r: f32, g: f32, b: f32) -> ColorValue {
    ColorValue::rgb(r, g, b)
}

/// A color definition from hue (degrees), saturation and lightness (percent).
pub fn hsl(h: f32, s: f32, l: f32) -> ColorValue {
    ColorValue::hsl(h, s, l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CssVarsError;

    #[test]
    fn test_lighten_and_darken() {
        assert_eq!(lighten("#000", "100%").unwrap(), "rgb(255, 255, 255)");
        assert_eq!(darken("hsl(0, 0%, 50%)", "5000").unwrap(), "rgb(0, 0, 0)");
    }

    #[test]
    fn test_transparentize() {
        assert_eq!(
            transparentize("rgba(0, 0, 0, 0.5)", "25%").unwrap(),
            "rgba(0, 0, 0, 0.25)"
        );
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(lighten("nope", "10%"), Err(CssVarsError::ParseError(_))));
        assert!(matches!(
            lighten("#000", "lots"),
            Err(CssVarsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            rgb(82.0, 145.0, 163.0).to_rgb().unwrap().to_hex(),
            "#5291a3"
        );
        assert_eq!(hsl(0.0, 0.0, 100.0).to_rgb().unwrap().to_string(), "rgb(255, 255, 255)");
    }
}
