//! Error types for color resolution.
//!
//! Only the color side of the crate can fail. Stylesheet scanning and
//! fallback synthesis treat anything they cannot make sense of as "not a
//! tracked usage" and carry on.

use thiserror::Error;

/// Errors that can occur while resolving colors and their derived variables.
///
/// # Examples
///
/// ```rust
/// use cssvars::types::RgbaColor;
///
/// let result = RgbaColor::parse("#ggg");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CssVarsError {
    /// A color literal could not be parsed.
    #[error("invalid color: {0}")]
    ParseError(String),

    /// A color function received an argument it cannot interpret.
    #[error("invalid argument {argument:?} for {function}: {reason}")]
    InvalidArgument {
        function: String,
        argument: String,
        reason: String,
    },

    /// A function name outside of the supported catalogue.
    #[error("unknown color function: {0}")]
    UnknownFunction(String),

    /// A call chain was requested for a color that has no base value.
    #[error("color {0} has calls but no base value")]
    MissingBaseValue(String),

    /// The color name is not part of the call set.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// The style target rejected a property.
    #[error("failed to set {name}: {reason}")]
    Style { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CssVarsError>;
