//! # cssvars - Bulma colors as CSS custom properties
//!
//! Bulma computes derived colors (`darken($primary, 5%)`, `findColorInvert`,
//! ...) at Sass compile time. To make those colors themeable at runtime, every
//! derived color is turned into its own custom property, and this crate
//! computes their values.
//!
//! - **Color math**: the Bulma color functions over HSL ([`types`])
//! - **Call sets**: base colors and the function chains applied to them
//!   ([`calls`])
//! - **Generation**: variable names and values, as Sass / CSS text or pushed
//!   into a [`StyleTarget`](generator::StyleTarget) ([`generator`])
//! - **CSS scanning**: which variables a compiled stylesheet uses, and static
//!   fallbacks for them ([`parser`])
//!
//! ## Quick Start
//!
//! ```rust
//! use cssvars::calls::{ColorCallDef, ColorCallSet, ColorFnCall};
//! use cssvars::generator::ColorGenerator;
//! use cssvars::types::ColorFn;
//!
//! let set = ColorCallSet::new().with_color(
//!     "black",
//!     ColorCallDef::new("#5291a3").with_call(ColorFnCall::bare(ColorFn::ColorInvert)),
//! );
//!
//! let css = ColorGenerator::new(set).create_writable_sass_file(None).unwrap();
//! assert_eq!(
//!     css,
//!     ":root {\n  --black: rgb(82, 145, 163);\n  --black--color-invert: rgb(255, 255, 255);\n}"
//! );
//! ```
//!
//! ## Variable names
//!
//! A derived variable is named after its base color followed by one
//! `--<argument>--<function>` segment per call, outermost call first:
//!
//! - `--primary--color-invert`
//! - `--primary--500--darken` (`darken(5%)`)
//! - `--black--42deg--adjusthue--4200--lighten` (`adjusthue(lighten(42%), 42deg)`)
//!
//! ## Modules
//!
//! - [`types`]: colors, color values and the function catalogue
//! - [`calls`]: call chains and call sets
//! - [`generator`]: resolving call sets into variables
//! - [`parser`]: scanning compiled CSS
//! - [`tools`]: one-shot color helpers
//! - [`error`]: error types

pub mod calls;
pub mod error;
pub mod generator;
pub mod parser;
pub mod tools;
pub mod types;

pub use calls::{ColorCallDef, ColorCallSet, ColorFnCall};
pub use error::CssVarsError;
pub use generator::{ColorGenerator, ColorUpdater, ResolvedVariable, StyleTarget};
