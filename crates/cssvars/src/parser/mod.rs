//! Reading compiled CSS.
//!
//! Nothing here is a general CSS parser. The stylesheet is split into blocks
//! and declarations, and declaration values are searched for `var()`
//! references. That is enough to:
//!
//! - [`get_used_variables`]: find which derived color variables a stylesheet
//!   uses, as a [`ColorCallSet`](crate::calls::ColorCallSet)
//! - [`get_css_fallbacks`]: produce static fallback declarations for them
//!
//! ## Submodules
//!
//! - [`blocks`]: block / declaration reader and serializer
//! - [`reference`]: `var()` reference scanning
//! - [`usage`]: variable usage extraction
//! - [`fallback`]: fallback stylesheet synthesis

pub mod blocks;
pub mod fallback;
pub mod reference;
pub mod usage;

pub use crate::parser::blocks::{Block, Declaration, Node, Stylesheet, read_stylesheet};
pub use crate::parser::fallback::{FallbackOptions, get_css_fallbacks, get_css_fallbacks_with};
pub use crate::parser::reference::{VarReference, find_var_references};
pub use crate::parser::usage::get_used_variables;
