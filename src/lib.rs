//! Command line driver for `cssvars`.
//!
//! Reads `bulma-css-vars.config.json`, keeps the generated Sass scaffold in
//! sync with the configured colors, compiles the project's Sass entry and
//! writes the theme file with the values of every color variable the
//! compiled CSS uses.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logger;
pub mod sass;

pub use config::{Config, Options};
pub use error::{Error, Result};
