//! The work behind each subcommand.

use crate::config::{
    CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_CONTENT, DEFAULT_MAIN_SASS_CONTENT,
    MAIN_SASS_FILE_NAME, Options, config_path,
};
use crate::error::{Error, Result};
use crate::fs::{absolute_path, exists, file_starts_with, read_file, write_file};
use crate::sass::compile_sass;
use cssvars::calls::{ColorCallDef, ColorCallSet};
use cssvars::generator::ColorGenerator;
use cssvars::parser::{FallbackOptions, get_css_fallbacks_with, get_used_variables};
use std::path::{Path, PathBuf};

/// Theme file content before the first generation run.
const EMPTY_THEME_CONTENT: &str = "#{\":root\"}";

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Read compiled CSS from this file instead of running the compiler.
    pub css: Option<PathBuf>,
    pub sass_compiler: String,
}

/// Writes a default config and Sass entry file into `cwd`.
///
/// Fails if a config file is already present. An existing entry file is left
/// alone.
pub fn init(cwd: &Path) -> Result<()> {
    let config = config_path(cwd);
    if exists(&config) {
        return Err(Error::ConfigExists(config));
    }
    write_file(&config, DEFAULT_CONFIG_CONTENT)?;
    log::info!("Created {}", config.display());

    let main_sass = cwd.join(MAIN_SASS_FILE_NAME);
    if !exists(&main_sass) {
        write_file(&main_sass, DEFAULT_MAIN_SASS_CONTENT)?;
        log::info!("Created {}", main_sass.display());
    }
    Ok(())
}

/// Regenerates the theme file for the project in `cwd`.
pub fn generate(cwd: &Path, options: &GenerateOptions) -> Result<()> {
    let config = Config::load(cwd)?;

    // The scaffold must exist before the entry file can compile.
    let names = config.options.color_names();
    let provisional: ColorCallSet = names
        .iter()
        .map(|name| (*name, ColorCallDef::default()))
        .collect();
    let scaffold =
        ColorGenerator::new(provisional).create_writable_sass_file_only_sass_base_variables();
    let output = &config.sass_output_file;
    if !exists(output) || !file_starts_with(output, &scaffold)? {
        write_file(&config.sass_output_file, &scaffold)?;
        log::info!("Updated {}", config.sass_output_file.display());
    }

    if !exists(&config.theme_file) {
        write_file(&config.theme_file, EMPTY_THEME_CONTENT)?;
    }

    let css = match &options.css {
        Some(path) => read_file(&absolute_path(path, cwd))?,
        None => compile_sass(&options.sass_compiler, &config.sass_entry_file)?,
    };

    let generator = ColorGenerator::new(used_call_set(&css, &config.options));
    let theme = generator.create_writable_sass_file(Some(&config.options.theme_selector))?;
    write_file(&config.theme_file, &theme)?;
    log::info!("Updated {}", config.theme_file.display());

    if let Some(fallback_file) = &config.fallback_file {
        let vars = generator.resolved_variables()?;
        let fallbacks = get_css_fallbacks_with(&css, &vars, &FallbackOptions::default());
        write_file(fallback_file, &fallbacks)?;
        log::info!("Updated {}", fallback_file.display());
    }
    Ok(())
}

/// Builds the fallback stylesheet for the compiled CSS at `css`, using the
/// color definitions from the config in `cwd`.
pub fn fallbacks(cwd: &Path, css: &Path, options: &FallbackOptions) -> Result<String> {
    let config = Options::load(cwd)?;
    let css = read_file(&absolute_path(css, cwd))?;
    let vars = ColorGenerator::new(used_call_set(&css, &config)).resolved_variables()?;
    if vars.is_empty() {
        log::warn!(
            "no variables from {} are used in the stylesheet",
            CONFIG_FILE_NAME
        );
    }
    Ok(get_css_fallbacks_with(&css, &vars, options))
}

/// The calls `css` uses, with base values taken from the color definitions.
fn used_call_set(css: &str, options: &Options) -> ColorCallSet {
    let mut set = get_used_variables(css, &options.color_names());
    for (name, value) in &options.color_defs {
        if set.contains(name) {
            set.entry(name).value = Some(value.clone());
        }
    }
    log::debug!("{} of {} colors in use", set.len(), options.color_defs.len());
    set
}
