//! `bulma-css-vars.config.json` loading and validation.

use crate::error::{Error, Result};
use crate::fs::{absolute_path, exists, read_file};
use cssvars::generator::DEFAULT_BLOCK_WRAPPER;
use cssvars::types::ColorValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "bulma-css-vars.config.json";
pub const MAIN_SASS_FILE_NAME: &str = "src/scss/app.scss";

pub const DEFAULT_CONFIG_CONTENT: &str = r##"{
  "sassEntryFile": "src/scss/app.scss",
  "sassOutputFile": "src/scss/theme.sass",
  "colorDefs": {
    "primary": "#5229fa"
  }
}
"##;

pub const DEFAULT_MAIN_SASS_CONTENT: &str = "@import './scss/theme.sass';
@import 'bulma-css-vars/bulma-cv-lib';
";

/// Options as written in the config file. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Sass file receiving the `$name: var(--name);` scaffold.
    pub sass_output_file: String,
    /// File receiving the computed custom property block.
    pub theme_file: String,
    pub sass_entry_file: Option<String>,
    /// Base colors, in output order.
    pub color_defs: IndexMap<String, ColorValue>,
    pub theme_selector: String,
    /// Where to write the static fallback stylesheet, if anywhere.
    pub fallback_file: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sass_output_file: "./generated-bulma-css-vars.sass".to_string(),
            theme_file: "./generated-bulma-css-vars-theme.sass".to_string(),
            sass_entry_file: None,
            color_defs: IndexMap::new(),
            theme_selector: DEFAULT_BLOCK_WRAPPER.to_string(),
            fallback_file: None,
        }
    }
}

impl Options {
    /// Reads the config file in `cwd`.
    pub fn load(cwd: &Path) -> Result<Self> {
        let path = config_path(cwd);
        if !exists(&path) {
            return Err(Error::ConfigMissing {
                file: CONFIG_FILE_NAME,
                path,
            });
        }
        let content = read_file(&path)?;
        let options: Options = serde_json::from_str(&content)
            .map_err(|source| Error::ConfigInvalid { path: path.clone(), source })?;
        log::debug!(
            "loaded {} with {} color definitions",
            path.display(),
            options.color_defs.len()
        );
        Ok(options)
    }

    pub fn color_names(&self) -> Vec<&str> {
        self.color_defs.keys().map(String::as_str).collect()
    }
}

/// Validated options with every path resolved against the working directory.
#[derive(Clone, Debug)]
pub struct Config {
    pub options: Options,
    pub sass_output_file: PathBuf,
    pub theme_file: PathBuf,
    pub sass_entry_file: PathBuf,
    pub fallback_file: Option<PathBuf>,
}

impl Config {
    pub fn load(cwd: &Path) -> Result<Self> {
        Self::from_options(Options::load(cwd)?, cwd)
    }

    /// Resolves paths and checks that the Sass entry file exists.
    pub fn from_options(options: Options, cwd: &Path) -> Result<Self> {
        let entry = options
            .sass_entry_file
            .as_deref()
            .ok_or(Error::MissingEntryFile)?;
        let sass_entry_file = absolute_path(entry, cwd);
        if !exists(&sass_entry_file) {
            return Err(Error::EntryFileNotFound(sass_entry_file));
        }

        Ok(Self {
            sass_output_file: absolute_path(&options.sass_output_file, cwd),
            theme_file: absolute_path(&options.theme_file, cwd),
            fallback_file: options
                .fallback_file
                .as_deref()
                .map(|f| absolute_path(f, cwd)),
            sass_entry_file,
            options,
        })
    }
}

pub fn config_path(cwd: &Path) -> PathBuf {
    cwd.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::write_file;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let options: Options = serde_json::from_str(r#"{ "sassEntryFile": "main.scss" }"#).unwrap();
        assert_eq!(options.sass_output_file, "./generated-bulma-css-vars.sass");
        assert_eq!(options.theme_file, "./generated-bulma-css-vars-theme.sass");
        assert_eq!(options.theme_selector, ":root");
        assert!(options.color_defs.is_empty());
        assert!(options.fallback_file.is_none());
    }

    #[test]
    fn test_color_defs_keep_order_and_shapes() {
        let options: Options = serde_json::from_str(
            r##"{ "colorDefs": {
                "primary": "#5229fa",
                "link": { "h": 229, "s": 53, "l": 53 },
                "info": { "r": 62, "g": 142, "b": 208 }
            } }"##,
        )
        .unwrap();
        assert_eq!(options.color_names(), vec!["primary", "link", "info"]);
        assert_eq!(options.color_defs["link"], ColorValue::hsl(229.0, 53.0, 53.0));
        assert_eq!(options.color_defs["info"], ColorValue::rgb(62.0, 142.0, 208.0));
    }

    #[test]
    fn test_default_config_parses() {
        let options: Options = serde_json::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert_eq!(options.sass_entry_file.as_deref(), Some(MAIN_SASS_FILE_NAME));
        assert_eq!(options.color_names(), vec!["primary"]);
    }

    #[test]
    fn test_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::ConfigMissing { .. })
        ));

        write_file(&config_path(dir.path()), "{ not json").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::ConfigInvalid { .. })
        ));

        write_file(&config_path(dir.path()), "{}").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::MissingEntryFile)));

        write_file(&config_path(dir.path()), r#"{ "sassEntryFile": "app.scss" }"#).unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(Error::EntryFileNotFound(_))
        ));

        write_file(&dir.path().join("app.scss"), "").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(
            config.theme_file,
            dir.path().join("generated-bulma-css-vars-theme.sass")
        );
    }
}
