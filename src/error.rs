use cssvars::CssVarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("required config file '{file}' was not found at {}", .path.display())]
    ConfigMissing { file: &'static str, path: PathBuf },

    #[error("invalid config file {}: {source}", .path.display())]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file already exists at {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("cannot create definitions, entry sass file does not exist in config")]
    MissingEntryFile,

    #[error("cannot create definitions, entry sass file does not exist in file system at {}", .0.display())]
    EntryFileNotFound(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sass compilation failed: {0}")]
    Sass(String),

    #[error(transparent)]
    CssVars(#[from] CssVarsError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
