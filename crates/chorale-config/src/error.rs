//! Preset I/O errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Anything that can go wrong loading, saving, or editing a preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset file could not be read.
    #[error("cannot read preset '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A preset file could not be written.
    #[error("cannot write preset '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid preset document.
    #[error("invalid preset TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The preset could not be encoded.
    #[error("cannot encode preset as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A string ID that names none of the chorus parameters.
    #[error("unknown chorus parameter '{0}'")]
    UnknownParameter(String),

    /// Values outside the parameter ranges.
    #[error("preset out of range: {0}")]
    Validation(#[from] ValidationError),

    /// The preset directory could not be created.
    #[error("cannot create preset directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
