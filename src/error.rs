//! Library error types

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, CmsError>;

/// Errors raised while loading configuration or seed data, or parsing
/// user-supplied values.
///
/// Lookups that miss are not errors: they return `None` / `false`.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported file format: {0:?} (expected .yml, .yaml, .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Unknown post status: {0} (expected draft, published, scheduled or all)")]
    InvalidStatus(String),

    #[error("Unknown language: {0} (expected en, en-US, ar or ar-SA)")]
    InvalidLanguage(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl CmsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CmsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Supported on-disk formats for config and seed files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    pub(crate) fn from_path(path: &std::path::Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            _ => Err(CmsError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read and deserialize a YAML, JSON or TOML file, picking the decoder by extension
pub(crate) fn load_file<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| CmsError::io(path, e))?;
    match format {
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|source| CmsError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Json => serde_json::from_str(&content).map_err(|source| CmsError::Json {
            path: path.to_path_buf(),
            source,
        }),
        FileFormat::Toml => toml::from_str(&content).map_err(|source| CmsError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}
