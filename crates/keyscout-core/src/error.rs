//! Error taxonomy shared by every layer.
//!
//! [`LoadError`] is recovered locally by the dataset store (the dataset
//! becomes the empty sentinel) and is only surfaced so callers can log it.
//! [`Error::Validation`] and [`Error::NotFound`] are request rejections and
//! stay distinct so a transport can map them to different statuses.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("saved-list store error: {0}")]
    Backend(String),

    #[error("export failed: {0}")]
    Export(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }
}

/// Why a dataset could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("dataset source {0} does not exist")]
    MissingSource(PathBuf),

    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("could not read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("partition {partition:?} not found in {path}")]
    MissingPartition { path: PathBuf, partition: String },

    #[error("no keyword column could be identified (headers: {0:?})")]
    UnresolvedColumns(Vec<String>),

    #[error("no dataset source configured")]
    NoSource,
}

impl LoadError {
    pub fn unreadable(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        LoadError::Unreadable {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
