// src/error.rs

//! Error types for ice_setup
//!
//! Every operational failure is a variant of [`Error`]. The binary catches
//! them once, logs them, and exits with status 1.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Host distribution, release, or requested operation is not supported
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// A required directory is missing
    #[error("could not find {}", .0.display())]
    DirNotFound(PathBuf),

    /// A versioned package directory has no version subdirectory
    #[error("could not find version directory in {}", .0.display())]
    VersionNotFound(PathBuf),

    /// Unrecognized repository name
    #[error("{0}")]
    InvalidRepoName(String),

    /// Subprocess exited with a non-zero status
    #[error("command returned non-zero exit status: {code} ({command})")]
    NonZeroExit { command: String, code: i32 },

    /// Not running with the required privileges
    #[error("{0}")]
    PermissionDenied(String),

    /// Operator declined to continue or input was closed
    #[error("{0}")]
    Aborted(String),

    /// Malformed configuration (layout file or cephdeploy.conf)
    #[error("{0}")]
    Config(String),

    /// Mirroring a tree into itself, or into one of its own subdirectories
    #[error("refusing to copy {} into {}", .from.display(), .to.display())]
    OverlappingPaths { from: PathBuf, to: PathBuf },

    /// Package bundle could not be fetched
    #[error("{0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Short name of the error kind, used as the log prefix
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform(_) => "UnsupportedPlatform",
            Self::DirNotFound(_) => "DirNotFound",
            Self::VersionNotFound(_) => "VersionNotFound",
            Self::InvalidRepoName(_) => "InvalidRepoName",
            Self::NonZeroExit { .. } => "NonZeroExit",
            Self::PermissionDenied(_) => "PermissionDenied",
            Self::Aborted(_) => "Aborted",
            Self::Config(_) => "ConfigError",
            Self::OverlappingPaths { .. } => "OverlappingPaths",
            Self::Download(_) => "DownloadError",
            Self::Io(_) => "IoError",
        }
    }
}
