// src/packages/mod.rs

//! Native package-manager backends
//!
//! The host's distribution family selects a backend implementing
//! [`PackageManager`]: Yum for CentOS/Red Hat, Apt for Debian/Ubuntu.

pub mod apt;
pub mod traits;
pub mod yum;

pub use apt::Apt;
pub use traits::{PackageManager, SyncJob, SyncTarget};
pub use yum::Yum;

use crate::distro::PackageFamily;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Backend driving the given family
pub fn for_family(family: PackageFamily) -> Box<dyn PackageManager> {
    match family {
        PackageFamily::Yum => Box::new(Yum::new()),
        PackageFamily::Apt => Box::new(Apt::new()),
    }
}

/// Package files below `path` whose name ends in `extension`, relative to
/// `path` and sorted
pub(crate) fn find_packages(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Err(Error::DirNotFound(path.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(extension))
        .filter_map(|e| e.path().strip_prefix(path).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    Ok(files)
}
