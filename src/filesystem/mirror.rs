// src/filesystem/mirror.rs

//! Locating package trees and mirroring them into place

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Locate the package tree `<base>/<name>`
///
/// With `traverse`, the tree holds one directory per version and the first
/// one (in sorted order) is returned.
pub fn package_source(base: &Path, name: &str, traverse: bool) -> Result<PathBuf> {
    let source = base.join(name);
    if !source.is_dir() {
        return Err(Error::DirNotFound(source));
    }
    if !traverse {
        return Ok(source);
    }

    let mut versions: Vec<PathBuf> = fs::read_dir(&source)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    versions.sort();
    versions
        .into_iter()
        .next()
        .ok_or(Error::VersionNotFound(source))
}

/// Replace `destination` with a recursive copy of `source`
///
/// The destination's parent is created when missing and any existing
/// destination is removed first, so no stale files survive. A source that
/// already is the destination is left alone; nested trees are refused
/// before anything is removed.
pub fn overwrite_dir(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(Error::DirNotFound(source.to_path_buf()));
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let real_source = source.canonicalize()?;
    let real_destination = resolved(destination)?;
    if real_source == real_destination {
        info!("{} is already in place", destination.display());
        return Ok(());
    }
    if real_destination.starts_with(&real_source) || real_source.starts_with(&real_destination) {
        return Err(Error::OverlappingPaths {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
        });
    }

    if fs::symlink_metadata(destination).is_ok() {
        debug!("Removing existing {}", destination.display());
        if destination.is_dir() && !destination.is_symlink() {
            fs::remove_dir_all(destination)?;
        } else {
            fs::remove_file(destination)?;
        }
    }

    info!("Copying {} to {}", source.display(), destination.display());
    copy_tree(source, destination)
}

/// Canonical form of a path that may not exist yet
fn resolved(path: &Path) -> Result<PathBuf> {
    if fs::symlink_metadata(path).is_ok() {
        return Ok(path.canonicalize()?);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            Ok(parent.canonicalize()?.join(name))
        }
        _ => Ok(std::env::current_dir()?.join(path)),
    }
}

fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
            fs::set_permissions(&target, entry.metadata().map_err(walk_error)?.permissions())?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(link, &target)?;
        } else {
            // fs::copy carries the permission bits
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn walk_error(e: walkdir::Error) -> Error {
    let message = e.to_string();
    Error::Io(e.into_io_error().unwrap_or_else(|| std::io::Error::other(message)))
}
