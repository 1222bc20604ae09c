// src/filesystem/bundle.rs

//! Package bundles: a directory, a gzip'd tarball, or a URL of one
//!
//! Tarballs are unpacked into a temporary directory that lives as long as
//! the returned [`PackageBundle`].

use crate::config::Layout;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tar::Archive;
use tempfile::TempDir;
use tracing::{debug, info};
use url::Url;

/// Timeout for bundle downloads (bundles are large)
const HTTP_TIMEOUT: Duration = Duration::from_secs(600);

/// A resolved package tree
#[derive(Debug)]
pub struct PackageBundle {
    root: PathBuf,
    scratch: Option<TempDir>,
}

impl PackageBundle {
    /// Directory holding the package trees (`ceph/`, `calamari-server/`, ...)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the tree lives in a temporary extraction directory
    pub fn is_extracted(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Parse `location` as an http(s) URL
fn http_url(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

/// Resolve a package location to a directory
pub fn resolve(location: &str, layout: &Layout) -> Result<PackageBundle> {
    if let Some(url) = http_url(location) {
        let archive = download(&url, &layout.download_dir)?;
        return extract(&archive);
    }

    let path = Path::new(location);
    if path.is_dir() {
        debug!("Using package directory {}", path.display());
        return Ok(PackageBundle {
            root: path.to_path_buf(),
            scratch: None,
        });
    }
    if path.is_file() {
        return extract(path);
    }
    Err(Error::DirNotFound(path.to_path_buf()))
}

/// Unpack a gzip'd tarball into a fresh temporary directory
pub fn extract(archive: &Path) -> Result<PackageBundle> {
    let scratch = tempfile::Builder::new().prefix("ice-setup-").tempdir()?;
    let root = scratch.path().join("repo");
    fs::create_dir_all(&root)?;

    info!("Extracting {} to {}", archive.display(), root.display());
    let file = File::open(archive)?;
    let mut tar = Archive::new(GzDecoder::new(file));
    tar.set_preserve_permissions(true);
    tar.unpack(&root).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to extract {}: {}", archive.display(), e),
        )
    })?;

    Ok(PackageBundle {
        root,
        scratch: Some(scratch),
    })
}

/// Download `url` into `dest_dir`, replacing any file of the same name
pub fn download(url: &Url, dest_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| Error::Download(format!("Failed to create HTTP client: {e}")))?;

    info!("Downloading {}", url);
    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| Error::Download(format!("Failed to download {url}: {e}")))?;
    if !response.status().is_success() {
        return Err(Error::Download(format!("HTTP {} from {}", response.status(), url)));
    }

    // Redirects may land on a different file name
    let file_name = file_name_for(response.url()).unwrap_or_else(|| "bundle.tar.gz".to_string());
    let dest = dest_dir.join(file_name);
    if dest.is_file() {
        debug!("Removing existing {}", dest.display());
        fs::remove_file(&dest)?;
    }

    let mut file = File::create(&dest)?;
    let bytes = response
        .copy_to(&mut file)
        .map_err(|e| Error::Download(format!("Failed to read response from {url}: {e}")))?;
    debug!("Wrote {} bytes to {}", bytes, dest.display());
    Ok(dest)
}

fn file_name_for(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
