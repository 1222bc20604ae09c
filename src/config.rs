// src/config.rs

//! Filesystem layout configuration
//!
//! Every path the tool reads or writes lives in [`Layout`]. The defaults are
//! the production locations; a TOML file can override any subset of them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an optional layout file
pub const CONFIG_ENV: &str = "ICE_SETUP_CONFIG";

/// Filesystem roots used during provisioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Where local repositories (calamari-server, ceph-deploy) are placed
    pub local_prefix: PathBuf,

    /// Content root served by Calamari to remote nodes
    pub remote_prefix: PathBuf,

    /// Yum repository fragments
    pub yum_repos_dir: PathBuf,

    /// Apt source list fragments
    pub apt_sources_dir: PathBuf,

    /// Apt preferences file pinning the local repositories
    pub apt_preferences: PathBuf,

    /// os-release file used for distribution detection
    pub os_release: PathBuf,

    /// Fallback for hosts without os-release (EL6)
    pub redhat_release: PathBuf,

    /// Fallback for Debian hosts without os-release
    pub debian_version: PathBuf,

    /// Scratch directory for downloaded bundles
    pub download_dir: PathBuf,

    /// System GPG key on Red Hat hosts
    pub rhel_gpg_key: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            local_prefix: PathBuf::from("/opt/ICE"),
            remote_prefix: PathBuf::from("/opt/calamari/webapp/content"),
            yum_repos_dir: PathBuf::from("/etc/yum.repos.d"),
            apt_sources_dir: PathBuf::from("/etc/apt/sources.list.d"),
            apt_preferences: PathBuf::from("/etc/apt/preferences.d/rhcs.pref"),
            os_release: PathBuf::from("/etc/os-release"),
            redhat_release: PathBuf::from("/etc/redhat-release"),
            debian_version: PathBuf::from("/etc/debian_version"),
            download_dir: PathBuf::from("/opt/ICE/tmp"),
            rhel_gpg_key: PathBuf::from("/etc/pki/rpm-gpg/RPM-GPG-KEY-redhat-release"),
        }
    }
}

impl Layout {
    /// Load a layout file; keys missing from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading layout from {}", path.display());
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid layout file {}: {}", path.display(), e)))
    }

    /// Load from an explicit path when given, otherwise use the defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Re-root every path under `root` (used for staging and tests)
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let defaults = Self::default();
        let reroot = |p: &Path| root.join(p.strip_prefix("/").unwrap_or(p));
        Self {
            local_prefix: reroot(&defaults.local_prefix),
            remote_prefix: reroot(&defaults.remote_prefix),
            yum_repos_dir: reroot(&defaults.yum_repos_dir),
            apt_sources_dir: reroot(&defaults.apt_sources_dir),
            apt_preferences: reroot(&defaults.apt_preferences),
            os_release: reroot(&defaults.os_release),
            redhat_release: reroot(&defaults.redhat_release),
            debian_version: reroot(&defaults.debian_version),
            download_dir: reroot(&defaults.download_dir),
            rhel_gpg_key: defaults.rhel_gpg_key,
        }
    }

    /// Destination directory of a local repository
    pub fn local_repo_dir(&self, name: &str) -> PathBuf {
        self.local_prefix.join(name)
    }

    /// Destination directory of a repository served to remote hosts
    pub fn remote_repo_dir(&self, name: &str) -> PathBuf {
        self.remote_prefix.join(name)
    }
}
