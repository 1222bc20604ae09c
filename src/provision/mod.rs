// src/provision/mod.rs

//! Provisioning steps
//!
//! Each step works against a [`Context`]: where files go ([`Layout`]), which
//! distribution the host runs, the package manager driving it, and whether
//! GPG checking is on.
//!
//! - `configure`: local repositories and repositories served to remote hosts
//! - `install`: Calamari and ceph-deploy
//! - `update`: synchronize served repositories from upstream
//! - `setup`: the interactive walk-through tying the steps together

pub mod configure;
pub mod install;
pub mod setup;
pub mod update;

pub use configure::{configure_local, configure_remote, configure_local_repos, configure_remote_repos, RemoteRepos};
pub use install::{install_calamari, install_ceph_deploy};
pub use setup::{run_setup, SetupOptions};
pub use update::update_repos;

use crate::config::Layout;
use crate::distro::Distribution;
use crate::error::Result;
use crate::packages::{self, PackageManager};
use std::path::Path;

/// Everything a provisioning step needs to know about the host
pub struct Context {
    pub layout: Layout,
    pub distro: Distribution,
    pub use_gpg: bool,
    pkg: Box<dyn PackageManager>,
}

impl Context {
    /// Build a context using the package manager native to `distro`
    pub fn new(layout: Layout, distro: Distribution, use_gpg: bool) -> Self {
        let pkg = packages::for_family(distro.family);
        Self {
            layout,
            distro,
            use_gpg,
            pkg,
        }
    }

    /// Detect the distribution from the layout's release files
    pub fn detect(layout: Layout, use_gpg: bool) -> Result<Self> {
        let distro = Distribution::detect(&layout)?;
        Ok(Self::new(layout, distro, use_gpg))
    }

    /// Replace the package manager
    pub fn with_package_manager(mut self, pkg: Box<dyn PackageManager>) -> Self {
        self.pkg = pkg;
        self
    }

    pub fn pkg(&self) -> &dyn PackageManager {
        self.pkg.as_ref()
    }

    /// GPG key URL for a repository whose tree lives at `tree_url`
    ///
    /// Red Hat signs with the system release key; everyone else ships a
    /// `release.asc` at the root of each tree.
    pub fn gpg_url(&self, tree_url: &str) -> String {
        if self.distro.is_redhat() {
            file_url(&self.layout.rhel_gpg_key)
        } else {
            format!("{}/release.asc", tree_url)
        }
    }
}

/// `file://` URL of a local path
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}
