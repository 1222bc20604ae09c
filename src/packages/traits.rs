// src/packages/traits.rs

//! The package-manager seam
//!
//! Each distribution family drives its own tooling behind [`PackageManager`].
//! Operations that a family has no use for are no-ops rather than errors,
//! except for [`PackageManager::sync`], which only Yum can perform.

use crate::config::Layout;
use crate::distro::{PackageFamily, Release};
use crate::error::{Error, Result};
use crate::repository::RepoFile;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Repositories that `update` can synchronize from upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTarget {
    Ceph,
    CalamariMinions,
}

impl SyncTarget {
    pub const ALL: [SyncTarget; 2] = [Self::Ceph, Self::CalamariMinions];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ceph => "ceph",
            Self::CalamariMinions => "calamari-minions",
        }
    }

    /// Expand operator-supplied names; `all` selects every target
    ///
    /// Unknown names are collected and reported together, even alongside
    /// `all`.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<SyncTarget>> {
        let mut targets = Vec::new();
        let mut unknown = Vec::new();
        let mut everything = false;
        for name in names.iter().map(AsRef::as_ref) {
            if name == "all" {
                everything = true;
                continue;
            }
            match name.parse::<SyncTarget>() {
                Ok(target) if !targets.contains(&target) => targets.push(target),
                Ok(_) => {}
                Err(_) => unknown.push(name.to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(Error::InvalidRepoName(format!(
                "Unrecognized repo name(s) given: {}",
                unknown.join(", ")
            )));
        }
        if everything {
            return Ok(Self::ALL.to_vec());
        }
        Ok(targets)
    }
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SyncTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::InvalidRepoName(format!("Unrecognized repo name: {}", s)))
    }
}

/// A resolved synchronization job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncJob {
    pub target: SyncTarget,
    pub destination: PathBuf,
}

/// Native package tooling of the host
pub trait PackageManager {
    fn family(&self) -> PackageFamily;

    /// Path of the repo file for `name`
    fn repo_file_path(&self, layout: &Layout, name: &str) -> PathBuf;

    /// Render a repository file body
    fn render_repo_file(&self, file: &RepoFile) -> String;

    /// Label used when showing a repo file to the operator
    fn repo_file_label(&self) -> &'static str;

    /// Write the repo file for `file.template`, replacing any previous one
    fn create_repo_file(&self, layout: &Layout, file: &RepoFile) -> Result<PathBuf> {
        let path = self.repo_file_path(layout, file.template.name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing repo file {}", path.display());
        fs::write(&path, self.render_repo_file(file))?;
        info!("Created repo file {}", path.display());
        Ok(path)
    }

    /// Log the rendered repo file so the operator can copy it to other hosts
    fn print_repo_file(&self, file: &RepoFile) -> String {
        let body = self.render_repo_file(file);
        info!("Contents of {} {}:", file.template, self.repo_file_label());
        for line in body.lines() {
            info!("{}", line);
        }
        body
    }

    /// Import a repository signing key
    fn import_repo_key(&self, key: &Path) -> Result<()>;

    /// Install packages by name
    fn install(&self, packages: &[String]) -> Result<()>;

    /// Refresh package metadata
    fn update(&self) -> Result<()>;

    /// Names of the packages stored in a repository directory
    fn enumerate_repo(&self, path: &Path) -> Result<Vec<String>>;

    /// Pin the local (`file://`) repositories above every other origin
    ///
    /// Returns whether a preferences file was written.
    fn pin_local_repos(&self, preferences: &Path) -> Result<bool>;

    /// Fail early when this backend cannot sync at all
    ///
    /// Runs before sync destinations are resolved, so an unsupported host
    /// is reported as such rather than as a missing cephdeploy.conf.
    fn check_sync(&self) -> Result<()> {
        Ok(())
    }

    /// Mirror upstream repositories into the served content tree
    fn sync(&self, jobs: &[SyncJob], release: &Release) -> Result<()>;
}
