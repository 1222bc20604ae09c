// src/packages/yum.rs

//! Yum/RPM backend (CentOS, Red Hat)

use super::find_packages;
use super::traits::{PackageManager, SyncJob, SyncTarget};
use crate::config::Layout;
use crate::distro::{PackageFamily, Release};
use crate::error::{Error, Result};
use crate::process::{self, path_arg, CommandLine};
use crate::repository::RepoFile;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Package manager for RPM-based distributions
#[derive(Debug, Default, Clone, Copy)]
pub struct Yum;

impl Yum {
    pub fn new() -> Self {
        Self
    }

    pub fn install_command(packages: &[String]) -> CommandLine {
        CommandLine::new("yum").args(["-y", "install"]).args(packages.iter().cloned())
    }

    pub fn import_key_command(key: &Path) -> CommandLine {
        CommandLine::new("rpm").arg("--import").arg(path_arg(key))
    }

    /// `rpm` query printing the name of every package file, run inside `path`
    pub fn query_names_command(path: &Path, rpms: &[String]) -> CommandLine {
        CommandLine::new("rpm")
            .args(["-q", "--queryformat=%{NAME} ", "-p"])
            .args(rpms.iter().cloned())
            .with_cwd(path)
    }

    pub fn reposync_command(repo_id: &str, destination: &Path) -> CommandLine {
        CommandLine::new("reposync")
            .arg(format!("--repoid={}", repo_id))
            .args(["--newest-only", "--norepopath", "-p"])
            .arg(path_arg(destination))
    }

    /// Upstream repository ids feeding a sync target on a RHEL major release
    pub fn source_repo_ids(target: SyncTarget, release: &Release) -> Result<Vec<String>> {
        let major = release.int_major();
        if !matches!(major, 6 | 7) {
            return Err(Error::UnsupportedPlatform(format!(
                "no upstream repositories for release {}",
                release.major
            )));
        }
        let suffixes: &[&str] = match target {
            SyncTarget::Ceph => &["mon", "osd"],
            SyncTarget::CalamariMinions => &["calamari"],
        };
        Ok(suffixes
            .iter()
            .map(|s| format!("rhel-{}-server-rhceph-1.2-{}-rpms", major, s))
            .collect())
    }

    /// Install the sync tooling when it is missing
    fn ensure_sync_tools(&self) -> Result<()> {
        for (tool, package) in [("reposync", "yum-utils"), ("createrepo", "createrepo")] {
            if which::which(tool).is_err() {
                info!("{} not found, installing {}", tool, package);
                self.install(&[package.to_string()])?;
            } else {
                debug!("found {}", tool);
            }
        }
        Ok(())
    }
}

impl PackageManager for Yum {
    fn family(&self) -> PackageFamily {
        PackageFamily::Yum
    }

    fn repo_file_path(&self, layout: &Layout, name: &str) -> PathBuf {
        layout.yum_repos_dir.join(format!("{}.repo", name))
    }

    fn render_repo_file(&self, file: &RepoFile) -> String {
        file.template.render_yum(file)
    }

    fn repo_file_label(&self) -> &'static str {
        "repo file"
    }

    fn import_repo_key(&self, key: &Path) -> Result<()> {
        process::run(&Self::import_key_command(key))
    }

    fn install(&self, packages: &[String]) -> Result<()> {
        process::run(&Self::install_command(packages))
    }

    fn update(&self) -> Result<()> {
        // yum refreshes metadata on demand
        Ok(())
    }

    fn enumerate_repo(&self, path: &Path) -> Result<Vec<String>> {
        let rpms: Vec<String> = find_packages(path, "rpm")?
            .iter()
            .map(|p| path_arg(p))
            .collect();
        if rpms.is_empty() {
            return Ok(Vec::new());
        }
        let out = process::run_get_stdout(&Self::query_names_command(path, &rpms), false)?;
        Ok(out.split_whitespace().map(str::to_string).collect())
    }

    fn pin_local_repos(&self, _preferences: &Path) -> Result<bool> {
        Ok(false)
    }

    fn sync(&self, jobs: &[SyncJob], release: &Release) -> Result<()> {
        // Validate every job before touching the system
        let plan = jobs
            .iter()
            .map(|job| Ok((job, Self::source_repo_ids(job.target, release)?)))
            .collect::<Result<Vec<_>>>()?;

        self.ensure_sync_tools()?;
        for (job, repo_ids) in plan {
            info!("Syncing {} into {}", job.target, job.destination.display());
            for repo_id in &repo_ids {
                process::run(&Self::reposync_command(repo_id, &job.destination))?;
            }
            process::run(&CommandLine::new("createrepo").arg(path_arg(&job.destination)))?;
            process::run(&CommandLine::new("yum").args(["clean", "all"]))?;
        }
        Ok(())
    }
}
