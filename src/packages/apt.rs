// src/packages/apt.rs

//! Apt/dpkg backend (Debian, Ubuntu)

use super::find_packages;
use super::traits::{PackageManager, SyncJob};
use crate::config::Layout;
use crate::distro::{PackageFamily, Release};
use crate::error::{Error, Result};
use crate::process::{self, path_arg, CommandLine};
use crate::repository::RepoFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Preferences pinning repositories without an origin (local `file://`
/// sources) above the distribution archives
pub const LOCAL_PIN: &str = "Package: *\nPin: origin \"\"\nPin-Priority: 1001\n";

/// Package manager for Debian-based distributions
#[derive(Debug, Default, Clone, Copy)]
pub struct Apt;

impl Apt {
    pub fn new() -> Self {
        Self
    }

    pub fn install_command(packages: &[String]) -> CommandLine {
        CommandLine::new("sudo")
            .args([
                "env",
                "DEBIAN_FRONTEND=noninteractive",
                "apt-get",
                "install",
                "--assume-yes",
            ])
            .args(packages.iter().cloned())
    }

    pub fn import_key_command(key: &Path) -> CommandLine {
        CommandLine::new("apt-key").arg("add").arg(path_arg(key))
    }

    pub fn update_command() -> CommandLine {
        CommandLine::new("apt-get").args(["-q", "update"])
    }

    pub fn package_name_command(deb: &Path) -> CommandLine {
        CommandLine::new("dpkg-deb").arg("-f").arg(path_arg(deb)).arg("Package")
    }
}

impl PackageManager for Apt {
    fn family(&self) -> PackageFamily {
        PackageFamily::Apt
    }

    fn repo_file_path(&self, layout: &Layout, name: &str) -> PathBuf {
        layout.apt_sources_dir.join(format!("{}.list", name))
    }

    fn render_repo_file(&self, file: &RepoFile) -> String {
        file.template.render_apt(file)
    }

    fn repo_file_label(&self) -> &'static str {
        "deb sources.list file"
    }

    fn import_repo_key(&self, key: &Path) -> Result<()> {
        process::run(&Self::import_key_command(key))
    }

    fn install(&self, packages: &[String]) -> Result<()> {
        process::run(&Self::install_command(packages))
    }

    fn update(&self) -> Result<()> {
        process::run(&Self::update_command())
    }

    fn enumerate_repo(&self, path: &Path) -> Result<Vec<String>> {
        find_packages(path, "deb")?
            .into_iter()
            .map(|deb| {
                let out = process::run_get_stdout(&Self::package_name_command(&path.join(deb)), true)?;
                Ok(out.trim_end().to_string())
            })
            .collect()
    }

    fn pin_local_repos(&self, preferences: &Path) -> Result<bool> {
        if let Some(parent) = preferences.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(preferences, LOCAL_PIN)?;
        info!("Pinned local repositories in {}", preferences.display());
        Ok(true)
    }

    fn check_sync(&self) -> Result<()> {
        Err(Error::UnsupportedPlatform(
            "repository sync is only supported on yum based distributions".to_string(),
        ))
    }

    fn sync(&self, _jobs: &[SyncJob], _release: &Release) -> Result<()> {
        self.check_sync()
    }
}
