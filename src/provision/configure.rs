// src/provision/configure.rs

//! Repository configuration
//!
//! Local repositories (`calamari-server`, `ceph-deploy`) are copied under
//! the local prefix and registered with the host's package manager. Remote
//! repositories (`ceph`, `calamari-minions`) are copied into the content
//! tree Calamari serves to the cluster nodes.

use super::{file_url, Context};
use crate::error::Result;
use crate::filesystem::{overwrite_dir, package_source};
use crate::repository::{RepoFile, RepoTemplate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copy the `name` package tree into place and point the package manager
/// at it; returns the repository directory
pub fn configure_local(ctx: &Context, name: &str, package_path: &Path) -> Result<PathBuf> {
    let template = RepoTemplate::from_name(name)?;
    let source = package_source(package_path, name, false)?;
    debug!("detected packages path: {}", source.display());

    let destination = ctx.layout.local_repo_dir(name);
    let repo_url = file_url(&destination);
    let gpg_url = ctx.gpg_url(&repo_url);

    info!("Configuring local repository {}", name);
    overwrite_dir(&source, &destination)?;

    let repo_file = RepoFile::new(template, repo_url, gpg_url)
        .with_gpg_check(ctx.use_gpg)
        .with_codename(ctx.distro.codename.clone());
    ctx.pkg().create_repo_file(&ctx.layout, &repo_file)?;

    if ctx.use_gpg && !ctx.distro.is_redhat() {
        ctx.pkg().import_repo_key(&destination.join("release.asc"))?;
    }

    ctx.pkg().pin_local_repos(&ctx.layout.apt_preferences)?;
    ctx.pkg().update()?;
    Ok(destination)
}

/// Copy the `name` package tree into the served content tree
///
/// With `versioned`, `<package_path>/<name>` holds one directory per version
/// and the first is served as `<name>/<version>`. Returns the destination
/// name relative to the content root.
pub fn configure_remote(ctx: &Context, name: &str, package_path: &Path, versioned: bool) -> Result<String> {
    let source = package_source(package_path, name, versioned)?;
    let destination_name = match source.file_name() {
        Some(version) if versioned => format!("{}/{}", name, version.to_string_lossy()),
        _ => name.to_string(),
    };

    info!("Configuring remote repository {}", destination_name);
    overwrite_dir(&source, &ctx.layout.remote_repo_dir(&destination_name))?;
    Ok(destination_name)
}

/// Configure the Calamari server and ceph-deploy local repositories
pub fn configure_local_repos(ctx: &Context, package_path: &Path) -> Result<()> {
    configure_local(ctx, RepoTemplate::CalamariServer.name(), package_path)?;
    configure_local(ctx, RepoTemplate::CephDeploy.name(), package_path)?;
    Ok(())
}

/// Served repository names after remote configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepos {
    /// e.g. `ceph/0.80.5`
    pub ceph: String,
    pub minions: String,
}

/// Configure the versioned Ceph repository and the Calamari minion repository
pub fn configure_remote_repos(ctx: &Context, package_path: &Path) -> Result<RemoteRepos> {
    let ceph = configure_remote(ctx, "ceph", package_path, true)?;
    let minions = configure_remote(ctx, "calamari-minions", package_path, false)?;
    Ok(RemoteRepos { ceph, minions })
}

#[cfg(test)]
mod tests {
    use super::super::testing::{distro, Recorder};
    use super::*;
    use crate::config::Layout;
    use crate::error::Error;
    use std::fs;

    fn package_tree(root: &Path) {
        for dir in ["calamari-server", "ceph-deploy", "ceph/0.80.5", "calamari-minions"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("release.asc"), b"key").unwrap();
        }
    }

    #[test]
    fn test_configure_local_gpg() {
        let stage = tempfile::tempdir().unwrap();
        let pkgs = tempfile::tempdir().unwrap();
        package_tree(pkgs.path());

        let recorder = Recorder::default();
        let ctx = Context::new(Layout::rooted_at(stage.path()), distro("centos", "Core"), true)
            .with_package_manager(Box::new(recorder.clone()));

        let dest = configure_local(&ctx, "ceph-deploy", pkgs.path()).unwrap();
        assert!(dest.join("release.asc").is_file());

        let repo = fs::read_to_string(ctx.layout.yum_repos_dir.join("ceph-deploy.repo")).unwrap();
        assert!(repo.contains(&format!("baseurl=file://{}\n", dest.display())));
        assert!(repo.contains(&format!("gpgkey=file://{}/release.asc\n", dest.display())));
        assert!(repo.contains("gpgcheck=1\n"));

        assert_eq!(
            recorder.calls(),
            vec![
                format!("import {}", dest.join("release.asc").display()),
                "pin".to_string(),
                "update".to_string(),
            ]
        );
    }

    #[test]
    fn test_configure_local_redhat_skips_import() {
        let stage = tempfile::tempdir().unwrap();
        let pkgs = tempfile::tempdir().unwrap();
        package_tree(pkgs.path());

        let recorder = Recorder::default();
        let ctx = Context::new(Layout::rooted_at(stage.path()), distro("redhat", "Maipo"), true)
            .with_package_manager(Box::new(recorder.clone()));

        configure_local(&ctx, "calamari-server", pkgs.path()).unwrap();
        let repo = fs::read_to_string(ctx.layout.yum_repos_dir.join("calamari-server.repo")).unwrap();
        assert!(repo.contains("gpgkey=file:///etc/pki/rpm-gpg/RPM-GPG-KEY-redhat-release\n"));
        assert!(!recorder.calls().iter().any(|c| c.starts_with("import")));
    }

    #[test]
    fn test_configure_local_unknown_name() {
        let stage = tempfile::tempdir().unwrap();
        let ctx = Context::new(Layout::rooted_at(stage.path()), distro("centos", "Core"), false)
            .with_package_manager(Box::new(Recorder::default()));
        assert!(matches!(
            configure_local(&ctx, "Installer", stage.path()),
            Err(Error::InvalidRepoName(_))
        ));
    }

    #[test]
    fn test_configure_remote_versioned() {
        let stage = tempfile::tempdir().unwrap();
        let pkgs = tempfile::tempdir().unwrap();
        package_tree(pkgs.path());
        let ctx = Context::new(Layout::rooted_at(stage.path()), distro("centos", "Core"), true)
            .with_package_manager(Box::new(Recorder::default()));

        let repos = configure_remote_repos(&ctx, pkgs.path()).unwrap();
        assert_eq!(repos.ceph, "ceph/0.80.5");
        assert_eq!(repos.minions, "calamari-minions");
        assert!(ctx.layout.remote_repo_dir("ceph/0.80.5/release.asc").is_file());
        assert!(ctx.layout.remote_repo_dir("calamari-minions/release.asc").is_file());
    }

    #[test]
    fn test_configure_remote_missing_tree() {
        let stage = tempfile::tempdir().unwrap();
        let ctx = Context::new(Layout::rooted_at(stage.path()), distro("centos", "Core"), true)
            .with_package_manager(Box::new(Recorder::default()));
        assert!(matches!(
            configure_remote(&ctx, "ceph", stage.path(), true),
            Err(Error::DirNotFound(_))
        ));
    }
}
