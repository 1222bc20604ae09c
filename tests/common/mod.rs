// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use ice_setup::distro::PlatformInfo;
use ice_setup::{Context, Distribution, Layout};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const CENTOS_OS_RELEASE: &str = "NAME=\"CentOS Linux\"\n\
VERSION=\"7 (Core)\"\n\
ID=\"centos\"\n\
VERSION_ID=\"7\"\n";

pub const UBUNTU_OS_RELEASE: &str = "NAME=\"Ubuntu\"\n\
VERSION=\"14.04.5 LTS, Trusty Tahr\"\n\
ID=ubuntu\n\
VERSION_ID=\"14.04\"\n";

/// A staging root with every layout path re-rooted under it and an
/// os-release file describing the host.
///
/// Returns (TempDir, Layout) - keep the TempDir alive to prevent cleanup.
pub fn staged_layout(os_release: &str) -> (TempDir, Layout) {
    let temp_dir = tempfile::tempdir().unwrap();
    let layout = Layout::rooted_at(temp_dir.path());
    fs::create_dir_all(layout.os_release.parent().unwrap()).unwrap();
    fs::write(&layout.os_release, os_release).unwrap();
    (temp_dir, layout)
}

/// A package tree as shipped on the ICE media
pub fn package_tree() -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write_repo(root, "calamari-server", &["calamari-server-1.2.3-1.el7.x86_64.rpm"]);
    write_repo(root, "ceph-deploy", &["ceph-deploy-1.5.22-0.noarch.rpm"]);
    write_repo(root, "ceph/0.80.8", &["ceph-0.80.8-0.el7.x86_64.rpm"]);
    write_repo(root, "calamari-minions", &["salt-minion-2014.1.rpm"]);
    temp_dir
}

fn write_repo(root: &Path, name: &str, packages: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("repodata")).unwrap();
    fs::write(dir.join("repodata/repomd.xml"), b"<repomd/>").unwrap();
    fs::write(dir.join("release.asc"), b"-----BEGIN PGP PUBLIC KEY BLOCK-----\n").unwrap();
    for package in packages {
        fs::write(dir.join(package), b"").unwrap();
    }
}

/// A CentOS context whose commands never leave the filesystem (GPG off)
pub fn centos_context(layout: Layout) -> Context {
    Context::detect(layout, false).unwrap()
}

pub fn distro(name: &str, release: &str, codename: &str) -> Distribution {
    Distribution::from_platform(PlatformInfo {
        name: name.to_string(),
        release: release.to_string(),
        codename: codename.to_string(),
    })
    .unwrap()
}
