// tests/configure.rs

//! Repository configuration against a staged filesystem.

mod common;

use common::{centos_context, package_tree, staged_layout, CENTOS_OS_RELEASE, UBUNTU_OS_RELEASE};
use ice_setup::provision::{configure_local, configure_local_repos, configure_remote_repos};
use ice_setup::{Context, Error, Layout, PackageFamily};
use std::fs;

#[test]
fn test_configure_local_writes_repo_file() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let packages = package_tree();
    let ctx = centos_context(layout);
    assert_eq!(ctx.distro.family, PackageFamily::Yum);

    configure_local_repos(&ctx, packages.path()).unwrap();

    let dest = ctx.layout.local_repo_dir("calamari-server");
    assert!(dest.join("calamari-server-1.2.3-1.el7.x86_64.rpm").is_file());
    assert!(dest.join("repodata/repomd.xml").is_file());

    let repo = fs::read_to_string(ctx.layout.yum_repos_dir.join("calamari-server.repo")).unwrap();
    assert_eq!(
        repo,
        format!(
            "\n[calamari]\n\
             name=calamari packages for $basearch\n\
             baseurl=file://{dest}\n\
             enabled=1\n\
             type=rpm-md\n\
             priority=1\n\
             gpgkey=file://{dest}/release.asc\n\
             gpgcheck=0\n",
            dest = dest.display()
        )
    );

    let deploy = fs::read_to_string(ctx.layout.yum_repos_dir.join("ceph-deploy.repo")).unwrap();
    assert!(deploy.starts_with("\n[ceph_deploy]\n"));
}

#[test]
fn test_configure_local_is_idempotent() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let packages = package_tree();
    let ctx = centos_context(layout);

    configure_local(&ctx, "ceph-deploy", packages.path()).unwrap();
    let path = ctx.layout.yum_repos_dir.join("ceph-deploy.repo");
    let first = fs::read(&path).unwrap();

    configure_local(&ctx, "ceph-deploy", packages.path()).unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_configure_local_replaces_stale_tree() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let packages = package_tree();
    let ctx = centos_context(layout);

    let dest = ctx.layout.local_repo_dir("ceph-deploy");
    fs::create_dir_all(&dest).unwrap();
    fs::write(dest.join("ceph-deploy-1.4.0-0.noarch.rpm"), b"").unwrap();

    configure_local(&ctx, "ceph-deploy", packages.path()).unwrap();
    assert!(!dest.join("ceph-deploy-1.4.0-0.noarch.rpm").exists());
    assert!(dest.join("ceph-deploy-1.5.22-0.noarch.rpm").exists());
}

#[test]
fn test_configure_local_from_installed_tree() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let packages = package_tree();
    let ctx = centos_context(layout);

    configure_local(&ctx, "ceph-deploy", packages.path()).unwrap();
    // running again from the local prefix itself must not lose the packages
    let dest = configure_local(&ctx, "ceph-deploy", &ctx.layout.local_prefix).unwrap();
    assert!(dest.join("ceph-deploy-1.5.22-0.noarch.rpm").is_file());
    assert!(ctx.layout.yum_repos_dir.join("ceph-deploy.repo").is_file());
}

#[test]
fn test_configure_local_missing_packages() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let empty = tempfile::tempdir().unwrap();
    let ctx = centos_context(layout);

    let err = configure_local(&ctx, "calamari-server", empty.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("could not find {}", empty.path().join("calamari-server").display())
    );
    assert!(!ctx.layout.yum_repos_dir.join("calamari-server.repo").exists());
}

#[test]
fn test_configure_remote_serves_versioned_ceph() {
    let (_stage, layout) = staged_layout(CENTOS_OS_RELEASE);
    let packages = package_tree();
    let ctx = centos_context(layout);

    let remote = configure_remote_repos(&ctx, packages.path()).unwrap();
    assert_eq!(remote.ceph, "ceph/0.80.8");
    assert!(ctx
        .layout
        .remote_repo_dir("ceph/0.80.8")
        .join("ceph-0.80.8-0.el7.x86_64.rpm")
        .is_file());
    assert!(ctx.layout.remote_repo_dir("calamari-minions/release.asc").is_file());
}

#[test]
fn test_unsupported_platform() {
    let (_stage, layout) = staged_layout("NAME=\"openSUSE\"\nVERSION_ID=\"13.2\"\nVERSION=\"13.2 (Harlequin)\"\n");
    match Context::detect(layout, true) {
        Err(Error::UnsupportedPlatform(msg)) => {
            assert_eq!(msg, "platform is not supported: suse 13.2 Harlequin")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("suse should not be supported"),
    }
}

#[test]
fn test_ubuntu_detected_as_apt() {
    let (_stage, layout) = staged_layout(UBUNTU_OS_RELEASE);
    let ctx = Context::detect(layout, true).unwrap();
    assert_eq!(ctx.distro.family, PackageFamily::Apt);
    assert_eq!(ctx.distro.codename, "trusty");
}

#[test]
fn test_centos6_detected_without_os_release() {
    let stage = tempfile::tempdir().unwrap();
    let layout = Layout::rooted_at(stage.path());
    fs::create_dir_all(layout.redhat_release.parent().unwrap()).unwrap();
    fs::write(&layout.redhat_release, "CentOS release 6.5 (Final)\n").unwrap();

    let ctx = Context::detect(layout, false).unwrap();
    assert_eq!(ctx.distro.name, "centos");
    assert_eq!(ctx.distro.codename, "Final");
    assert_eq!(ctx.distro.release.int_major(), 6);
    assert_eq!(ctx.pkg().family(), PackageFamily::Yum);
}
