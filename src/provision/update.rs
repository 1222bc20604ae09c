// src/provision/update.rs

//! Synchronizing served repositories from upstream

use super::Context;
use crate::error::Result;
use crate::packages::{SyncJob, SyncTarget};
use crate::repository::infer_ceph_repo;
use std::path::PathBuf;
use tracing::info;

/// Sync the named repositories (`all`, `ceph`, `calamari-minions`)
///
/// The Ceph destination is read back from cephdeploy.conf (`conf_paths`),
/// since each Ceph version is served from its own directory.
pub fn update_repos<S: AsRef<str>>(ctx: &Context, names: &[S], conf_paths: &[PathBuf]) -> Result<()> {
    let targets = SyncTarget::parse_list(names)?;
    ctx.pkg().check_sync()?;

    let jobs = targets
        .into_iter()
        .map(|target| {
            let destination = match target {
                SyncTarget::Ceph => infer_ceph_repo(conf_paths, &ctx.layout.remote_prefix)?,
                SyncTarget::CalamariMinions => ctx.layout.remote_repo_dir(target.name()),
            };
            Ok(SyncJob { target, destination })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Updating repositories: {}",
        jobs.iter().map(|j| j.target.name()).collect::<Vec<_>>().join(", ")
    );
    ctx.pkg().sync(&jobs, &ctx.distro.release)
}
