// src/commands/update.rs
//! Repository update command

use super::{ceph_deploy_conf_paths, open_context, GlobalOptions};
use anyhow::Result;
use ice_setup::provision::update_repos;
use ice_setup::SyncTarget;

/// Synchronize the named served repositories from upstream
pub fn cmd_update(options: &GlobalOptions, repos: &[String]) -> Result<()> {
    // Reject bad names before anything touches the system
    SyncTarget::parse_list(repos)?;

    let ctx = open_context(options)?;
    update_repos(&ctx, repos, &ceph_deploy_conf_paths()?)?;
    Ok(())
}
