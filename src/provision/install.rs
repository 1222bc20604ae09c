// src/provision/install.rs

//! Package installation on the ICE node

use super::Context;
use crate::error::Result;
use crate::repository::RepoTemplate;
use tracing::{info, warn};

/// Install every package of the local Calamari server repository
pub fn install_calamari(ctx: &Context) -> Result<()> {
    let repo = ctx.layout.local_repo_dir(RepoTemplate::CalamariServer.name());
    let packages = ctx.pkg().enumerate_repo(&repo)?;
    if packages.is_empty() {
        warn!("no packages found in {}", repo.display());
        return Ok(());
    }
    info!("Installing Calamari packages: {}", packages.join(" "));
    ctx.pkg().install(&packages)
}

/// Install ceph-deploy from the configured repositories
pub fn install_ceph_deploy(ctx: &Context) -> Result<()> {
    info!("Installing ceph-deploy");
    ctx.pkg().install(&["ceph-deploy".to_string()])
}
