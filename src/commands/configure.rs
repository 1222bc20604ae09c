// src/commands/configure.rs
//! Repository configuration command

use super::{open_context, GlobalOptions};
use crate::cli::ConfigureScope;
use anyhow::Result;
use ice_setup::filesystem::bundle;
use ice_setup::provision::{configure_local_repos, configure_remote_repos};
use tracing::info;

/// Configure local and/or remote repositories from a package location
pub fn cmd_configure(options: &GlobalOptions, scope: ConfigureScope, path: Option<&str>) -> Result<()> {
    let ctx = open_context(options)?;
    let location = options.package_location(path)?;
    let packages = bundle::resolve(&location, &ctx.layout)?;
    info!("Using packages from {}", packages.root().display());

    if scope.includes_local() {
        configure_local_repos(&ctx, packages.root())?;
    }
    if scope.includes_remote() {
        let remote = configure_remote_repos(&ctx, packages.root())?;
        info!("Serving {} and {}", remote.ceph, remote.minions);
    }
    Ok(())
}
