// src/host.rs

//! Facts about the running host: privileges, hostname, and the invoking user

use crate::error::{Error, Result};
use nix::unistd::{Uid, User};
use std::path::PathBuf;
use tracing::debug;

/// Fail unless the process runs as root
pub fn require_root() -> Result<()> {
    if Uid::effective().is_root() {
        Ok(())
    } else {
        Err(Error::PermissionDenied(
            "This script needs to be executed with sudo".to_string(),
        ))
    }
}

/// Accept a hostname as FQDN unless it is a placeholder
///
/// Names ending in `.local` or starting with `localhost` are not reachable
/// from the cluster nodes.
pub fn fqdn_candidate(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || name.ends_with(".local") || name.starts_with("localhost") {
        None
    } else {
        Some(name.to_string())
    }
}

/// Best guess at this host's fully qualified name
pub fn detect_fqdn() -> Option<String> {
    let name = nix::unistd::gethostname().ok()?;
    let name = name.to_string_lossy();
    debug!("System hostname: {}", name);
    fqdn_candidate(&name)
}

/// Home directory of the user that invoked sudo
pub fn sudo_user_home() -> Option<PathBuf> {
    let user = std::env::var("SUDO_USER").ok()?;
    match User::from_name(&user) {
        Ok(Some(entry)) => Some(entry.dir),
        Ok(None) => None,
        Err(e) => {
            debug!("passwd lookup for {} failed: {}", user, e);
            None
        }
    }
}
