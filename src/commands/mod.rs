// src/commands/mod.rs
//! Command handlers for the ice_setup CLI

mod configure;
mod setup;
mod update;

pub use configure::cmd_configure;
pub use setup::cmd_setup;
pub use update::cmd_update;

use anyhow::Result;
use ice_setup::repository::conf_paths;
use ice_setup::{host, Context, Layout};
use std::path::PathBuf;
use tracing::debug;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Package location from `--dir`
    pub dir: Option<String>,
    pub no_gpg: bool,
    /// Layout override file
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Package location: explicit argument, then `--dir`, then the working
    /// directory
    pub fn package_location(&self, explicit: Option<&str>) -> Result<String> {
        match explicit.or(self.dir.as_deref()) {
            Some(location) => Ok(location.to_string()),
            None => Ok(std::env::current_dir()?.display().to_string()),
        }
    }
}

/// Check privileges, load the layout, and detect the host
fn open_context(options: &GlobalOptions) -> Result<Context> {
    host::require_root()?;
    let layout = Layout::resolve(options.config.as_deref())?;
    debug!("Using layout {:?}", layout);
    Ok(Context::detect(layout, !options.no_gpg)?)
}

/// Every cephdeploy.conf location for this invocation
fn ceph_deploy_conf_paths() -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()?;
    let home = dirs::home_dir();
    let sudo_home = host::sudo_user_home();
    Ok(conf_paths(&cwd, home.as_deref(), sudo_home.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_location_precedence() {
        let options = GlobalOptions {
            dir: Some("/srv/dir".to_string()),
            ..GlobalOptions::default()
        };
        assert_eq!(options.package_location(Some("/srv/arg")).unwrap(), "/srv/arg");
        assert_eq!(options.package_location(None).unwrap(), "/srv/dir");

        let cwd = std::env::current_dir().unwrap().display().to_string();
        assert_eq!(GlobalOptions::default().package_location(None).unwrap(), cwd);
    }
}
