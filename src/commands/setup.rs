// src/commands/setup.rs
//! Interactive setup command (no subcommand given)

use super::{ceph_deploy_conf_paths, open_context, GlobalOptions};
use anyhow::Result;
use ice_setup::provision::{run_setup, SetupOptions};
use ice_setup::{host, Prompter};

pub fn cmd_setup(options: &GlobalOptions) -> Result<()> {
    let ctx = open_context(options)?;
    let setup = SetupOptions {
        package_path: options.package_location(None)?,
        detected_fqdn: host::detect_fqdn(),
        conf_paths: ceph_deploy_conf_paths()?,
    };

    let mut prompter = Prompter::stdio();
    run_setup(&ctx, &mut prompter, &setup)?;
    Ok(())
}
