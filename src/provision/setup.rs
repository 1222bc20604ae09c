// src/provision/setup.rs

//! Interactive setup
//!
//! Walks the operator through the full provisioning of an ICE node:
//!
//! 1. local repositories for Calamari and ceph-deploy
//! 2. Calamari installation
//! 3. ceph-deploy installation
//! 4. repositories served to the cluster nodes, plus the cephdeploy.conf
//!    telling ceph-deploy where to find them

use super::{configure_local_repos, configure_remote_repos, install_calamari, install_ceph_deploy, Context};
use crate::error::Result;
use crate::filesystem::bundle;
use crate::prompt::Prompter;
use crate::repository::{CephDeployConf, RepoFile, RepoTemplate};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

const MARKUP: &str = "====";

const STEPS: [&str; 4] = [
    "1. Configure the ICE Node (current host) as a repository Host",
    "2. Install Calamari web application on the ICE Node (current host)",
    "3. Install ceph-deploy on the ICE Node (current host)",
    "4. Configure host as a Ceph and Calamari minion repository for remote hosts",
];

/// Inputs of the interactive setup that come from the environment
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Default answer for the package location prompt
    pub package_path: String,
    /// FQDN offered as the default answer
    pub detected_fqdn: Option<String>,
    /// Where cephdeploy.conf is written
    pub conf_paths: Vec<PathBuf>,
}

fn banner(title: &str) {
    info!("");
    info!("{} {} {}", MARKUP, title, MARKUP);
    info!("");
}

/// Explain how the prompts work and ask to continue
pub fn interactive_help<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, mode: &str) -> Result<()> {
    banner(mode);
    info!("follow the prompts to complete the {}", mode);
    info!("if specific actions are required (e.g. just install Calamari)");
    info!("cancel this script with Ctrl-C, and see the help menu for details");
    info!("default values are presented in brackets");
    info!("press Enter to accept a default value, if one is provided");
    prompter.prompt_continue()
}

/// Ask for this host's FQDN and the protocol Calamari serves on
pub fn fqdn_with_protocol<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    detected: Option<&str>,
) -> Result<(String, String)> {
    info!("this host will be used to host packages");
    info!("and will act as a repository for other nodes");
    if detected.is_none() {
        warn!("no FQDN could be detected for current host");
    }

    let fqdn = loop {
        let fqdn = prompter.prompt("provide the FQDN for this host:", detected, false)?;
        if !fqdn.is_empty() {
            break fqdn;
        }
        error!("a FQDN is required and was not provided, please try again");
    };

    let protocol = prompter.prompt(
        "If you have manually configured your Calamari web server for HTTPS, select 'https', otherwise select the default 'http'",
        Some("http"),
        true,
    )?;
    Ok((protocol, fqdn))
}

/// Run the full interactive setup
pub fn run_setup<R: BufRead, W: Write>(
    ctx: &Context,
    prompter: &mut Prompter<R, W>,
    options: &SetupOptions,
) -> Result<()> {
    interactive_help(prompter, "interactive mode")?;

    info!("this script will setup Calamari, package repo, and ceph-deploy");
    info!("with the following steps:");
    for step in STEPS {
        info!("{}", step);
    }

    let location = prompter.prompt(
        "provide the path to packages to place in the repo",
        Some(&options.package_path),
        false,
    )?;
    let packages = bundle::resolve(&location, &ctx.layout)?;
    let package_path = packages.root();

    banner("Step 1: Calamari & ceph-deploy repo setup");
    configure_local_repos(ctx, package_path)?;

    banner("Step 2: Calamari installation");
    install_calamari(ctx)?;

    banner("Step 3: ceph-deploy installation");
    install_ceph_deploy(ctx)?;

    let (protocol, fqdn) = fqdn_with_protocol(prompter, options.detected_fqdn.as_deref())?;

    banner("Step 4: ceph & calamari-minions repositories setup");
    let remote = configure_remote_repos(ctx, package_path)?;

    let static_url = |name: &str| format!("{}://{}/static/{}", protocol, fqdn, name);
    let minion_url = static_url(&remote.minions);
    let ceph_url = static_url(&remote.ceph);
    let conf = CephDeployConf {
        master: fqdn.clone(),
        minion_gpg_url: ctx.gpg_url(&minion_url),
        ceph_gpg_url: ctx.gpg_url(&ceph_url),
        minion_url,
        ceph_url,
        gpg_check: ctx.use_gpg,
    };
    conf.write_all(&options.conf_paths)?;

    // What the repo file on the remote nodes will look like
    let remote_repo = RepoFile::new(RepoTemplate::Ceph, conf.ceph_url.clone(), conf.ceph_gpg_url.clone())
        .with_gpg_check(ctx.use_gpg)
        .with_codename(ctx.distro.codename.clone());
    ctx.pkg().print_repo_file(&remote_repo);

    closing_instructions();
    Ok(())
}

fn closing_instructions() {
    info!("Setup has completed.");
    info!("If installing Calamari for the first time:");
    info!("");
    info!("  Initialize Calamari (as root) by running:");
    info!("");
    info!("    calamari-ctl initialize");
    info!("");
    info!("To install the repo files on remote nodes with ceph-deploy, run:");
    info!("    ceph-deploy install --repo {{HOSTS}}");
    info!("");
    warn!("If upgrading, `ceph-deploy install {{HOSTS}}` will also upgrade ceph on remote nodes");
    info!("");
    info!("To install ceph on remote nodes with ceph-deploy, run:");
    info!("    ceph-deploy install {{HOSTS}}");
    info!("");
}
