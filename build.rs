// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("ice_setup")
        .version(env!("CARGO_PKG_VERSION"))
        .author("ICE Setup Contributors")
        .about("Configure an ICE node as a package repository host")
        .long_about(
            "Configure an ICE node as a package repository host.\n\n\
             Without a subcommand, an interactive setup configures the local \
             repositories, installs Calamari and ceph-deploy, and publishes the \
             repositories used by remote cluster nodes.",
        )
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("PATH")
                .global(true)
                .help("Directory holding the package trees, a .tar.gz bundle, or its URL"),
        )
        .arg(
            Arg::new("no_gpg")
                .long("no-gpg")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disable GPG checking and key import"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .env("ICE_SETUP_CONFIG")
                .global(true)
                .help("Layout override file (TOML)"),
        )
        .subcommand(
            Command::new("configure")
                .about("Configure the ICE node as a repository host")
                .arg(
                    Arg::new("scope")
                        .required(true)
                        .value_parser(["all", "local", "remote"])
                        .help("Which repositories to configure"),
                )
                .arg(Arg::new("path").help("Package files location (overrides --dir)")),
        )
        .subcommand(
            Command::new("update")
                .about("Update served repositories by synchronizing with upstream")
                .arg(
                    Arg::new("repos")
                        .required(true)
                        .num_args(1..)
                        .value_name("REPO")
                        .help("Repositories to update: all, ceph, calamari-minions"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("ice_setup.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
