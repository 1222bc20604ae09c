// src/cli/mod.rs
//! CLI definitions for ice_setup
//!
//! The actual command implementations are in the `commands` module. Running
//! without a subcommand starts the interactive setup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod configure;

pub use configure::ConfigureScope;

const BANNER: &str = r#"
8888888      .d8888b.      8888888888
  888       d88P  Y88b     888
  888       888    888     888
  888       888            8888888
  888       888            888
  888       888    888     888
  888   d8b Y88b  d88P d8b 888        d8b
8888888 Y8P  "Y8888P"  Y8P 8888888888 Y8P

  Inktank Ceph Enterprise Setup"#;

#[derive(Parser)]
#[command(name = "ice_setup")]
#[command(version)]
#[command(about = "Configure an ICE node as a package repository host", long_about = None)]
#[command(before_help = BANNER)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the package trees, a .tar.gz bundle, or its URL
    #[arg(short, long = "dir", value_name = "PATH", global = true)]
    pub dir: Option<String>,

    /// Disable GPG checking and key import
    #[arg(long, global = true)]
    pub no_gpg: bool,

    /// Layout override file (TOML)
    #[arg(long, value_name = "PATH", env = ice_setup::config::CONFIG_ENV, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the ICE node as a repository host
    ///
    /// The scope can be followed by a path to the package files. If no path is
    /// given, `--dir` or the current working directory is searched.
    Configure {
        #[arg(value_enum)]
        scope: ConfigureScope,

        /// Package files location (overrides --dir)
        path: Option<String>,
    },

    /// Update served repositories by synchronizing with upstream
    ///
    /// `all` updates ceph and calamari-minions.
    Update {
        /// Repositories to update: all, ceph, calamari-minions
        #[arg(required = true, value_name = "REPO")]
        repos: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_runs_setup() {
        let cli = Cli::try_parse_from(["ice_setup", "--no-gpg"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.no_gpg);
    }

    #[test]
    fn test_configure_with_path() {
        let cli = Cli::try_parse_from(["ice_setup", "configure", "remote", "/srv/ice", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Configure { scope, path }) => {
                assert_eq!(scope, ConfigureScope::Remote);
                assert_eq!(path.as_deref(), Some("/srv/ice"));
            }
            _ => panic!("expected configure"),
        }
    }

    #[test]
    fn test_configure_rejects_unknown_scope() {
        assert!(Cli::try_parse_from(["ice_setup", "configure", "everything"]).is_err());
    }

    #[test]
    fn test_update_names_validated_later() {
        let cli = Cli::try_parse_from(["ice_setup", "-d", "/srv", "update", "ceph", "bogus"]).unwrap();
        assert_eq!(cli.dir.as_deref(), Some("/srv"));
        match cli.command {
            Some(Commands::Update { repos }) => assert_eq!(repos, vec!["ceph", "bogus"]),
            _ => panic!("expected update"),
        }
        assert!(Cli::try_parse_from(["ice_setup", "update"]).is_err());
    }
}
