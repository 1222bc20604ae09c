// src/lib.rs

//! ICE node provisioning
//!
//! Turns a host into an ICE node: package trees shipped with the product are
//! copied into place, registered with the native package manager (Yum or
//! Apt), Calamari and ceph-deploy are installed, and the trees meant for the
//! cluster nodes are published through Calamari's web server.
//!
//! # Architecture
//!
//! - `distro`: detects the host distribution and its package family
//! - `packages`: one backend per family behind the `PackageManager` trait
//! - `repository`: repo file templates and the ceph-deploy configuration
//! - `filesystem`: package trees, bundles, and mirroring
//! - `provision`: the provisioning steps and the interactive setup
//! - `process`, `host`, `prompt`: subprocesses, host facts, operator input

pub mod config;
pub mod distro;
mod error;
pub mod filesystem;
pub mod host;
pub mod packages;
pub mod process;
pub mod prompt;
pub mod provision;
pub mod repository;

pub use config::Layout;
pub use distro::{Distribution, PackageFamily, Release};
pub use error::{Error, Result};
pub use packages::{PackageManager, SyncTarget};
pub use prompt::Prompter;
pub use provision::Context;
pub use repository::{CephDeployConf, RepoFile, RepoTemplate};

/// Version of ice_setup
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
