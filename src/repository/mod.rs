// src/repository/mod.rs

//! Repository descriptions: package-manager repo files and the ceph-deploy
//! configuration pointing remote hosts at this node

pub mod cephdeploy;
pub mod templates;

pub use cephdeploy::{conf_paths, infer_ceph_repo, CephDeployConf};
pub use templates::{RepoFile, RepoTemplate};
