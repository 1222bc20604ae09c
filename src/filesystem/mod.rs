// src/filesystem/mod.rs

//! Filesystem operations on package trees
//!
//! - `mirror`: find a package tree and copy it into its serving location
//! - `bundle`: turn a directory, tarball, or URL into a package tree

pub mod bundle;
pub mod mirror;

pub use bundle::PackageBundle;
pub use mirror::{overwrite_dir, package_source};
