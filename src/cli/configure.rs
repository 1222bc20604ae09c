// src/cli/configure.rs
//! Repository configuration arguments

use clap::ValueEnum;

/// Which repositories `configure` sets up
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigureScope {
    /// Configure both local and remote repos
    All,
    /// Configure repos necessary to install calamari and ceph-deploy on this host
    Local,
    /// Configure repos necessary to install ceph and calamari-minions on remote hosts
    Remote,
}

impl ConfigureScope {
    pub fn includes_local(&self) -> bool {
        matches!(self, Self::All | Self::Local)
    }

    pub fn includes_remote(&self) -> bool {
        matches!(self, Self::All | Self::Remote)
    }
}
