// src/repository/templates.rs

//! Repository file templates
//!
//! Yum fragments are INI sections; Apt fragments are a single `deb` line.
//! Rendering is a pure function of [`RepoFile`], so rewriting a repository
//! with the same inputs produces byte-identical files.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Repositories the tool knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoTemplate {
    /// Calamari web console packages
    CalamariServer,
    /// ceph-deploy packages
    CephDeploy,
    /// Ceph packages served to cluster nodes
    Ceph,
}

impl RepoTemplate {
    pub const ALL: [RepoTemplate; 3] = [Self::CalamariServer, Self::CephDeploy, Self::Ceph];

    /// Repository name, also the stem of the repo file
    pub fn name(&self) -> &'static str {
        match self {
            Self::CalamariServer => "calamari-server",
            Self::CephDeploy => "ceph-deploy",
            Self::Ceph => "ceph",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::InvalidRepoName(format!("Unrecognized repo name: {}", name)))
    }

    /// Render the Yum `.repo` body
    pub fn render_yum(&self, file: &RepoFile) -> String {
        let gpg_check = u8::from(file.gpg_check);
        match self {
            Self::CalamariServer | Self::CephDeploy => {
                let (section, name) = match self {
                    Self::CalamariServer => ("calamari", "calamari"),
                    _ => ("ceph_deploy", "ceph_deploy"),
                };
                format!(
                    "\n[{section}]\n\
                     name={name} packages for $basearch\n\
                     baseurl={}\n\
                     enabled=1\n\
                     type=rpm-md\n\
                     priority=1\n\
                     gpgkey={}\n\
                     gpgcheck={gpg_check}\n",
                    file.repo_url, file.gpg_url
                )
            }
            Self::Ceph => format!(
                "\n[ceph]\n\
                 name=Ceph\n\
                 baseurl={}\n\
                 default=true\n\
                 priority=1\n\
                 gpgkey={}\n\
                 gpgcheck={gpg_check}\n\
                 proxy=_none_\n",
                file.repo_url, file.gpg_url
            ),
        }
    }

    /// Render the Apt `.list` body
    pub fn render_apt(&self, file: &RepoFile) -> String {
        format!("deb {} {} main\n", file.repo_url, file.codename)
    }
}

impl fmt::Display for RepoTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RepoTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Everything needed to render one repository file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    pub template: RepoTemplate,
    pub repo_url: String,
    pub gpg_url: String,
    pub gpg_check: bool,
    /// Distribution codename (Apt only)
    pub codename: String,
}

impl RepoFile {
    pub fn new(template: RepoTemplate, repo_url: impl Into<String>, gpg_url: impl Into<String>) -> Self {
        Self {
            template,
            repo_url: repo_url.into(),
            gpg_url: gpg_url.into(),
            gpg_check: true,
            codename: String::new(),
        }
    }

    pub fn with_gpg_check(mut self, gpg_check: bool) -> Self {
        self.gpg_check = gpg_check;
        self
    }

    pub fn with_codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = codename.into();
        self
    }
}
