// src/repository/cephdeploy.rs

//! ceph-deploy configuration (`cephdeploy.conf`)
//!
//! The file tells ceph-deploy where the Calamari master lives and which
//! repositories to install on remote hosts. It is written to several
//! locations because the `$HOME` seen under sudo may not be the operator's.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Contents of `cephdeploy.conf`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CephDeployConf {
    /// FQDN of the Calamari master
    pub master: String,
    pub minion_url: String,
    pub minion_gpg_url: String,
    pub ceph_url: String,
    pub ceph_gpg_url: String,
    pub gpg_check: bool,
}

impl CephDeployConf {
    pub fn render(&self) -> String {
        let gpg_check = u8::from(self.gpg_check);
        format!(
            "\n\
# This file was automatically generated after ice_setup was run. It provides
# the repository url and GPG information so that ceph-deploy can install the
# repositories in remote hosts.
#

# ceph-deploy subcommands

[ceph-deploy-calamari]
master = {master}


# Repositories

[calamari-minion]
name=Calamari
baseurl={minion_url}
gpgkey={minion_gpg_url}
gpgcheck={gpg_check}
enabled=1
priority=1
proxy=_none_

[ceph]
name=Ceph
baseurl={ceph_url}
gpgkey={ceph_gpg_url}
gpgcheck={gpg_check}
default=true
priority=1
proxy=_none_
",
            master = self.master,
            minion_url = self.minion_url,
            minion_gpg_url = self.minion_gpg_url,
            ceph_url = self.ceph_url,
            ceph_gpg_url = self.ceph_gpg_url,
        )
    }

    /// Write the configuration to every path
    pub fn write_all(&self, paths: &[PathBuf]) -> Result<()> {
        let contents = self.render();
        for path in paths {
            debug!("Writing {}", path.display());
            fs::write(path, &contents).map_err(|e| {
                std::io::Error::new(e.kind(), format!("failed to write {}: {}", path.display(), e))
            })?;
        }
        info!("Wrote cephdeploy.conf to {} location(s)", paths.len());
        Ok(())
    }
}

/// Candidate cephdeploy.conf locations, most specific first
pub fn conf_paths(cwd: &Path, home: Option<&Path>, sudo_user_home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join("cephdeploy.conf")];
    paths.extend(home.map(|h| h.join(".cephdeploy.conf")));
    paths.extend(sudo_user_home.map(|h| h.join(".cephdeploy.conf")));
    paths.dedup();
    paths
}

/// Look up `key` in `[section]` of an INI document
fn ini_value<'a>(content: &'a str, section: &str, key: &str) -> Option<&'a str> {
    let mut current = None;
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = Some(name.trim());
            continue;
        }
        if current != Some(section) {
            continue;
        }
        if let Some((k, v)) = line.split_once('=').or_else(|| line.split_once(':')) {
            if k.trim() == key {
                return Some(v.trim());
            }
        }
    }
    None
}

/// Directory holding the currently served Ceph version
///
/// The Ceph tree is never overwritten; each version lives in its own
/// directory under `<remote_prefix>/ceph`, so the active one is read back
/// from the `[ceph] baseurl` of the first cephdeploy.conf found.
pub fn infer_ceph_repo(configs: &[PathBuf], remote_prefix: &Path) -> Result<PathBuf> {
    let Some(config) = configs.iter().find(|c| c.exists()) else {
        error!("tried looking for a valid cephdeploy.conf file but failed");
        let first = configs
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("cephdeploy.conf"));
        return Err(Error::DirNotFound(first));
    };

    let content = fs::read_to_string(config)?;
    let baseurl = ini_value(&content, "ceph", "baseurl").ok_or_else(|| {
        Error::Config(format!(
            "could not find a ``ceph`` repo section at {}",
            config.display()
        ))
    })?;

    let directory = baseurl
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|d| !d.is_empty())
        .ok_or_else(|| Error::Config(format!("invalid ceph baseurl in {}: {}", config.display(), baseurl)))?;

    Ok(remote_prefix.join("ceph").join(directory))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CephDeployConf {
        CephDeployConf {
            master: "calamari.example.com".to_string(),
            minion_url: "http://calamari.example.com/static/calamari-minions".to_string(),
            minion_gpg_url: "http://calamari.example.com/static/calamari-minions/release.asc".to_string(),
            ceph_url: "http://calamari.example.com/static/ceph/0.80.5".to_string(),
            ceph_gpg_url: "http://calamari.example.com/static/ceph/0.80.5/release.asc".to_string(),
            gpg_check: true,
        }
    }

    #[test]
    fn test_render_sections() {
        let body = sample().render();
        assert!(body.starts_with("\n# This file was automatically generated"));
        assert!(body.contains("[ceph-deploy-calamari]\nmaster = calamari.example.com\n"));
        assert!(body.contains(
            "[calamari-minion]\nname=Calamari\nbaseurl=http://calamari.example.com/static/calamari-minions\n"
        ));
        assert!(body.contains("gpgcheck=1\ndefault=true\npriority=1\nproxy=_none_\n"));
        assert_eq!(ini_value(&body, "ceph", "baseurl"), Some("http://calamari.example.com/static/ceph/0.80.5"));
    }

    #[test]
    fn test_conf_paths() {
        let paths = conf_paths(Path::new("/work"), Some(Path::new("/root")), Some(Path::new("/home/op")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/work/cephdeploy.conf"),
                PathBuf::from("/root/.cephdeploy.conf"),
                PathBuf::from("/home/op/.cephdeploy.conf"),
            ]
        );
        assert_eq!(conf_paths(Path::new("/work"), None, None).len(), 1);
    }

    #[test]
    fn test_write_and_infer() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("a.conf"), dir.path().join("b.conf")];
        sample().write_all(&paths).unwrap();
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), sample().render());

        let repo = infer_ceph_repo(&paths, Path::new("/opt/calamari/webapp/content")).unwrap();
        assert_eq!(repo, PathBuf::from("/opt/calamari/webapp/content/ceph/0.80.5"));
    }

    #[test]
    fn test_infer_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("cephdeploy.conf");
        fs::write(&conf, "[ceph]\nbaseurl = http://fqdn/static/ceph/0.86/\n").unwrap();
        let repo = infer_ceph_repo(&[dir.path().join("missing.conf"), conf], Path::new("/c")).unwrap();
        assert_eq!(repo, PathBuf::from("/c/ceph/0.86"));
    }

    #[test]
    fn test_infer_without_config() {
        let missing = PathBuf::from("/nonexistent/cephdeploy.conf");
        let err = infer_ceph_repo(&[missing.clone()], Path::new("/c")).unwrap_err();
        assert!(matches!(err, Error::DirNotFound(p) if p == missing));
    }

    #[test]
    fn test_infer_without_ceph_section() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join("cephdeploy.conf");
        fs::write(&conf, "[calamari-minion]\nbaseurl=http://x/\n").unwrap();
        assert!(matches!(infer_ceph_repo(&[conf], Path::new("/c")), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let err = sample()
            .write_all(&[PathBuf::from("/nonexistent-dir/cephdeploy.conf")])
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
