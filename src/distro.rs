// src/distro.rs

//! Host distribution detection
//!
//! Reads `/etc/os-release`, normalizes the distribution name to a well-known
//! key, and decides which package-manager family drives the host. Ubuntu is
//! treated as Debian, and CentOS and Red Hat share the Yum tooling.

use crate::config::Layout;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Native package tooling of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFamily {
    /// yum / rpm
    Yum,
    /// apt-get / dpkg
    Apt,
}

impl PackageFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yum => "yum",
            Self::Apt => "apt",
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Normalize a distribution name so that vendor spellings map to one key
///
/// `"Red Hat Enterprise Linux Server"` and `"redhat"` both become `"redhat"`.
/// Unknown names are only lowercased.
pub fn normalize_name(raw: &str) -> String {
    let name = raw.trim().to_lowercase();
    if name.starts_with("redhat") || name.starts_with("red hat") || name == "rhel" {
        "redhat".to_string()
    } else if name.starts_with("scientific") {
        "scientific".to_string()
    } else if name.starts_with("suse") || name.starts_with("opensuse") {
        "suse".to_string()
    } else if name.starts_with("centos") {
        "centos".to_string()
    } else if name.starts_with("debian") {
        "debian".to_string()
    } else if name.starts_with("ubuntu") {
        "ubuntu".to_string()
    } else {
        name
    }
}

/// Package family for a normalized distribution name
pub fn family_for(name: &str) -> Option<PackageFamily> {
    match normalize_name(name).as_str() {
        "debian" | "ubuntu" => Some(PackageFamily::Apt),
        "centos" | "redhat" => Some(PackageFamily::Yum),
        _ => None,
    }
}

/// Codename for Debian releases whose os-release omits one
fn debian_codename(release: &str) -> Option<&'static str> {
    match release.split('.').next().unwrap_or_default() {
        "8" => Some("jessie"),
        "7" => Some("wheezy"),
        "6" => Some("squeeze"),
        _ => None,
    }
}

/// A distribution release split into dotted components
///
/// Missing components default to `"0"`; the integer accessors drop anything
/// after a `-` and ignore non-digit characters, so `"1-rc1"` reads as 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub garbage: String,
}

impl Release {
    pub fn parse(release: &str) -> Self {
        let mut parts = release.trim().split('.').map(str::to_string);
        let mut next = || parts.next().filter(|p| !p.is_empty()).unwrap_or_else(|| "0".to_string());
        Self {
            major: next(),
            minor: next(),
            patch: next(),
            garbage: next(),
        }
    }

    fn as_int(part: &str) -> u32 {
        let head = part.split('-').next().unwrap_or_default();
        let digits: String = head.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }

    pub fn int_major(&self) -> u32 {
        Self::as_int(&self.major)
    }

    pub fn int_minor(&self) -> u32 {
        Self::as_int(&self.minor)
    }

    pub fn int_patch(&self) -> u32 {
        Self::as_int(&self.patch)
    }
}

/// Raw platform facts before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Normalized distribution name
    pub name: String,
    pub release: String,
    pub codename: String,
}

/// Codename embedded in an os-release `VERSION`
///
/// `"7.1 (Maipo)"` gives `Maipo`; older Ubuntu releases write
/// `"14.04.5 LTS, Trusty Tahr"`, which gives `trusty`.
fn codename_from_version(version: &str) -> Option<String> {
    if let Some(start) = version.find('(') {
        let end = version[start..].find(')')? + start;
        let inner = version[start + 1..end].trim();
        return (!inner.is_empty()).then(|| inner.to_string());
    }
    let (_, tail) = version.split_once(',')?;
    tail.split_whitespace().next().map(str::to_lowercase)
}

/// Parse the contents of an os-release file
pub fn parse_os_release(content: &str) -> PlatformInfo {
    let map: HashMap<&str, &str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim().trim_matches('"').trim_matches('\'')))
        .collect();

    let raw_name = map
        .get("NAME")
        .or_else(|| map.get("ID"))
        .copied()
        .unwrap_or_default();
    let mut name = normalize_name(raw_name);
    // NAME can be a vendor spelling we do not know while ID is canonical
    if family_for(&name).is_none() {
        if let Some(id) = map.get("ID") {
            let by_id = normalize_name(id);
            if family_for(&by_id).is_some() {
                name = by_id;
            }
        }
    }

    let release = map.get("VERSION_ID").copied().unwrap_or_default().to_string();

    let codename = ["VERSION_CODENAME", "UBUNTU_CODENAME"]
        .iter()
        .filter_map(|key| map.get(key))
        .find(|c| !c.is_empty())
        .map(|c| c.to_string())
        .or_else(|| map.get("VERSION").and_then(|v| codename_from_version(v)))
        .or_else(|| {
            (name == "debian")
                .then(|| debian_codename(&release))
                .flatten()
                .map(str::to_string)
        })
        .unwrap_or_default();

    PlatformInfo {
        name,
        release,
        codename,
    }
}

/// Parse `/etc/redhat-release`
///
/// The file holds a single `<Name> release <version> (<Codename>)` line,
/// e.g. `CentOS release 6.5 (Final)`.
pub fn parse_redhat_release(content: &str) -> PlatformInfo {
    let line = content.lines().next().unwrap_or_default().trim();
    let (raw_name, rest) = line.split_once(" release ").unwrap_or((line, ""));
    PlatformInfo {
        name: normalize_name(raw_name),
        release: rest.split_whitespace().next().unwrap_or_default().to_string(),
        codename: codename_from_version(rest).unwrap_or_default(),
    }
}

/// Parse `/etc/debian_version` (a bare version such as `6.0.10`)
pub fn parse_debian_version(content: &str) -> PlatformInfo {
    let release = content.trim().to_string();
    PlatformInfo {
        name: "debian".to_string(),
        codename: debian_codename(&release).unwrap_or_default().to_string(),
        release,
    }
}

fn read_release_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::UnsupportedPlatform(format!(
            "platform is not supported: unable to read {}: {}",
            path.display(),
            e
        ))
    })
}

/// The detected host distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Normalized name (e.g. "ubuntu", "redhat")
    pub name: String,
    pub release: Release,
    pub codename: String,
    pub family: PackageFamily,
}

impl Distribution {
    /// Validate platform facts and build a distribution
    pub fn from_platform(info: PlatformInfo) -> Result<Self> {
        let family = family_for(&info.name);
        match family {
            Some(family) if !info.codename.is_empty() => Ok(Self {
                release: Release::parse(&info.release),
                name: info.name,
                codename: info.codename,
                family,
            }),
            _ => Err(Error::UnsupportedPlatform(format!(
                "platform is not supported: {} {} {}",
                info.name, info.release, info.codename
            ))),
        }
    }

    /// Detect the host distribution
    ///
    /// os-release is preferred; hosts predating it (EL6, Debian 6) are
    /// recognized from `redhat-release` or `debian_version`.
    pub fn detect(layout: &Layout) -> Result<Self> {
        let info = if layout.os_release.is_file() {
            parse_os_release(&read_release_file(&layout.os_release)?)
        } else if layout.redhat_release.is_file() {
            parse_redhat_release(&read_release_file(&layout.redhat_release)?)
        } else if layout.debian_version.is_file() {
            parse_debian_version(&read_release_file(&layout.debian_version)?)
        } else {
            // reports the missing os-release
            parse_os_release(&read_release_file(&layout.os_release)?)
        };
        debug!(
            "Detected platform: {} {} {}",
            info.name, info.release, info.codename
        );
        Self::from_platform(info)
    }

    /// Whether the host is Red Hat (uses the system release key)
    pub fn is_redhat(&self) -> bool {
        self.name == "redhat"
    }
}
