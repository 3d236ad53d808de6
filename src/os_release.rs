// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

//! Identification of the running distribution from `/etc/os-release`.
//!
//! Only the `ID` is used to pick the package manager dialect, the other fields are only
//! logged. See <https://www.freedesktop.org/software/systemd/man/latest/os-release.html>.

use std::{
    fmt::{self, Display},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use tracing::debug;

const ETC_OS_RELEASE: &str = "/etc/os-release";
const USR_OS_RELEASE: &str = "/usr/lib/os-release";

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OsRelease {
    /// Lower-case identifier, like `rockstor` or `opensuse-leap`
    pub id: String,
    pub id_like: Vec<String>,
    pub pretty_name: String,
    pub version_id: Option<String>,
}

impl Default for OsRelease {
    fn default() -> Self {
        Self {
            id: "linux".to_string(),
            id_like: vec![],
            pretty_name: "Linux".to_string(),
            version_id: None,
        }
    }
}

impl OsRelease {
    /// `/etc/os-release` takes precedence over `/usr/lib/os-release`, and only one of them is read.
    pub fn new() -> Result<Self> {
        let path = [ETC_OS_RELEASE, USR_OS_RELEASE]
            .into_iter()
            .map(Path::new)
            .find(|p| p.exists());
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening '{}'", path.display()))?;
        let lines = BufReader::new(file).lines().map_while(Result::ok);
        Ok(Self::from_lines(lines))
    }

    /// Later assignments win, like when sourcing the file from a shell.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut os_release = Self::default();
        for line in lines {
            let line = line.as_ref().trim();
            if line.starts_with('#') {
                continue;
            }
            let Some((k, v)) = line.split_once('=') else {
                continue;
            };
            let v = unquote(v.trim());
            match k.trim() {
                "ID" => os_release.id = v.to_string(),
                "ID_LIKE" => os_release.id_like = v.split_whitespace().map(String::from).collect(),
                "PRETTY_NAME" => os_release.pretty_name = v.to_string(),
                "VERSION_ID" => os_release.version_id = Some(v.to_string()),
                _ => continue,
            }
        }
        os_release
    }
}

impl Display for OsRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.pretty_name, self.id)?;
        if let Some(v) = &self.version_id {
            write!(f, " {v}")?;
        }
        if !self.id_like.is_empty() {
            write!(f, ", like {}", self.id_like.join(" "))?;
        }
        write!(f, ")")
    }
}

/// Identifier of the running distribution
pub fn current_distribution_id() -> Result<String> {
    let os_release = OsRelease::new()?;
    debug!("Detected distribution {os_release}");
    Ok(os_release.id)
}
