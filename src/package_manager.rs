// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

//! Normalized view of pending updates, changelogs and repositories.
//!
//! Supports two dialects of package manager output:
//!
//! * yum, on the CentOS based distribution
//! * zypper, on openSUSE Leap and Tumbleweed
//!
//! Parsing is lenient: lines that do not have the expected shape are skipped, as the tools
//! interleave warnings with their tables.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    cmd::CommandRunner,
    config::Configuration,
    os_release::current_distribution_id,
    package_manager::{yum::YumPackageManager, zypper::ZypperPackageManager},
};

pub mod yum;
pub mod zypper;

/// Separator between lines of a changelog block
pub const LINE_SEPARATOR: &str = "[line]";

/// zypper has no equivalent of `yum changelog`
pub const SUSE_UNAVAILABLE: &str = "Version and changelog of update not available in openSUSE";

/// Distribution identifiers using yum
const CENTOS_IDS: [&str; 2] = ["rockstor", "centos"];

/// What we know about a package with a pending update
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageUpdateInfo {
    pub name: String,
    /// Changelog of the installed version
    pub installed: String,
    /// Changelog of the available version
    pub available: String,
    /// Always empty for now
    pub description: String,
}

impl PackageUpdateInfo {
    /// Update without changelog information
    fn without_changelog(name: String) -> Self {
        Self {
            name,
            installed: String::new(),
            available: SUSE_UNAVAILABLE.to_string(),
            description: String::new(),
        }
    }
}

/// Strip the architecture from a `name.arch` package spec.
///
/// Names can contain dots, the architecture can't.
pub fn strip_arch(spec: &str) -> &str {
    match spec.rsplit_once('.') {
        Some((name, _)) if !name.is_empty() => name,
        _ => spec,
    }
}

/// Output format of the package manager in use
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// yum
    Centos,
    /// zypper
    Suse,
}

impl Dialect {
    /// Anything we don't know is considered to be openSUSE.
    pub fn from_distribution_id(id: &str) -> Self {
        if CENTOS_IDS.contains(&id) {
            Dialect::Centos
        } else {
            Dialect::Suse
        }
    }
}

/// Entry point for the queries, on top of a command runner.
///
/// Holds no state between calls.
pub struct PackageManager<'a> {
    runner: &'a dyn CommandRunner,
    yum: YumPackageManager,
    zypper: ZypperPackageManager,
    distribution: Option<String>,
}

impl<'a> PackageManager<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &Configuration) -> Self {
        Self {
            runner,
            yum: YumPackageManager::new(&config.commands),
            zypper: ZypperPackageManager::new(&config.commands),
            distribution: config.distribution.clone(),
        }
    }

    /// Configured identifier, or the one of the running system
    pub fn distribution_id(&self) -> Result<String> {
        match &self.distribution {
            Some(d) => Ok(d.clone()),
            None => current_distribution_id(),
        }
    }

    /// Installed and available changelogs of a `name.arch` package
    pub fn changelog(&self, package: &str, distribution_id: &str) -> Result<PackageUpdateInfo> {
        let dialect = Dialect::from_distribution_id(distribution_id);
        let lines = self.yum.changelog(self.runner, package)?;
        Ok(yum::parse_changelog(&lines, package, dialect))
    }

    /// Pending updates on the running system
    pub fn pkg_update_check(&self) -> Result<Vec<PackageUpdateInfo>> {
        let id = self.distribution_id()?;
        self.update_check(&id)
    }

    /// Pending updates, using the dialect of the given distribution
    pub fn update_check(&self, distribution_id: &str) -> Result<Vec<PackageUpdateInfo>> {
        let dialect = Dialect::from_distribution_id(distribution_id);
        debug!("Checking updates for '{distribution_id}' with {dialect:?} dialect");
        match dialect {
            Dialect::Centos => self
                .yum
                .check_update(self.runner)?
                .iter()
                .map(|spec| -> Result<PackageUpdateInfo> {
                    let lines = self.yum.changelog(self.runner, spec)?;
                    Ok(yum::parse_changelog(&lines, spec, dialect))
                })
                .collect(),
            Dialect::Suse => Ok(self
                .zypper
                .list_updates(self.runner)?
                .into_iter()
                .map(PackageUpdateInfo::without_changelog)
                .collect()),
        }
    }

    /// Aliases of the configured zypper repositories
    pub fn repos(&self) -> Result<Vec<String>> {
        self.zypper.repos(self.runner)
    }
}

/// Remove blank lines around a block and join the rest
fn join_lines(lines: &[&str]) -> String {
    let is_blank = |l: &&str| l.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l));
    let end = lines.iter().rposition(|l| !is_blank(l));
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join(LINE_SEPARATOR),
        _ => String::new(),
    }
}
