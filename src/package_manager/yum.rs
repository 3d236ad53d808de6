// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use anyhow::Result;
use tracing::{debug, trace, warn};

use crate::{
    cmd::CommandRunner,
    config::Commands,
    package_manager::{Dialect, PackageUpdateInfo, SUSE_UNAVAILABLE, join_lines, strip_arch},
};

/// `check-update` exit code when updates are available
pub const UPDATES_AVAILABLE: i32 = 100;

const INSTALLED_MARKER: &str = "Installed Packages";
const AVAILABLE_MARKER: &str = "Available Packages";
const STATS_FOOTER: &str = "changelog stats.";
/// Heading of the list printed after the updates by `check-update`
const OBSOLETING_HEADING: &str = "Obsoleting Packages";

/// Also supports dnf through yum wrapper, should only use compatible commands
pub struct YumPackageManager {
    binary: String,
    exclude: String,
}

impl YumPackageManager {
    pub fn new(commands: &Commands) -> Self {
        Self {
            binary: commands.yum.clone(),
            exclude: commands.yum_exclude.clone(),
        }
    }

    /// Package specs (`name.arch`) with a pending update
    pub fn check_update(&self, runner: &dyn CommandRunner) -> Result<Vec<String>> {
        let o = runner.run(&self.binary, &["check-update", "-q", "-x", self.exclude.as_str()])?;
        match o.code {
            0 => {
                debug!("No updates available");
                Ok(vec![])
            }
            UPDATES_AVAILABLE => Ok(parse_check_update(&o.stdout)),
            c => {
                warn!(
                    "Could not check updates, yum exited with code {c}: {}",
                    o.stderr.join("\n")
                );
                Ok(vec![])
            }
        }
    }

    /// Raw output of the latest changelog entry of a package, installed and available
    pub fn changelog(&self, runner: &dyn CommandRunner, package: &str) -> Result<Vec<String>> {
        let o = runner.run(&self.binary, &["changelog", "1", package])?;
        if !o.success() {
            debug!("yum changelog for '{package}' exited with code {}", o.code);
        }
        Ok(o.stdout)
    }
}

/// Extract package specs from `yum check-update` output.
///
/// Expects `name.arch version repository` rows, anything else is noise from yum or its plugins.
pub fn parse_check_update<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut specs = vec![];
    for line in lines.iter().map(AsRef::as_ref) {
        if line.trim().is_empty() {
            continue;
        }
        if line.trim_start().starts_with(OBSOLETING_HEADING) {
            break;
        }
        match line.split_whitespace().collect::<Vec<_>>().as_slice() {
            [spec, _version, _repo] if spec.contains('.') => specs.push(spec.to_string()),
            _ => trace!("Skipping unexpected check-update line: '{line}'"),
        }
    }
    specs
}

fn is_marker(line: &str, label: &str) -> bool {
    let l = line.trim();
    l.starts_with('=') && l.contains(label)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Installed,
    Available,
}

/// Split `yum changelog` output in installed and available blocks.
///
/// Each marker is only considered once. Anything looking like a marker afterwards is
/// changelog content.
pub fn parse_changelog<S: AsRef<str>>(
    lines: &[S],
    package: &str,
    dialect: Dialect,
) -> PackageUpdateInfo {
    let mut section = Section::Header;
    let mut installed = vec![];
    let mut available = vec![];

    for line in lines.iter().map(AsRef::as_ref) {
        match section {
            Section::Header => {
                if is_marker(line, INSTALLED_MARKER) {
                    section = Section::Installed;
                } else if is_marker(line, AVAILABLE_MARKER) {
                    section = Section::Available;
                }
            }
            Section::Installed => {
                if is_marker(line, AVAILABLE_MARKER) {
                    section = Section::Available;
                } else if line.trim_start().starts_with(STATS_FOOTER) {
                    break;
                } else {
                    installed.push(line);
                }
            }
            Section::Available => {
                if line.trim_start().starts_with(STATS_FOOTER) {
                    break;
                }
                available.push(line);
            }
        }
    }

    let mut available = join_lines(&available);
    if dialect == Dialect::Suse && available.is_empty() {
        available = SUSE_UNAVAILABLE.to_string();
    }
    PackageUpdateInfo {
        name: strip_arch(package).to_string(),
        installed: join_lines(&installed),
        available,
        description: String::new(),
    }
}
