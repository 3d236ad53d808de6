// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use anyhow::Result;
use tracing::{debug, trace, warn};

use crate::{cmd::CommandRunner, config::Commands};

/// `ZYPPER_EXIT_INF_UPDATE_NEEDED`
pub const UPDATES_AVAILABLE: i32 = 100;

/// `S | Repository | Name | Current Version | Available Version | Arch`
const LIST_UPDATES_FIELDS: usize = 6;
const LIST_UPDATES_NAME: usize = 2;
/// `# | Alias | Name | Enabled | GPG Check | Refresh`
const REPOS_ALIAS: usize = 1;

/// We need to be compatible with:
///
/// * openSUSE Leap 15.x
/// * openSUSE Tumbleweed
pub struct ZypperPackageManager {
    binary: String,
}

impl ZypperPackageManager {
    pub fn new(commands: &Commands) -> Self {
        Self {
            binary: commands.zypper.clone(),
        }
    }

    /// Names of the packages with a pending update
    ///
    /// Unreachable or unsigned repositories make zypper exit with an error code but the
    /// updates from the other repositories are still listed, so the code is only logged.
    pub fn list_updates(&self, runner: &dyn CommandRunner) -> Result<Vec<String>> {
        let o = runner.run(&self.binary, &["--non-interactive", "-q", "list-updates"])?;
        match o.code {
            0 => (),
            UPDATES_AVAILABLE => debug!("zypper reports available updates"),
            c => warn!(
                "zypper list-updates exited with code {c}, the list may be incomplete: {}",
                o.stderr.join("\n")
            ),
        }
        Ok(parse_list_updates(&o.stdout))
    }

    /// Aliases of the configured repositories
    pub fn repos(&self, runner: &dyn CommandRunner) -> Result<Vec<String>> {
        let o = runner.run(&self.binary, &["-q", "lr"])?;
        if !o.success() {
            warn!(
                "zypper lr exited with code {}: {}",
                o.code,
                o.stderr.join("\n")
            );
        }
        Ok(parse_repos(&o.stdout))
    }
}

/// Dashes and plus signs below the table header
fn is_separator(line: &str) -> bool {
    let l = line.trim();
    !l.is_empty() && l.chars().all(|c| c == '-' || c == '+')
}

/// Trimmed cells of a table row, `None` for blank and separator lines
fn row(line: &str) -> Option<Vec<&str>> {
    if line.trim().is_empty() || is_separator(line) {
        None
    } else {
        Some(line.split('|').map(str::trim).collect())
    }
}

/// Extract package names from `zypper list-updates` output.
///
/// Lines which are not table rows (warnings about repositories, prompts) are ignored.
pub fn parse_list_updates<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter_map(row)
        .filter(|fields| {
            let keep = fields.len() >= LIST_UPDATES_FIELDS && fields[1] != "Repository";
            if !keep {
                trace!("Skipping list-updates line: '{}'", fields.join("|"));
            }
            keep
        })
        .map(|fields| fields[LIST_UPDATES_NAME])
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Extract repository aliases from `zypper lr` output, in order.
pub fn parse_repos<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter_map(row)
        .filter(|fields| fields.len() > REPOS_ALIAS && fields[REPOS_ALIAS] != "Alias")
        .map(|fields| fields[REPOS_ALIAS])
        .filter(|alias| !alias.is_empty())
        .map(String::from)
        .collect()
}
