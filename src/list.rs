// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use anyhow::Result;
use cli_table::{
    Cell, Style, Table,
    format::{HorizontalLine, Separator, VerticalLine},
};

use crate::{
    cli::Format,
    package_manager::{LINE_SEPARATOR, PackageUpdateInfo},
};

fn separator() -> Separator {
    Separator::builder()
        .column(Some(VerticalLine::new('|')))
        .title(Some(HorizontalLine::new('+', '+', '+', '-')))
        .build()
}

/// Only the first line of a changelog block fits in a table cell
fn summary(block: &str) -> &str {
    block.split(LINE_SEPARATOR).next().unwrap_or_default()
}

pub fn updates(updates: &[PackageUpdateInfo], format: Format) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(updates)?);
    }
    if updates.is_empty() {
        return Ok("No pending updates.".to_string());
    }
    let table = updates
        .iter()
        .map(|u| {
            vec![
                u.name.as_str().cell(),
                summary(&u.installed).cell(),
                summary(&u.available).cell(),
            ]
        })
        .table()
        .separator(separator())
        .title(vec![
            "Name".cell().bold(true),
            "Installed".cell().bold(true),
            "Available".cell().bold(true),
        ]);
    Ok(table.display()?.to_string())
}

pub fn changelog(info: &PackageUpdateInfo, format: Format) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(info)?);
    }
    let block = |b: &str| {
        b.split(LINE_SEPARATOR)
            .map(|l| format!("  {l}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(format!(
        "Name: {}\nInstalled:\n{}\nAvailable:\n{}",
        info.name,
        block(&info.installed),
        block(&info.available)
    ))
}

pub fn repos(repos: &[String], format: Format) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(repos)?);
    }
    if repos.is_empty() {
        return Ok("No repositories found.".to_string());
    }
    let table = repos
        .iter()
        .enumerate()
        .map(|(i, r)| vec![(i + 1).cell(), r.as_str().cell()])
        .table()
        .separator(separator())
        .title(vec!["#".cell().bold(true), "Alias".cell().bold(true)]);
    Ok(table.display()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sos() -> PackageUpdateInfo {
        PackageUpdateInfo {
            name: "sos".to_string(),
            installed: "sos-3.6-17.el7.centos.noarch installed[line]- Roll in CentOS Branding"
                .to_string(),
            available: "sos-3.7-6.el7.centos.noarch updates".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn it_displays_changelog() {
        assert_eq!(
            changelog(&sos(), Format::Human).unwrap(),
            "Name: sos
Installed:
  sos-3.6-17.el7.centos.noarch installed
  - Roll in CentOS Branding
Available:
  sos-3.7-6.el7.centos.noarch updates"
        );
    }

    #[test]
    fn it_displays_updates_table() {
        let out = updates(&[sos()], Format::Human).unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains("sos-3.6-17.el7.centos.noarch installed"));
        assert!(!out.contains("Roll in CentOS Branding"));
        assert_eq!(updates(&[], Format::Human).unwrap(), "No pending updates.");
    }

    #[test]
    fn it_displays_json() {
        let out = updates(&[sos()], Format::Json).unwrap();
        let parsed: Vec<PackageUpdateInfo> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec![sos()]);

        let out = repos(&["repo-oss".to_string()], Format::Json).unwrap();
        assert_eq!(out, "[\n  \"repo-oss\"\n]");
        assert_eq!(repos(&[], Format::Json).unwrap(), "[]");
    }

    #[test]
    fn it_displays_repos_table() {
        let out = repos(
            &["repo-oss".to_string(), "repo-update".to_string()],
            Format::Human,
        )
        .unwrap();
        assert!(out.contains("repo-oss"));
        assert!(out.contains("repo-update"));
        assert_eq!(repos(&[], Format::Human).unwrap(), "No repositories found.");
    }
}
