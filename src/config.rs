// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const YUM_PATH: &str = "/usr/bin/yum";
const ZYPPER_PATH: &str = "/usr/bin/zypper";
/// Our own packages are updated separately
const YUM_EXCLUDE: &str = "rock*";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Bypasses `/etc/os-release` detection
    #[serde(default)]
    pub distribution: Option<String>,
    #[serde(default)]
    pub commands: Commands,
}

/// Package manager binaries and their fixed arguments
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct Commands {
    pub yum: String,
    pub zypper: String,
    pub yum_exclude: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            yum: YUM_PATH.to_string(),
            zypper: ZYPPER_PATH.to_string(),
            yum_exclude: YUM_EXCLUDE.to_string(),
        }
    }
}

impl Configuration {
    fn parse(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// A missing file is not an error, all settings have defaults.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(
                "No configuration file at '{}', using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let c = read_to_string(path)?;
        Self::parse(&c).with_context(|| format!("Parsing configuration '{}'", path.display()))
    }
}
