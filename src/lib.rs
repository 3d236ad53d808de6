// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

//! Pending updates, changelogs and repositories of the system, from yum or zypper output.
//!
//! The library only parses. Running the package managers goes through a
//! [`cmd::CommandRunner`], so the parsers can be fed captured output.

mod cli;
pub mod cmd;
pub mod config;
mod list;
mod logs;
pub mod os_release;
pub mod package_manager;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

use crate::{
    cli::{Args, Command},
    cmd::SystemRunner,
    config::Configuration,
    package_manager::PackageManager,
};

const CONFIG_PATH: &str = "/etc/package-updates/config.toml";

/// CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();

    // Setup logger early
    logs::init(args.debug, args.quiet)?;

    let r = run_inner(args);
    if let Err(ref e) = r {
        error!("{:?}", e);
    }
    r
}

fn run_inner(args: Args) -> Result<()> {
    debug!("Parsed CLI arguments: {args:?}");
    let mut cfg = Configuration::read(Path::new(&args.config))
        .with_context(|| format!("Reading configuration from '{}'", &args.config))?;
    if args.distribution.is_some() {
        cfg.distribution = args.distribution;
    }
    debug!("Parsed configuration: {cfg:?}");

    let runner = SystemRunner;
    let pm = PackageManager::new(&runner, &cfg);

    let output = match args.command {
        Command::Updates { format } => list::updates(&pm.pkg_update_check()?, format)?,
        Command::Changelog { package, format } => {
            let distribution = pm.distribution_id()?;
            list::changelog(&pm.changelog(&package, &distribution)?, format)?
        }
        Command::Repos { format } => list::repos(&pm.repos()?, format)?,
    };
    println!("{output}");
    Ok(())
}
