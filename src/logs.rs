// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

//! Logs go to stderr, stdout is reserved for the command output.

use std::{env, io};

use anyhow::Result;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

fn level(debug: bool, quiet: bool) -> LevelFilter {
    match (debug, quiet) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::WARN,
        (false, false) => LevelFilter::INFO,
    }
}

pub fn init(debug: bool, quiet: bool) -> Result<()> {
    let no_color = env::var("NO_COLOR").is_ok();
    let filter = EnvFilter::builder()
        .from_env_lossy()
        .add_directive(level(debug, quiet).into());

    let logger = fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(logger)?;
    Ok(())
}
