// SPDX-License-Identifier: GPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Normation SAS

use clap::{Parser, Subcommand, ValueEnum};

use crate::CONFIG_PATH;

/// Rendering of the results, tables for humans or pretty-printed JSON
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    Json,
    #[default]
    Human,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path of the TOML configuration, defaults apply when missing
    #[arg(short, long, value_name = "FILE", default_value = CONFIG_PATH)]
    pub config: String,

    /// Log commands and their output
    #[arg(short, long)]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Distribution identifier, overrides configuration and os-release detection
    #[arg(long)]
    pub distribution: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List packages with a pending update
    Updates {
        #[arg(long, short, value_enum, default_value_t, help = "Output format")]
        format: Format,
    },
    /// Show the installed and available changelog of a package
    Changelog {
        #[arg(help = "Package spec, like 'sos.noarch'", required = true)]
        package: String,

        #[arg(long, short, value_enum, default_value_t, help = "Output format")]
        format: Format,
    },
    /// List the configured repositories
    #[command(visible_alias = "lr")]
    Repos {
        #[arg(long, short, value_enum, default_value_t, help = "Output format")]
        format: Format,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_has_a_valid_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn it_parses_arguments() {
        let args = Args::parse_from([
            "package-updates",
            "-d",
            "--distribution",
            "opensuse-leap",
            "changelog",
            "sos.noarch",
            "-f",
            "json",
        ]);
        assert!(args.debug);
        assert!(!args.quiet);
        assert_eq!(args.config, CONFIG_PATH);
        assert_eq!(args.distribution, Some("opensuse-leap".to_string()));
        assert_eq!(
            args.command,
            Command::Changelog {
                package: "sos.noarch".to_string(),
                format: Format::Json
            }
        );

        let args = Args::parse_from(["package-updates", "-q", "updates"]);
        assert!(args.quiet);
        assert_eq!(
            args.command,
            Command::Updates {
                format: Format::Human
            }
        );

        let args = Args::parse_from(["package-updates", "lr", "--format", "json"]);
        assert_eq!(
            args.command,
            Command::Repos {
                format: Format::Json
            }
        );

        let args = Args::parse_from(["package-updates", "lr"]);
        assert_eq!(
            args.command,
            Command::Repos {
                format: Format::Human
            }
        );
    }
}
