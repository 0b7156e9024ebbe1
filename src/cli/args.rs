//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Load every translation and run the checks
//! - `release`: Check, then generate the TypeScript sources
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "elzii", author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Check(cmd)) => Some(&cmd.common),
            Some(Command::Release(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }

    pub fn no_color(&self) -> bool {
        self.common().is_some_and(|common| common.no_color)
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root, where the config file is searched from
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Translations directory (overrides config file)
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ReleaseCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// TypeScript output directory (overrides config file)
    #[arg(long)]
    pub ts_out: Option<PathBuf>,

    /// Declaration output directory (overrides config file)
    #[arg(long)]
    pub dts_out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translations for errors (parameters, missing and obsolete keys)
    Check(CheckCommand),
    /// Check translations and generate the TypeScript sources
    Release(ReleaseCommand),
    /// Initialize a new .elziirc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_overrides() {
        let args = Arguments::try_parse_from([
            "elzii",
            "release",
            "--translations",
            "tm",
            "--ts-out",
            "out",
            "-v",
        ])
        .unwrap();
        assert!(!args.no_color());
        match args.command {
            Some(Command::Release(cmd)) => {
                assert!(cmd.common.verbose);
                assert_eq!(cmd.common.translations, Some(PathBuf::from("tm")));
                assert_eq!(cmd.ts_out, Some(PathBuf::from("out")));
                assert_eq!(cmd.dts_out, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_has_no_common_args() {
        let args = Arguments::try_parse_from(["elzii", "init"]).unwrap();
        assert!(!args.no_color());
        assert!(Arguments::try_parse_from(["elzii", "init", "--verbose"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Arguments::command().debug_assert();
    }
}
