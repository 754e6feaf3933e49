// src/cli.rs

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::{
    ffi::OsString,
    io::{self, Write},
    path::PathBuf,
};
use thiserror::Error;

const HELP_TEMPLATE: &str = "\
Usage:
  {usage}
Options:
  -h, --help    Show this help message and exit
  -o, --out     Output file name
";

/// Fetch a web page and save every HTML table in it as a CSV file.
#[derive(Parser, Debug)]
#[command(
    name = "tabmine",
    override_usage = "tabmine [url ...] [options]",
    help_template = HELP_TEMPLATE
)]
pub struct Cli {
    /// Page to fetch; only the first one is used
    #[arg(value_name = "url")]
    pub urls: Vec<String>,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    pub out: String,
}

/// Validated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub out_dir: PathBuf,
}

/// Bad invocation: reported with usage text and exit code 1.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("url is required")]
    MissingUrl,
    #[error("Output file name is required")]
    MissingOut,
}

/// Why the command line did not produce a [`Config`].
#[derive(Debug, Error)]
pub enum ArgsError {
    /// clap refused the arguments, or `--help` was asked for.
    #[error(transparent)]
    Clap(#[from] clap::Error),
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl ArgsError {
    /// 0 when help was shown, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgsError::Clap(e) if is_display(e.kind()) => 0,
            _ => 1,
        }
    }

    /// Print the message the way the process should show it: help on `out`,
    /// errors on `err` followed by the usage text.
    pub fn report(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        match self {
            ArgsError::Clap(e) if is_display(e.kind()) => write!(out, "{}", e.render()),
            ArgsError::Clap(e) => write!(err, "{}", e.render()),
            ArgsError::Usage(e) => {
                writeln!(err, "{}", e)?;
                write!(out, "{}", Cli::usage())
            }
        }
    }
}

fn is_display(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

impl Cli {
    /// Parse and validate in one go.
    pub fn config_from<I, T>(args: I) -> Result<Config, ArgsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?.into_config()?)
    }

    pub fn into_config(self) -> Result<Config, UsageError> {
        let url = self.urls.into_iter().next().ok_or(UsageError::MissingUrl)?;
        if self.out.is_empty() {
            return Err(UsageError::MissingOut);
        }
        Ok(Config {
            url,
            out_dir: PathBuf::from(self.out),
        })
    }

    /// Usage text as printed by `--help`.
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}
