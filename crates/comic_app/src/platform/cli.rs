use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use super::logging::LogDestination;

pub const USAGE: &str = "\
Usage: comic-web [OPTIONS] <COMMAND>

Commands:
  genres                          Fetch the genre list and print `id<TAB>name` lines
  preview --page <FILE> [FILES]   Attach the image preview to an admin page and
                                  render it for the given selection

Options:
  --config <FILE>        RON config file (default: ./comic_web.ron)
  --api-base-url <URL>   Override the API base URL
  --log <DEST>           terminal, file or both
  -v, --verbose          Debug-level logging
  -h, --help             Print this help

Preview options:
  --page <FILE>          Admin page HTML to attach to
  --out <FILE>           Write the rendered page here instead of stdout
  --origin <URL>         Page origin for preview addresses";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] pico_args::Error),
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Genres,
    Preview {
        page: PathBuf,
        out: Option<PathBuf>,
        origin: Option<String>,
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub log_destination: Option<LogDestination>,
    pub verbose: bool,
    pub command: Command,
}

impl CliArgs {
    pub fn from_env() -> Result<Self, CliError> {
        Self::parse(std::env::args_os().skip(1).collect())
    }

    pub fn parse(raw: Vec<OsString>) -> Result<Self, CliError> {
        let mut args = pico_args::Arguments::from_vec(raw);

        let help = args.contains(["-h", "--help"]);
        let verbose = args.contains(["-v", "--verbose"]);
        let config_path = args.opt_value_from_os_str("--config", to_path)?;
        let api_base_url = args.opt_value_from_str("--api-base-url")?;
        let log_destination = args.opt_value_from_str("--log")?;

        let command = if help {
            Command::Help
        } else {
            match args.subcommand()?.as_deref() {
                Some("genres") => {
                    let rest = args.finish();
                    if !rest.is_empty() {
                        return Err(CliError::Unexpected(rest));
                    }
                    Command::Genres
                }
                Some("preview") => Command::Preview {
                    page: args.value_from_os_str("--page", to_path)?,
                    out: args.opt_value_from_os_str("--out", to_path)?,
                    origin: args.opt_value_from_str("--origin")?,
                    // Everything left over is the selection, in order.
                    files: args.finish().into_iter().map(PathBuf::from).collect(),
                },
                Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
                None => return Err(CliError::MissingCommand),
            }
        };

        Ok(Self {
            config_path,
            api_base_url,
            log_destination,
            verbose,
            command,
        })
    }
}

fn to_path(value: &std::ffi::OsStr) -> Result<PathBuf, String> {
    Ok(PathBuf::from(value))
}
