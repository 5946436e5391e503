use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use comic_logging::{comic_error, comic_info};
use log::LevelFilter;

use super::cli::{CliArgs, Command, USAGE};
use super::commands;
use super::config::{AppConfig, DEFAULT_CONFIG_FILENAME};
use super::logging;

pub fn run_app() -> ExitCode {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.command == Command::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let explicit = args.config_path.is_some();
    let config_path = args
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let mut config = match AppConfig::load(&config_path, explicit) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = &args.api_base_url {
        config.api_base_url.clone_from(url);
    }
    if let Some(destination) = args.log_destination {
        config.log_destination = destination;
    }

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log_destination, level);
    comic_info!("comic-web starting: api_base_url={}", config.api_base_url);

    match run_command(&config, args.command) {
        Ok(code) => code,
        Err(err) => {
            comic_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_command(config: &AppConfig, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Genres => {
            let result = commands::genres(config, &mut io::stdout().lock())?;
            match result.error() {
                // The list is still printed (empty); the status tells scripts why.
                Some(err) => {
                    eprintln!("could not load genres: {err}");
                    Ok(ExitCode::FAILURE)
                }
                None => Ok(ExitCode::SUCCESS),
            }
        }
        Command::Preview {
            page,
            out,
            origin,
            files,
        } => {
            let attached =
                commands::preview(config, &page, &files, origin.as_deref(), out.as_deref())?;
            if !attached {
                eprintln!("no multi-file input found in {page:?}; nothing rendered");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
