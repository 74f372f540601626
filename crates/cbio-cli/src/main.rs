//! `cbio-convert` command-line entry point.

use std::io::{self, IsTerminal};

use cbio_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_bulk, run_convert, run_omics, run_taxonomy};
use crate::summary::{print_batch, print_bulk, print_study};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Convert(args) => run_convert(args).map(|(result, omics)| {
            print_study(&result);
            match omics {
                Some(summary) => {
                    print_batch(&summary);
                    i32::from(summary.has_failures())
                }
                None => 0,
            }
        }),
        Command::Bconvert(args) => run_bulk(args).map(|entries| {
            print_bulk(&entries);
            i32::from(entries.iter().any(|entry| entry.outcome.is_err()))
        }),
        Command::Omics(args) => run_omics(args).map(|summary| {
            print_batch(&summary);
            i32::from(summary.has_failures())
        }),
        Command::Taxonomy(args) => run_taxonomy(args).map(|taxonomy| {
            println!("Cached {} tumor type codes.", taxonomy.len());
            0
        }),
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
