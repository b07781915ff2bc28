//! Material converter CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use matconv_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, PresetCommand};
use matconv_cli::commands::{run_catalog, run_convert, run_preset_list, run_preset_save};
use matconv_cli::logging::{LogConfig, LogFormat, init_logging};
use matconv_cli::summary::{print_catalog, print_conversion, print_preset_list};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Catalog(args) => match run_catalog(args) {
            Ok(result) => {
                print_catalog(&result);
                0
            }
            Err(error) => report(&error),
        },
        Command::Preset(PresetCommand::Save(args)) => match run_preset_save(args) {
            Ok(result) => {
                println!(
                    "Saved preset with {} pairs to {}",
                    result.pairs,
                    result.path.display()
                );
                0
            }
            Err(error) => report(&error),
        },
        Command::Preset(PresetCommand::List(args)) => match run_preset_list(args) {
            Ok(presets) => {
                print_preset_list(&presets);
                0
            }
            Err(error) => report(&error),
        },
        Command::Convert(args) => match run_convert(args) {
            Ok(result) => {
                print_conversion(&result);
                i32::from(result.has_errors())
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
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
