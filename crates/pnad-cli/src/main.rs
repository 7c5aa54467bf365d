//! PNAD pipeline CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use pnad_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use pnad_cli::commands::{
    apply_extract_args, apply_label_args, apply_neet_args, load_config, run_dictionaries,
    run_extract_command, run_label_command, run_neet_command, run_show_config,
};
use pnad_cli::logging::{LogConfig, LogFormat, init_logging};
use pnad_cli::summary::{print_neet_summary, print_run_summary};
use pnad_core::{PipelineError, StageError};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    if let Command::Dictionaries(args) = &cli.command {
        return run_dictionaries(args);
    }
    let mut config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Neet(args) => {
            apply_neet_args(&mut config, args);
            let run = run_neet_command(&config)?;
            print_neet_summary(&run);
        }
        Command::Label(args) => {
            apply_label_args(&mut config, args);
            let report = run_label_command(&config)?;
            print_run_summary(&report);
        }
        Command::Extract(args) => {
            apply_extract_args(&mut config, args)?;
            let report = run_extract_command(&config)?;
            print_run_summary(&report);
        }
        Command::Config => run_show_config(&config)?,
        Command::Dictionaries(_) => {}
    }
    Ok(())
}

fn report_error(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(PipelineError::Stage {
        source: StageError::Fetch(fetch),
        ..
    }) = error.downcast_ref::<PipelineError>()
    {
        eprintln!("hint: {}", fetch.user_message());
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_format(format)
        .with_ansi(with_ansi)
        .with_log_file(cli.log_file.clone());
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
    config
}
