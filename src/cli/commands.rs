use crate::cli::args::Cli;
use crate::transpiler::{generate_artifacts, load_model};
use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use log::{LevelFilter, debug};
use std::process::ExitCode;

pub fn run() -> ExitCode {
    run_from(std::env::args_os())
}

/// Parse `args` and run the generator. Every failure is reported on stdout and
/// turns into exit status 1.
pub fn run_from<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", e);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            print!("{}", e);
            return ExitCode::from(1);
        }
    };

    init_logging(cli.verbose);

    match generate_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A second initialisation (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

fn generate_command(cli: &Cli) -> Result<()> {
    let config = cli.config();
    debug!("configuration: {:?}", config);

    let model = load_model(&cli.input, &config)?;

    if cli.dump_model {
        println!("{}", serde_json::to_string_pretty(&model)?);
    }

    let (header, source) = generate_artifacts(&model, &cli.input, &config)?;

    if !config.to_stdout {
        println!("Generated {} and {}.", header.display(), source.display());
    }

    Ok(())
}
