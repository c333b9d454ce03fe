//! logsplice - expand £expression£ spans from model-checker logs
//!
//! Usage:
//!   logsplice report.in.tex -o report.tex -d logs:old/logs
//!   logsplice -p table.in.tex               Replace failures with ERROR
//!   logsplice --list-functions              Show extraction functions

mod cli;

use clap::Parser;
use cli::Cli;
use logsplice::{Engine, EngineError, Evaluator, Registry};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read input '{path}': {source}")]
    Input { path: String, source: io::Error },
    #[error("cannot write output '{}': {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
    #[error("cannot write to standard output: {0}")]
    Stdout(io::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays the document (RUST_LOG overrides)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();

    if cli.list_functions {
        print_functions(&Registry::standard());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Engine(EngineError::Span(_))) => {
            // already reported by the error policy
            error!("aborting; no output written");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = cli.input.as_deref().unwrap_or("-");
    let document = read_input(input)?;

    let mut ctx = cli.resolution_context();
    let engine = Engine::new(Evaluator::default(), cli.config());
    let expansion = engine.expand(&document, &mut ctx)?;

    write_output(cli.output.as_ref(), &expansion.output)?;

    info!(
        substituted = expansion.substituted,
        failed = expansion.failed,
        files_opened = ctx.history().len(),
        "expanded {}",
        input
    );
    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    let to_err = |source| CliError::Input {
        path: input.to_string(),
        source,
    };
    if input == "-" {
        let mut document = String::new();
        io::stdin().read_to_string(&mut document).map_err(to_err)?;
        Ok(document)
    } else {
        fs::read_to_string(input).map_err(to_err)
    }
}

fn write_output(output: Option<&PathBuf>, document: &str) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, document).map_err(|source| CliError::Output {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}

fn print_functions(registry: &Registry) {
    println!("Extraction functions (argument: \"file\", index, or omitted for the last file):");
    for extractor in registry.iter() {
        println!("    {:<12}{}", extractor.name(), extractor.description());
    }
}
