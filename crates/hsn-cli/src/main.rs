//! Entry point for the `hsn` binary: parse arguments, load the dataset,
//! dispatch to the subcommand, and map errors to exit codes.
use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use error::CliError;
use format::{FormatMode, FormatterConfig};

fn main() {
    let cli = Cli::parse();

    let mode = match cli.format {
        OutputFormat::Human => FormatMode::Human,
        OutputFormat::Json => FormatMode::Json,
    };
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);

    if let Err(e) = run(&cli, mode, &config) {
        // Per-code diagnostics were already printed; ValidationErrors only
        // selects the exit code.
        if !matches!(e, CliError::ValidationErrors) {
            eprintln!("{}", e.message());
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli, mode: FormatMode, config: &FormatterConfig) -> Result<(), CliError> {
    match &cli.command {
        Command::Validate { data, codes, batch } => {
            let table = io::load_table(data, cli.max_file_size)?;
            let batch_content = match batch {
                Some(source) => Some(io::read_input(source, cli.max_file_size)?),
                None => None,
            };
            cmd::validate::run(&table, codes, batch_content.as_deref(), mode, config)
        }
        Command::Suggest {
            data,
            query,
            top_k,
        } => {
            let table = io::load_table(data, cli.max_file_size)?;
            cmd::suggest::run(&table, query, *top_k, mode, config)
        }
        Command::Search { data, query, limit } => {
            let table = io::load_table(data, cli.max_file_size)?;
            cmd::search::run(&table, query, *limit, mode, config)
        }
        Command::Inspect { data } => {
            let table = io::load_table(data, cli.max_file_size)?;
            cmd::inspect::run(&table, mode)
        }
        Command::Import { file, output } => {
            cmd::import::run(file, output.as_deref(), cli.max_file_size)
        }
    }
}
