pub mod cli;
pub mod commands;
pub mod logging;

#[cfg(test)]
pub mod test_util;

use std::io::{BufRead, Write};

use clap::Parser;

use pdfrag_lib::backend::ModelBackend;
use pdfrag_lib::output::ConsoleIO;
use pdfrag_lib::rag::RagSystem;

use cli::{Cli, Command};

/// Parse `args` and dispatch to the selected command.
pub fn try_run<B, IN, OUT, ERR>(
    args: &[&str],
    system: &mut RagSystem<B>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    B: ModelBackend,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;
    run(cli, system, io)
}

/// Dispatch an already parsed command line.
pub fn run<B, IN, OUT, ERR>(
    cli: Cli,
    system: &mut RagSystem<B>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    B: ModelBackend,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    match cli.command.unwrap_or(Command::Ask) {
        Command::Ask => commands::ask::run_ask(system, io),
        Command::ClearCache => commands::clear_cache::run_clear_cache(system, io),
    }
}
