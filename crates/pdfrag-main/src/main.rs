use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use pdfrag_cli::cli::Cli;
use pdfrag_lib::backend::gemini::GeminiClient;
use pdfrag_lib::config::RagConfig;
use pdfrag_lib::output::{ConsoleIO, StdIO};
use pdfrag_lib::rag::RagSystem;

fn main() -> ExitCode {
    pdfrag_cli::logging::init();
    // Exits on --help, --version and malformed arguments.
    let cli = Cli::parse();
    let mut io = StdIO::new();

    match run(cli, &mut io) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = io.stdout().flush();
            let _ = writeln!(io.stderr(), "Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, io: &mut StdIO) -> anyhow::Result<()> {
    // The API key is checked before any file or network access.
    let backend = GeminiClient::from_env()?;
    let mut system = RagSystem::new(backend, RagConfig::default())?;
    pdfrag_cli::run(cli, &mut system, io)
}
