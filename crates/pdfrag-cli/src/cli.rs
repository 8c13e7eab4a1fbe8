use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pdfrag",
    version,
    about = "Ask questions about a PDF, answered from retrieved passages"
)]
pub struct Cli {
    /// Defaults to the interactive question loop.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load or build the index, then answer questions read from stdin.
    Ask,

    /// Delete the cached index and chunks so the next run rebuilds them.
    ClearCache,
}
