use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::warn;

use pdfrag_lib::backend::ModelBackend;
use pdfrag_lib::output::ConsoleIO;
use pdfrag_lib::pipeline::ingest::CorpusSource;
use pdfrag_lib::rag::RagSystem;

const PROMPT: &str = "\nAsk a question (or type 'exit'): ";

/// Whether `input` ends the session (`exit` or `quit`, any case).
fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Run the `pdfrag ask` command: prepare the corpus, then answer one question
/// per input line until `exit`, `quit` or end of input.
///
/// A failed embedding or generation call is reported on stderr and the loop
/// moves on to the next question. Failing to prepare the corpus is fatal.
pub fn run_ask<B, IN, OUT, ERR>(
    system: &mut RagSystem<B>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    B: ModelBackend,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let pdf_path = system.config().pdf_path.clone();
    let source = system
        .prepare(&pdf_path)
        .with_context(|| format!("Failed to prepare index for {}", pdf_path.display()))?;

    let cache_dir = system.cache().dir().display().to_string();
    match source {
        CorpusSource::Loaded => writeln!(io.stderr(), "Cache loaded from {cache_dir}")?,
        CorpusSource::Built => {
            let chunk_count = system.corpus().map_or(0, |c| c.len());
            writeln!(
                io.stderr(),
                "Index built from {} ({chunk_count} chunks), saved in {cache_dir}",
                pdf_path.display()
            )?;
        }
    }

    loop {
        write!(io.stdout(), "{PROMPT}")?;
        io.stdout().flush()?;

        let Some(line) = io.read_line()? else {
            writeln!(io.stdout())?;
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if is_exit(query) {
            break;
        }

        match system.answer_question(query) {
            Ok(answer) => writeln!(io.stdout(), "\nAnswer:\n{}", answer.text)?,
            Err(e) if e.is_per_question() => {
                warn!(error = %e, "Question failed");
                writeln!(io.stderr(), "Error: {e}")?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
