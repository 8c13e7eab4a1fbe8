use std::io::{BufRead, Write};

use pdfrag_lib::backend::ModelBackend;
use pdfrag_lib::output::ConsoleIO;
use pdfrag_lib::rag::RagSystem;

/// Run the `pdfrag clear-cache` command.
pub fn run_clear_cache<B, IN, OUT, ERR>(
    system: &RagSystem<B>,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    B: ModelBackend,
    IN: BufRead,
    OUT: Write,
    ERR: Write,
{
    let cache = system.cache();
    if !cache.index_path().exists() && !cache.chunks_path().exists() {
        writeln!(io.stdout(), "No cache in {}", cache.dir().display())?;
        return Ok(());
    }
    cache.clear()?;
    writeln!(io.stdout(), "Removed cache in {}", cache.dir().display())?;
    Ok(())
}
