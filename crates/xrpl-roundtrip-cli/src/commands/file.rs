//! File input: the whole file is one record.

use crate::session::{Outcome, Session};
use std::io::{BufRead, Write};
use std::path::Path;
use xrpl_roundtrip_canonical::HarnessError;

pub fn run<I: BufRead, O: Write>(
    session: &mut Session<'_, I, O>,
    path: &Path,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
    tracing::debug!(file = %path.display(), bytes = content.len(), "read input file");
    Ok(session.process_input(&content)?)
}
