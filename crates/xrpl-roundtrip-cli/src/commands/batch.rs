//! Batch processing: every file in a directory is an independent record.

use crate::output;
use crate::session::{Outcome, Session, Tally};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use xrpl_roundtrip_canonical::HarnessError;

/// Processes each regular file under `dir` in name order.
///
/// Unreadable entries, unreadable files and failing records are reported and
/// skipped; only an unreadable directory or a console failure ends the batch early.
pub fn run<I: BufRead, O: Write>(
    session: &mut Session<'_, I, O>,
    dir: &Path,
) -> Result<Tally, Box<dyn std::error::Error>> {
    writeln!(session.out(), "Processing directory: {}", dir.display())?;
    let listing = list_files(dir)?;
    run_listing(session, listing)
}

fn run_listing<I: BufRead, O: Write>(
    session: &mut Session<'_, I, O>,
    listing: Listing,
) -> Result<Tally, Box<dyn std::error::Error>> {
    if listing.files.is_empty() && listing.unreadable.is_empty() {
        writeln!(session.out(), "No files found in the directory.")?;
        return Ok(Tally::default());
    }

    let before = session.tally();
    for error in &listing.unreadable {
        output::write_error(session.out(), error)?;
        session.record(Outcome::Failed);
    }
    for path in &listing.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(session.out(), "\nProcessing file:\n {}", name)?;
        tracing::debug!(file = %path.display(), "batch record");

        match fs::read_to_string(path) {
            Ok(content) => {
                session.process_input(&content)?;
            }
            Err(e) => {
                output::write_error(session.out(), &HarnessError::io(path, e))?;
                session.record(Outcome::Failed);
            }
        }
    }

    let after = session.tally();
    let batch = Tally {
        succeeded: after.succeeded - before.succeeded,
        mismatched: after.mismatched - before.mismatched,
        failed: after.failed - before.failed,
    };
    writeln!(
        session.out(),
        "\nProcessed {} file(s): {} succeeded, {} mismatched, {} failed",
        batch.total(),
        batch.succeeded,
        batch.mismatched,
        batch.failed
    )?;
    Ok(batch)
}

/// Contents of a batch directory.
#[derive(Debug, Default)]
pub struct Listing {
    /// Non-directory entries, sorted by path.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read or inspected.
    pub unreadable: Vec<HarnessError>,
}

/// Lists `dir`, keeping going past entries that cannot be inspected.
pub fn list_files(dir: &Path) -> Result<Listing, HarnessError> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    Ok(collect_listing(entries.map(|entry| {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) => Ok((path, file_type.is_dir())),
            Err(e) => Err(HarnessError::io(path, e)),
        }
    })))
}

fn collect_listing<I>(entries: I) -> Listing
where
    I: IntoIterator<Item = Result<(PathBuf, bool), HarnessError>>,
{
    let mut listing = Listing::default();
    for entry in entries {
        match entry {
            Ok((path, false)) => listing.files.push(path),
            Ok((_, true)) => {}
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                listing.unreadable.push(e);
            }
        }
    }
    listing.files.sort();
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SavePolicy;
    use crate::session::tests::{encoded, harness, test_config};
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn bad_file_does_not_stop_the_batch() {
        let out_dir = TempDir::new().unwrap();
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("1.json"), r#"{"Account":"r1"}"#).unwrap();
        fs::write(input.path().join("2.json"), "{ not json or hex").unwrap();
        fs::write(input.path().join("3.hex"), encoded(json!({"Account": "r3"}))).unwrap();
        fs::create_dir(input.path().join("nested")).unwrap();

        let config = test_config(&out_dir, SavePolicy::Never);
        let harness = harness();
        let mut out = Vec::new();
        let mut session = Session::new(&harness, &config, Cursor::new(String::new()), &mut out);
        let tally = run(&mut session, input.path()).unwrap();
        assert_eq!(tally, Tally { succeeded: 2, mismatched: 0, failed: 1 });

        let text = String::from_utf8(out).unwrap();
        let second = text.find(" 2.json").unwrap();
        let error = text.find("Error: invalid JSON").unwrap();
        let third = text.find(" 3.hex").unwrap();
        assert!(second < error && error < third);
        assert!(text.contains("Processed 3 file(s): 2 succeeded, 0 mismatched, 1 failed"));
        assert!(!text.contains("nested"));
    }

    #[test]
    fn empty_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, SavePolicy::Never);
        let harness = harness();
        let mut out = Vec::new();
        let mut session = Session::new(&harness, &config, Cursor::new(String::new()), &mut out);
        assert_eq!(run(&mut session, dir.path()).unwrap(), Tally::default());
        assert!(String::from_utf8(out).unwrap().contains("No files found"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            list_files(&dir.path().join("missing")),
            Err(HarnessError::Io { .. })
        ));
    }

    #[test]
    fn unreadable_entries_are_skipped_while_listing() {
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let listing = collect_listing(vec![
            Ok((PathBuf::from("b.json"), false)),
            Err(HarnessError::io("ghost", denied())),
            Ok((PathBuf::from("nested"), true)),
            Ok((PathBuf::from("a.json"), false)),
        ]);
        assert_eq!(listing.files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(listing.unreadable.len(), 1);
    }

    #[test]
    fn unreadable_entry_counts_as_failed_and_batch_continues() {
        let out_dir = TempDir::new().unwrap();
        let input = TempDir::new().unwrap();
        let good = input.path().join("1.json");
        fs::write(&good, r#"{"Account":"r1"}"#).unwrap();
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let listing = Listing {
            files: vec![good],
            unreadable: vec![HarnessError::io(input.path().join("ghost"), denied)],
        };

        let config = test_config(&out_dir, SavePolicy::Never);
        let harness = harness();
        let mut out = Vec::new();
        let mut session = Session::new(&harness, &config, Cursor::new(String::new()), &mut out);
        let tally = run_listing(&mut session, listing).unwrap();
        assert_eq!(tally, Tally { succeeded: 1, mismatched: 0, failed: 1 });

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error:") && text.contains("ghost"));
        assert!(text.contains("Processed 2 file(s): 1 succeeded, 0 mismatched, 1 failed"));
    }

    #[test]
    fn batch_prompts_per_file() {
        let out_dir = TempDir::new().unwrap();
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("a.json"), r#"{"Account":"ra"}"#).unwrap();
        fs::write(input.path().join("b.json"), r#"{"Account":"rb"}"#).unwrap();

        let config = test_config(&out_dir, SavePolicy::Prompt);
        let harness = harness();
        let answers = Cursor::new("y\nn\n".to_string());
        let mut session = Session::new(&harness, &config, answers, Vec::new());
        run(&mut session, input.path()).unwrap();

        assert!(out_dir.path().join("output.txt").exists());
        assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 1);
    }
}
