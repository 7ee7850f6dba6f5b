//! One run of the harness: a verifier, its configuration, and a console.
//!
//! The console is any `BufRead`/`Write` pair so the interactive flows can be
//! driven from tests the same way they are driven from a terminal.

use crate::config::{Config, SavePolicy};
use crate::output;
use std::io::{self, BufRead, Write};
use xrpl_roundtrip_canonical::{
    write_output, Codec, FieldTypeRegistry, RoundTrip, Verdict, DEFAULT_OUTPUT_NAME,
};

/// Verifier over whichever codec and registry the configuration selected.
pub type Harness = RoundTrip<Box<dyn Codec>, Box<dyn FieldTypeRegistry>>;

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Mismatch,
    Failed,
}

/// Running counts across the records of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub mismatched: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.succeeded += 1,
            Outcome::Mismatch => self.mismatched += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.mismatched + self.failed
    }

    pub fn all_ok(&self) -> bool {
        self.mismatched == 0 && self.failed == 0
    }
}

pub struct Session<'a, I, O> {
    harness: &'a Harness,
    config: &'a Config,
    input: I,
    out: O,
    tally: Tally,
}

impl<'a, I: BufRead, O: Write> Session<'a, I, O> {
    pub fn new(harness: &'a Harness, config: &'a Config, input: I, out: O) -> Self {
        Self {
            harness,
            config,
            input,
            out,
            tally: Tally::default(),
        }
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Console output, for commands that print their own progress.
    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.tally.record(outcome);
    }

    /// Reads one line without its terminator; `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Reads lines until an empty line or end of input, joined with `\n`.
    pub fn read_multiline(&mut self) -> io::Result<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    /// Prints `message` and reads the answer line.
    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.out, "{}", message)?;
        self.out.flush()?;
        self.read_line()
    }

    /// Runs one record through the round trip and reports the result.
    ///
    /// Record-level failures are printed, not returned; only console I/O
    /// errors propagate.
    pub fn process_input(&mut self, raw: &str) -> io::Result<Outcome> {
        let report = match self.harness.run(raw) {
            Ok(report) => report,
            Err(e) => {
                tracing::debug!(error = %e, "record failed");
                output::write_error(&mut self.out, &e)?;
                self.tally.record(Outcome::Failed);
                return Ok(Outcome::Failed);
            }
        };

        output::write_converted(&mut self.out, &report)?;
        output::write_checking(&mut self.out, report.mode)?;
        if !self.config.pace.is_zero() {
            std::thread::sleep(self.config.pace);
        }
        output::write_verdict(&mut self.out, &report)?;

        if let Some(name) = self.save_target()? {
            match write_output(&self.config.out_dir, &name, &report.converted) {
                Ok(path) => writeln!(self.out, "Output saved to {}", path.display())?,
                Err(e) => output::write_error(&mut self.out, &e)?,
            }
        }

        let outcome = match report.verdict {
            Verdict::Success => Outcome::Success,
            Verdict::Mismatch => Outcome::Mismatch,
        };
        self.tally.record(outcome);
        Ok(outcome)
    }

    /// Decides whether to save and under which base name.
    fn save_target(&mut self) -> io::Result<Option<String>> {
        match &self.config.save {
            SavePolicy::Never => Ok(None),
            SavePolicy::Always(name) => Ok(Some(name.clone())),
            SavePolicy::Prompt => {
                let answer = self.prompt(
                    "\nWould you like to save the output to a file? (y/n) or (y filename):",
                )?;
                Ok(answer.as_deref().and_then(parse_save_answer))
            }
        }
    }
}

/// Interprets a save prompt answer: `y`, `y NAME`, or anything else for no.
pub fn parse_save_answer(answer: &str) -> Option<String> {
    let answer = answer.trim();
    let (head, rest) = match answer.split_once(' ') {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (answer, None),
    };
    if !head.eq_ignore_ascii_case("y") {
        return None;
    }
    match rest {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => Some(DEFAULT_OUTPUT_NAME.to_string()),
    }
}
