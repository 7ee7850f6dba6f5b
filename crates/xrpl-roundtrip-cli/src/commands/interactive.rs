//! Menu-driven loop used when no mode flag is given.

use crate::cli::help_text;
use crate::commands::{batch, file};
use crate::output;
use crate::session::Session;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Runs the menu until the user exits or input ends.
pub fn run<I: BufRead, O: Write>(session: &mut Session<'_, I, O>) -> io::Result<()> {
    loop {
        let Some(line) = session.prompt(output::MENU)? else {
            return Ok(());
        };

        match line.trim().parse::<u8>() {
            Ok(1) => direct_input(session)?,
            Ok(2) => file_input(session)?,
            Ok(3) => batch_input(session)?,
            Ok(4) => writeln!(session.out(), "\n{}", help_text())?,
            Ok(5) => {
                writeln!(session.out(), "\nExiting the tool. Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(session.out(), "\nInvalid choice!")?;
                continue;
            }
        }

        if session
            .prompt("\nPress Enter to return to the main menu.")?
            .is_none()
        {
            return Ok(());
        }
    }
}

fn direct_input<I: BufRead, O: Write>(session: &mut Session<'_, I, O>) -> io::Result<()> {
    writeln!(
        session.out(),
        "\n\nPlease paste your JSON or HEX data and press Enter twice:\n\nInput Data:"
    )?;
    session.out().flush()?;
    let data = session.read_multiline()?;
    session.process_input(&data)?;
    Ok(())
}

fn file_input<I: BufRead, O: Write>(session: &mut Session<'_, I, O>) -> io::Result<()> {
    let Some(path) = session.prompt("\nEnter the path to your input file:")? else {
        return Ok(());
    };
    let path = path.trim();
    if path.is_empty() {
        return writeln!(session.out(), "Error: no file path provided");
    }
    if let Err(e) = file::run(session, Path::new(path)) {
        output::write_error(session.out(), &e)?;
    }
    Ok(())
}

fn batch_input<I: BufRead, O: Write>(session: &mut Session<'_, I, O>) -> io::Result<()> {
    let Some(dir) = session.prompt("\nPlease provide the directory path for batch processing:")?
    else {
        return Ok(());
    };
    let dir = dir.trim();
    if dir.is_empty() {
        return writeln!(session.out(), "Error: no directory path provided");
    }
    if let Err(e) = batch::run(session, Path::new(dir)) {
        output::write_error(session.out(), &e)?;
    }
    Ok(())
}
