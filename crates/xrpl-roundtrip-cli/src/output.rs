//! Console message formatting.

use std::io::{self, Write};
use xrpl_roundtrip_canonical::{RoundTripMode, RoundTripReport, Verdict};

pub const MENU: &str = "
WARNING: pasting very large records with Direct Input (option 1) may overload your terminal.
Consider File Input (option 2) for large datasets.

Choose input method:

1. Direct Input
2. File Input
3. Batch Processing (Directory Input)
4. Display Help
5. Exit
";

const OMITTED_FIELDS_NOTE: &str = "Note: some JSON fields are never encoded, either because \
the codec has no definition for them or because they are excluded from the binary format. \
A mismatch caused by such fields is expected.";

/// Prints the converted representation of a finished round trip.
pub fn write_converted(out: &mut impl Write, report: &RoundTripReport) -> io::Result<()> {
    match report.mode {
        RoundTripMode::JsonHexJson => writeln!(out, "\nEncoded Tx Hex:\n\n{}", report.converted),
        RoundTripMode::HexJsonHex => writeln!(out, "\nDecoded Tx JSON:\n\n{}", report.converted),
    }
}

/// Prints the line announcing the comparison.
pub fn write_checking(out: &mut impl Write, mode: RoundTripMode) -> io::Result<()> {
    let line = match mode {
        RoundTripMode::JsonHexJson => {
            "Checking if the re-decoded Tx JSON matches the original Tx JSON..."
        }
        RoundTripMode::HexJsonHex => {
            "Checking if the re-encoded Tx Hex matches the original Tx Hex..."
        }
    };
    writeln!(out, "\n\n{}", line)?;
    out.flush()
}

/// Prints SUCCESS or FAIL, with the mismatching representation on failure.
pub fn write_verdict(out: &mut impl Write, report: &RoundTripReport) -> io::Result<()> {
    match (report.mode, report.verdict) {
        (RoundTripMode::JsonHexJson, Verdict::Success) => {
            writeln!(out, "\nSUCCESS ---> Re-decoded Tx JSON matches the original Tx JSON")
        }
        (RoundTripMode::JsonHexJson, Verdict::Mismatch) => {
            writeln!(out, "\nFAIL ---> Re-decoded Tx JSON does not match the original Tx JSON")?;
            writeln!(out, "{}", OMITTED_FIELDS_NOTE)?;
            writeln!(out, "\nRe-decoded Tx JSON:\n{}", report.reproduced)
        }
        (RoundTripMode::HexJsonHex, Verdict::Success) => {
            writeln!(out, "\nSUCCESS ---> Re-encoded Tx Hex matches the original Tx Hex")
        }
        (RoundTripMode::HexJsonHex, Verdict::Mismatch) => {
            writeln!(out, "\nFAIL ---> Re-encoded Tx Hex does not match the original Tx Hex")?;
            writeln!(out, "\nRe-encoded Tx Hex:\n{}", report.reproduced)
        }
    }
}

/// Prints a per-record error.
pub fn write_error(out: &mut impl Write, error: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "Error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &RoundTripReport) -> String {
        let mut buf = Vec::new();
        write_converted(&mut buf, report).unwrap();
        write_verdict(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_mismatch_prints_redecoded_json() {
        let text = render(&RoundTripReport {
            mode: RoundTripMode::JsonHexJson,
            converted: "1200".into(),
            reproduced: "{\n  \"Account\": \"r1\"\n}".into(),
            verdict: Verdict::Mismatch,
        });
        assert!(text.contains("Encoded Tx Hex:\n\n1200"));
        assert!(text.contains("FAIL --->"));
        assert!(text.contains("Re-decoded Tx JSON:\n{\n  \"Account\""));
    }

    #[test]
    fn hex_success_has_no_diagnostic() {
        let text = render(&RoundTripReport {
            mode: RoundTripMode::HexJsonHex,
            converted: "{}".into(),
            reproduced: "1200".into(),
            verdict: Verdict::Success,
        });
        assert!(text.contains("SUCCESS --->"));
        assert!(!text.contains("Re-encoded Tx Hex:"));
    }
}
