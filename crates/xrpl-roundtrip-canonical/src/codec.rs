//! Codec seam: the binary serialization itself lives outside this crate.
//!
//! [`Codec`] is what the verifier consumes. [`CommandCodec`] adapts an external
//! program speaking a tiny stdin/stdout protocol, and [`UnavailableCodec`] stands in
//! when nothing is configured so records fail with a readable message.

use crate::errors::CodecError;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Converts a record between its JSON object form and its hex form.
pub trait Codec {
    /// Serializes a JSON object into a hex string.
    fn encode(&self, record: &Map<String, Value>) -> Result<String, CodecError>;
    /// Deserializes a hex string into a JSON object.
    fn decode(&self, hex: &str) -> Result<Map<String, Value>, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn encode(&self, record: &Map<String, Value>) -> Result<String, CodecError> {
        (**self).encode(record)
    }

    fn decode(&self, hex: &str) -> Result<Map<String, Value>, CodecError> {
        (**self).decode(hex)
    }
}

impl<C: Codec + ?Sized> Codec for Box<C> {
    fn encode(&self, record: &Map<String, Value>) -> Result<String, CodecError> {
        (**self).encode(record)
    }

    fn decode(&self, hex: &str) -> Result<Map<String, Value>, CodecError> {
        (**self).decode(hex)
    }
}

/// Codec backed by an external program.
///
/// The program is invoked as `<program> [args..] encode` with the JSON object on
/// stdin and must print the hex string, or as `<program> [args..] decode` with the
/// hex string on stdin and must print a JSON object. A non-zero exit status is a
/// codec failure; stderr becomes the error message.
#[derive(Debug, Clone)]
pub struct CommandCodec {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandCodec {
    /// Creates a codec that runs `program` with no extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds leading arguments passed before the `encode`/`decode` verb.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn run(&self, verb: &str, input: &[u8]) -> Result<String, String> {
        tracing::debug!(program = %self.program.display(), verb, "invoking codec");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(verb)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", self.program.display(), e))?;

        // Feed stdin from its own thread while stdout and stderr drain here; a codec may
        // start writing before it has consumed all of its input.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(input),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
            });
            (written, output)
        });
        let output = output.map_err(|e| format!("failed to wait for codec: {}", e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !output.status.success() {
            return Err(if stderr.is_empty() {
                format!("codec exited with {}", output.status)
            } else {
                stderr.to_string()
            });
        }
        if let Err(e) = written {
            return Err(if stderr.is_empty() {
                format!("failed to write to codec: {}", e)
            } else {
                stderr.to_string()
            });
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|_| "codec produced non-UTF-8 output".to_string())
    }
}

impl Codec for CommandCodec {
    fn encode(&self, record: &Map<String, Value>) -> Result<String, CodecError> {
        let payload = serde_json::to_vec(record).map_err(|e| CodecError::Encode(e.to_string()))?;
        let hex = self.run("encode", &payload).map_err(CodecError::Encode)?;
        if hex.is_empty() {
            return Err(CodecError::Encode("codec produced no output".to_string()));
        }
        Ok(hex)
    }

    fn decode(&self, hex: &str) -> Result<Map<String, Value>, CodecError> {
        let stdout = self.run("decode", hex.as_bytes()).map_err(CodecError::Decode)?;
        match serde_json::from_str::<Value>(&stdout) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(CodecError::Decode(
                "codec output is not a JSON object".to_string(),
            )),
            Err(e) => Err(CodecError::Decode(format!("codec output is not JSON: {}", e))),
        }
    }
}

/// Placeholder used when no codec program is configured.
#[derive(Debug, Clone, Default)]
pub struct UnavailableCodec;

const UNAVAILABLE_HINT: &str =
    "no codec configured; pass --codec <PROGRAM> or set XRPL_ROUNDTRIP_CODEC";

impl Codec for UnavailableCodec {
    fn encode(&self, _record: &Map<String, Value>) -> Result<String, CodecError> {
        Err(CodecError::Unavailable(UNAVAILABLE_HINT.to_string()))
    }

    fn decode(&self, _hex: &str) -> Result<Map<String, Value>, CodecError> {
        Err(CodecError::Unavailable(UNAVAILABLE_HINT.to_string()))
    }
}
