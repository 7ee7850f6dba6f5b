//! Output file naming that never overwrites an existing file.

use crate::errors::HarnessError;
use serde::de::IgnoredAny;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Base name used when the user does not supply one.
pub const DEFAULT_OUTPUT_NAME: &str = "output";

/// Returns `.json` if `content` parses as JSON, `.txt` otherwise.
///
/// An all-digit hex string is itself valid JSON (a number) and gets `.json`.
pub fn output_extension(content: &str) -> &'static str {
    if serde_json::from_str::<IgnoredAny>(content).is_ok() {
        ".json"
    } else {
        ".txt"
    }
}

/// Picks a path under `dir` for `base` that does not exist yet.
///
/// The default base probes `output`, `output1`, `output2`, ... while a custom
/// base that is taken probes `base_1`, `base_2`, ...
pub fn resolve_output_path(dir: &Path, base: &str, content: &str) -> PathBuf {
    let extension = output_extension(content);
    let candidate = |name: &str| dir.join(format!("{}{}", name, extension));

    let direct = candidate(base);
    if !direct.exists() {
        return direct;
    }

    let mut suffix: u64 = 1;
    loop {
        let name = if base == DEFAULT_OUTPUT_NAME {
            format!("{}{}", base, suffix)
        } else {
            format!("{}_{}", base, suffix)
        };
        let path = candidate(&name);
        if !path.exists() {
            tracing::debug!(path = %path.display(), probes = suffix, "resolved output name");
            return path;
        }
        suffix += 1;
    }
}

/// Writes `content` to a fresh file under `dir` named after `base`.
///
/// The file is created exclusively and, on unix, readable by the owner only.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] if the file cannot be created or written.
pub fn write_output(dir: &Path, base: &str, content: &str) -> Result<PathBuf, HarnessError> {
    let path = resolve_output_path(dir, base, content);

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(&path)
        .map_err(|e| HarnessError::io(&path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| HarnessError::io(&path, e))?;
    Ok(path)
}
