//! Runtime configuration, built once from parsed flags.

use crate::cli::Cli;
use std::path::PathBuf;
use std::time::Duration;
use xrpl_roundtrip_canonical::{
    BuiltinRegistry, Codec, CommandCodec, DefinitionsRegistry, FieldTypeRegistry, HarnessError,
    UnavailableCodec, DEFAULT_OUTPUT_NAME,
};

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Menu-driven loop on stdin.
    Interactive,
    /// One inline record.
    Data(String),
    /// One record read from a file.
    File(PathBuf),
    /// Every file in a directory.
    Batch(PathBuf),
}

/// Whether and how converted output is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePolicy {
    /// Ask after every successful conversion.
    Prompt,
    /// Save under the given base name without asking.
    Always(String),
    /// Never save.
    Never,
}

/// External codec program and its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub codec: Option<CodecCommand>,
    pub definitions: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub save: SavePolicy,
    pub pace: Duration,
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            codec: None,
            definitions: None,
            out_dir: PathBuf::from("."),
            save: SavePolicy::Prompt,
            pace: Duration::from_secs(1),
            strict: false,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mode = match (cli.data, cli.file, cli.batch) {
            (Some(data), _, _) => Mode::Data(data),
            (_, Some(file), _) => Mode::File(file),
            (_, _, Some(dir)) => Mode::Batch(dir),
            _ => Mode::Interactive,
        };
        let save = match (cli.output, cli.no_save) {
            (_, true) => SavePolicy::Never,
            (Some(name), false) if !name.trim().is_empty() => SavePolicy::Always(name),
            (Some(_), false) => SavePolicy::Always(DEFAULT_OUTPUT_NAME.to_string()),
            (None, false) => SavePolicy::Prompt,
        };
        let codec = cli.codec.map(|program| CodecCommand {
            program,
            args: cli.codec_args,
        });

        Self {
            mode,
            codec,
            definitions: cli.definitions,
            out_dir: cli.out_dir,
            save,
            pace: Duration::from_millis(cli.pace_ms),
            strict: cli.strict,
        }
    }
}

impl Config {
    /// Codec for the configured program, or one that explains it is missing.
    pub fn build_codec(&self) -> Box<dyn Codec> {
        match &self.codec {
            Some(command) => {
                Box::new(CommandCodec::new(&command.program).with_args(command.args.clone()))
            }
            None => {
                tracing::warn!("no codec program configured; every record will fail to convert");
                Box::new(UnavailableCodec)
            }
        }
    }

    /// Field type registry from the definitions file, or the built-in table.
    pub fn build_registry(&self) -> Result<Box<dyn FieldTypeRegistry>, HarnessError> {
        match &self.definitions {
            Some(path) => Ok(Box::new(DefinitionsRegistry::from_path(path)?)),
            None => Ok(Box::new(BuiltinRegistry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["xrpl-roundtrip"];
        argv.extend_from_slice(args);
        Config::from(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn mode_follows_flags() {
        assert_eq!(config(&["--data", "AB"]).mode, Mode::Data("AB".into()));
        assert_eq!(config(&["--file", "tx.json"]).mode, Mode::File("tx.json".into()));
        assert_eq!(config(&["--batch", "txs"]).mode, Mode::Batch("txs".into()));
        assert_eq!(config(&[]).mode, Mode::Interactive);
    }

    #[test]
    fn save_policy_follows_flags() {
        assert_eq!(config(&[]).save, SavePolicy::Prompt);
        assert_eq!(config(&["--no-save"]).save, SavePolicy::Never);
        assert_eq!(config(&["--output", "tx"]).save, SavePolicy::Always("tx".into()));
        assert_eq!(
            config(&["--output", " "]).save,
            SavePolicy::Always(DEFAULT_OUTPUT_NAME.into())
        );
    }

    #[test]
    fn codec_command_collects_arguments() {
        let cfg = config(&["--codec", "node", "--codec-arg", "codec.js", "--codec-arg", "--quiet"]);
        assert_eq!(
            cfg.codec,
            Some(CodecCommand {
                program: "node".into(),
                args: vec!["codec.js".into(), "--quiet".into()],
            })
        );
    }

    #[test]
    fn pace_is_configurable() {
        assert_eq!(config(&["--pace-ms", "0"]).pace, Duration::ZERO);
    }

    #[test]
    fn registry_defaults_to_builtin() {
        let registry = Config::default().build_registry().unwrap();
        assert!(registry.is_uint64_field("OwnerNode"));
    }

    #[test]
    fn unreadable_definitions_fail_registry_construction() {
        let cfg = Config {
            definitions: Some("/nonexistent/definitions.json".into()),
            ..Config::default()
        };
        assert!(cfg.build_registry().is_err());
    }
}
