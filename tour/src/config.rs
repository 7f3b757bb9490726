use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qurt_tour_lib::bridge::DEFAULT_SOURCE_FILE;
use serde::Deserialize;

pub const DEFAULT_INTERPRETER: &str = "qurt";
pub const DEFAULT_EDITOR: &str = "vi";

/// Settings as they come from one source. Unset keys fall through to the next source.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialConfig {
    pub interpreter: Option<String>,
    pub interpreter_args: Option<Vec<String>>,
    pub source_file: Option<String>,
    pub editor: Option<String>,
    pub lessons: Option<PathBuf>,
}

impl PartialConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interpreter: String,
    pub interpreter_args: Vec<String>,
    pub source_file: String,
    pub editor: String,
    pub lessons: Option<PathBuf>,
}

impl Settings {
    /// `cli` wins over `file`, which wins over the defaults.
    pub fn resolve(cli: PartialConfig, file: PartialConfig) -> Self {
        Self {
            interpreter: cli
                .interpreter
                .or(file.interpreter)
                .unwrap_or_else(|| DEFAULT_INTERPRETER.into()),
            interpreter_args: cli
                .interpreter_args
                .or(file.interpreter_args)
                .unwrap_or_default(),
            source_file: cli
                .source_file
                .or(file.source_file)
                .unwrap_or_else(|| DEFAULT_SOURCE_FILE.into()),
            editor: cli
                .editor
                .or(file.editor)
                .unwrap_or_else(|| DEFAULT_EDITOR.into()),
            lessons: cli.lessons.or(file.lessons),
        }
    }
}
