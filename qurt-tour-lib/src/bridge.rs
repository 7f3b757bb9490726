//! The seam between the tour and whatever actually runs Qurt programs.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

/// The file name the Qurt runtime expects its entry module under.
pub const DEFAULT_SOURCE_FILE: &str = "негізгі.құрт";

/// Runs a program and hands back the text to show.
///
/// There is no error channel: compile errors, runtime errors and a broken runtime
/// all come back as text, and the tour shows that text as is.
pub trait ExecutionBridge {
    fn execute(&self, source: &str) -> String;
}

impl<F> ExecutionBridge for F
where
    F: Fn(&str) -> String,
{
    fn execute(&self, source: &str) -> String {
        self(source)
    }
}

/// Runs an external interpreter on a temporary copy of the source.
///
/// The interpreter is invoked as `<program> <args...> <dir>/<source_file>`, and the
/// result is its stdout followed by its stderr.
#[derive(Debug, Clone)]
pub struct ProcessBridge {
    program: OsString,
    args: Vec<OsString>,
    source_file: String,
}

impl ProcessBridge {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            source_file: DEFAULT_SOURCE_FILE.into(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file = name.into();
        self
    }

    fn run(&self, source: &str) -> std::io::Result<String> {
        let dir = tempfile::tempdir()?;
        let path: PathBuf = dir.path().join(&self.source_file);
        fs::write(&path, source)?;

        debug!(program = ?self.program, path = %path.display(), "running interpreter");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .output()?;
        debug!(status = %output.status, "interpreter finished");

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

impl ExecutionBridge for ProcessBridge {
    fn execute(&self, source: &str) -> String {
        match self.run(source) {
            Ok(text) => text,
            Err(e) => {
                warn!(program = ?self.program, error = %e, "could not run interpreter");
                format!("{}: {}", self.program.to_string_lossy(), e)
            }
        }
    }
}
