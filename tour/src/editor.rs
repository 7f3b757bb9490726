use std::fs;
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

/// Lets the learner edit `code` in an external editor and returns the result.
///
/// `editor` may carry arguments, e.g. `code --wait`.
pub fn edit(editor: &str, code: &str, file_name: &str) -> Result<String> {
    let mut words = editor.split_whitespace();
    let program = words.next().ok_or_else(|| anyhow!("no editor configured"))?;

    let dir = tempfile::tempdir().context("creating a scratch directory")?;
    let path = dir.path().join(file_name);
    fs::write(&path, code)?;

    debug!(editor, path = %path.display(), "opening editor");
    let status = Command::new(program)
        .args(words)
        .arg(&path)
        .status()
        .with_context(|| format!("starting editor `{}`", program))?;
    if !status.success() {
        bail!("editor `{}` exited with {}", program, status);
    }
    Ok(fs::read_to_string(&path)?)
}
