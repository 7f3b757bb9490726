use anyhow::{anyhow, Context, Result};
use glob::glob;
use std::result::Result as StdResult;

use std::fs::{self, File};
use std::process::{Command, Stdio};

const QTOUR: &str = "../target/release/qtour";

/// Every `tests/*.tour` script is fed to `qtour --plain` with `cat` as the
/// interpreter, so running a program prints its source. The transcript has to
/// match `tests/<name>.out`.
fn main() -> Result<()> {
    compile_qtour().context("compiling qtour")?;

    let scripts: Vec<_> = glob("tests/*.tour")?.collect::<StdResult<_, _>>()?;
    let mut failures = 0;
    for script in &scripts {
        let stem = script
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("bad script name: {}", script.display()))?;
        let expected_path = format!("tests/{}.out", stem);
        let expected_output = fs::read_to_string(&expected_path)
            .context(format!("loading expected output: {}", &expected_path))?;
        let output_bytes = Command::new(QTOUR)
            .args(["--plain", "--interpreter", "cat", "--lessons", "tests/tour.lessons"])
            .stdin(Stdio::from(File::open(script)?))
            .output()
            .context(format!("running script {}", script.display()))?
            .stdout;
        let output = String::from_utf8(output_bytes)?;
        if output == expected_output {
            println!("{}: passed", script.display());
        } else {
            failures += 1;
            println!("{}: failed\nactual output:\n{}", script.display(), output);
        }
    }
    if failures > 0 {
        return Err(anyhow!("{} of {} scripts failed", failures, scripts.len()));
    }
    Ok(())
}

fn compile_qtour() -> Result<()> {
    let st = Command::new("cargo")
        .args(["build", "--release", "-p", "qurt-tour"])
        .current_dir("..")
        .status()?;
    if st.success() {
        Ok(())
    } else {
        Err(anyhow!("compiling qtour failed"))
    }
}
