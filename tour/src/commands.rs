use anyhow::{anyhow, bail, Result};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum UserCommand {
    Next,
    Previous,
    Run,
    Show,
    Edit,
    /// 1-based line number, and the replacement text if it was given inline
    Line(usize, Option<String>),
    Paste,
    Reset,
    Docs,
    Help,
    LastCommand,
    Quit,
}

pub fn parse_line(line: &str) -> Result<UserCommand> {
    use UserCommand::*;
    let trimmed = line.trim();
    let Some(word) = trimmed.split_whitespace().next() else {
        return Ok(LastCommand);
    };

    match word {
        "n" | "next" => no_args(trimmed, Next),
        "p" | "prev" | "previous" => no_args(trimmed, Previous),
        "r" | "run" => no_args(trimmed, Run),
        "s" | "show" => no_args(trimmed, Show),
        "e" | "edit" => no_args(trimmed, Edit),
        "paste" => no_args(trimmed, Paste),
        "reset" => no_args(trimmed, Reset),
        "docs" => no_args(trimmed, Docs),
        "h" | "help" => no_args(trimmed, Help),
        "q" | "quit" | "exit" => no_args(trimmed, Quit),
        "l" | "line" => parse_line_cmd(line.trim_start()[word.len()..].trim_start()),
        _ => Err(anyhow!("Invalid command, try `help`")),
    }
}

fn no_args(trimmed: &str, cmd: UserCommand) -> Result<UserCommand> {
    if trimmed.split_whitespace().count() > 1 {
        bail!("`{}` takes no arguments", trimmed.split_whitespace().next().unwrap_or(""))
    }
    Ok(cmd)
}

/// `rest` is everything after the command word. The replacement text keeps its
/// inner whitespace, only the single space or tab after the number is dropped.
fn parse_line_cmd(rest: &str) -> Result<UserCommand> {
    let (num, text) = match rest.split_once(char::is_whitespace) {
        Some((num, text)) => (num, Some(text.to_string())),
        None => (rest.trim_end(), None),
    };
    if num.is_empty() {
        bail!("line needs a line number");
    }
    let n: usize = num
        .parse()
        .map_err(|_| anyhow!("`{}` is not a line number", num))?;
    if n == 0 {
        bail!("line numbers start at 1");
    }
    Ok(UserCommand::Line(n, text))
}

/// Replaces line `n` (1-based) of `code`. `n` may be one past the last line, which
/// appends a line.
pub fn replace_line(code: &str, n: usize, text: &str) -> Result<String> {
    let mut lines: Vec<&str> = code.split('\n').collect();
    if n == 0 || n > lines.len() + 1 {
        bail!("there is no line {}, the code has {} lines", n, lines.len());
    }
    if n == lines.len() + 1 {
        lines.push(text);
    } else {
        lines[n - 1] = text;
    }
    Ok(lines.join("\n"))
}

/// Line `n` (1-based) of `code`, or an empty line one past the end.
pub fn line_of(code: &str, n: usize) -> Option<&str> {
    let count = code.split('\n').count();
    if n == count + 1 {
        return Some("");
    }
    code.split('\n').nth(n.checked_sub(1)?)
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- n, next           - go to the next lesson, or finish the tour on the last one
- p, prev           - go back one lesson
- r, run            - run the code in the editor
- s, show           - redraw the lesson
- e, edit           - open the code in $EDITOR
- l, line N [TEXT]  - replace line N of the code with TEXT. Without TEXT the line is
                      loaded into the prompt for editing. N may be one past the last line.
- paste             - replace the whole code with the lines that follow, end with a lone `.`
- reset             - restore the lesson's starter code
- docs              - list the Qurt documentation pages
- h, help           - show this help
- q, quit           - leave the tour

An empty line repeats the previous command.
"#;
    text.trim().to_string()
}
