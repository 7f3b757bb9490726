//! Translates learner commands into tour operations.
//!
//! The session knows nothing about terminals, everything it shows goes through a
//! [`Frontend`].
use anyhow::Result;
use qurt_tour_lib::tour::{Change, TourController};

use crate::commands::{self, UserCommand};
use crate::editor;

pub const PROMPT: &str = "> ";
pub const CONTINUATION_PROMPT: &str = ". ";
pub const COMPLETION_NOTICE: &str = "Құттықтаймыз! Сіз турды аяқтадыңыз!";

const DOCS_BASE_LINK: &str = "https://qurt.tech/docs";
const DOC_PAGES: &[(&str, &str)] = &[
    ("tour", "Tour"),
    ("syntax", "Syntax"),
    ("functions", "Functions"),
    ("structs", "Structs"),
    ("variables", "Variables"),
];

pub trait Frontend {
    /// Reads one line of input, `None` once the input is exhausted. `initial` is
    /// offered for editing where the frontend supports it.
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;

    /// Redraws whatever `change` made stale.
    fn show(&mut self, tour: &TourController, change: Change) -> Result<()>;

    /// Short messages, help text, errors.
    fn notice(&mut self, text: &str) -> Result<()>;

    /// Hands the terminal to another program for the duration of `f`.
    fn suspend<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T>;
}

pub struct SessionOptions {
    pub editor: String,
    pub source_file: String,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run<F: Frontend>(
    tour: &mut TourController,
    frontend: &mut F,
    options: &SessionOptions,
) -> Result<()> {
    frontend.show(tour, Change::Lesson)?;
    let mut last_cmd: Option<UserCommand> = None;

    loop {
        let Some(line) = frontend.read_line(PROMPT, "")? else {
            return Ok(());
        };
        let mut cmd = match commands::parse_line(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                frontend.notice(&format!("Error: {}", e))?;
                continue;
            }
        };
        if cmd == UserCommand::LastCommand {
            match &last_cmd {
                Some(last) => cmd = last.clone(),
                None => continue,
            }
        }
        if let Flow::Quit = execute(&cmd, tour, frontend, options)? {
            return Ok(());
        }
        last_cmd = Some(cmd);
    }
}

fn execute<F: Frontend>(
    cmd: &UserCommand,
    tour: &mut TourController,
    frontend: &mut F,
    options: &SessionOptions,
) -> Result<Flow> {
    use UserCommand::*;
    match cmd {
        Next => match tour.go_to_next() {
            Change::Completed => frontend.notice(COMPLETION_NOTICE)?,
            change => frontend.show(tour, change)?,
        },
        Previous => {
            let change = tour.go_to_previous();
            frontend.show(tour, change)?;
        }
        Run => {
            let change = tour.run();
            frontend.show(tour, change)?;
        }
        Show => frontend.show(tour, Change::Lesson)?,
        Edit => {
            let code = tour.edited_code().to_string();
            match frontend.suspend(|| editor::edit(&options.editor, &code, &options.source_file)) {
                Ok(edited) => {
                    let change = tour.edit_code(edited);
                    frontend.show(tour, change)?;
                }
                Err(e) => frontend.notice(&format!("Error: {:#}", e))?,
            }
        }
        Line(n, text) => edit_line(*n, text.as_deref(), tour, frontend)?,
        Paste => {
            let mut lines = vec![];
            while let Some(line) = frontend.read_line(CONTINUATION_PROMPT, "")? {
                if line == "." {
                    break;
                }
                lines.push(line);
            }
            let change = tour.edit_code(lines.join("\n"));
            frontend.show(tour, change)?;
        }
        Reset => {
            let change = tour.edit_code(tour.current_lesson().code());
            frontend.show(tour, change)?;
        }
        Docs => frontend.notice(&docs_text())?,
        Help => frontend.notice(&commands::help_text())?,
        LastCommand => {}
        Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn edit_line<F: Frontend>(
    n: usize,
    text: Option<&str>,
    tour: &mut TourController,
    frontend: &mut F,
) -> Result<()> {
    let replacement = match text {
        Some(text) => text.to_string(),
        None => {
            let Some(current) = commands::line_of(tour.edited_code(), n) else {
                return frontend.notice(&format!("Error: there is no line {}", n));
            };
            let prompt = format!("{:>3}| ", n);
            match frontend.read_line(&prompt, current)? {
                Some(line) => line,
                None => return Ok(()),
            }
        }
    };
    match commands::replace_line(tour.edited_code(), n, &replacement) {
        Ok(code) => {
            let change = tour.edit_code(code);
            frontend.show(tour, change)
        }
        Err(e) => frontend.notice(&format!("Error: {}", e)),
    }
}

pub fn docs_text() -> String {
    DOC_PAGES
        .iter()
        .map(|(page, name)| format!("{:<10} {}/{}", name, DOCS_BASE_LINK, page))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qurt_tour_lib::catalog::LessonCatalog;
    use qurt_tour_lib::lesson::Lesson;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Recorder {
        input: VecDeque<String>,
        prompts: Vec<(String, String)>,
        shown: Vec<(Change, usize, String, String)>,
        notices: Vec<String>,
    }

    impl Recorder {
        fn with_input(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Frontend for Recorder {
        fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
            self.prompts.push((prompt.to_string(), initial.to_string()));
            Ok(self.input.pop_front())
        }

        fn show(&mut self, tour: &TourController, change: Change) -> Result<()> {
            self.shown.push((
                change,
                tour.current_index(),
                tour.edited_code().to_string(),
                tour.last_output().to_string(),
            ));
            Ok(())
        }

        fn notice(&mut self, text: &str) -> Result<()> {
            self.notices.push(text.to_string());
            Ok(())
        }

        fn suspend<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
            f()
        }
    }

    fn catalog() -> LessonCatalog {
        LessonCatalog::new(vec![
            Lesson::new("one", "first", "A"),
            Lesson::new("two", "second", "B\nB2"),
        ])
        .unwrap()
    }

    fn options() -> SessionOptions {
        SessionOptions {
            editor: "true".into(),
            source_file: "негізгі.құрт".into(),
        }
    }

    fn play(lines: &[&str]) -> (Recorder, usize, String, String) {
        let catalog = catalog();
        let mut tour = TourController::new(&catalog, |src: &str| format!("out:{src}"));
        let mut frontend = Recorder::with_input(lines);
        run(&mut tour, &mut frontend, &options()).unwrap();
        let (index, code, output) = (
            tour.current_index(),
            tour.edited_code().to_string(),
            tour.last_output().to_string(),
        );
        (frontend, index, code, output)
    }

    #[test]
    fn test_first_frame_is_shown() {
        let (frontend, index, code, _) = play(&[]);
        assert_eq!(frontend.shown, vec![(Change::Lesson, 0, "A".into(), "".into())]);
        assert_eq!((index, code.as_str()), (0, "A"));
    }

    #[test]
    fn test_navigation_and_completion() {
        let (frontend, index, _, _) = play(&["n", "n", "", "p", "p"]);
        assert_eq!(index, 0);
        assert_eq!(
            frontend.notices,
            vec![COMPLETION_NOTICE.to_string(), COMPLETION_NOTICE.to_string()]
        );
        let changes: Vec<Change> = frontend.shown.iter().map(|s| s.0).collect();
        assert_eq!(
            changes,
            vec![Change::Lesson, Change::Lesson, Change::Lesson, Change::Unchanged]
        );
    }

    #[test]
    fn test_run_and_edit() {
        let (frontend, _, code, output) = play(&["line 1 жаз(5);", "r", "line 2 x"]);
        assert_eq!(code, "жаз(5);\nx");
        assert_eq!(output, "out:жаз(5);");
        assert_eq!(frontend.shown[2].0, Change::Output);
    }

    #[test]
    fn test_paste_replaces_buffer() {
        let (_, _, code, _) = play(&["paste", "бір", "  екі", ".", "run"]);
        assert_eq!(code, "бір\n  екі");
    }

    #[test]
    fn test_line_without_text_offers_current_line() {
        let (frontend, _, code, _) = play(&["n", "l 2", "B3"]);
        assert_eq!(code, "B\nB3");
        assert_eq!(frontend.prompts[2], ("  2| ".to_string(), "B2".to_string()));
    }

    #[test]
    fn test_reset_restores_starter_code() {
        let (_, _, code, output) = play(&["line 1 changed", "run", "reset"]);
        assert_eq!(code, "A");
        assert_eq!(output, "out:changed");
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let (frontend, _, code, _) = play(&["jump", "line 9 x", "line 1 y"]);
        assert_eq!(frontend.notices.len(), 2);
        assert!(frontend.notices[0].starts_with("Error: "));
        assert!(frontend.notices[1].starts_with("Error: there is no line 9"));
        assert_eq!(code, "y");
    }

    #[test]
    fn test_quit_stops_reading() {
        let (frontend, index, _, _) = play(&["q", "n"]);
        assert_eq!(index, 0);
        assert_eq!(frontend.input.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_goes_through_editor() {
        let (frontend, _, code, _) = play(&["e"]);
        assert_eq!(code, "A");
        assert_eq!(frontend.shown.last().unwrap().0, Change::Code);
    }

    #[test]
    fn test_docs_lists_pages() {
        let docs = docs_text();
        assert!(docs.contains("https://qurt.tech/docs/tour"));
        assert_eq!(docs.lines().count(), DOC_PAGES.len());
    }
}
