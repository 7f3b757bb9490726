//! Full-screen frontend: lesson on the left, code and output on the right, a status
//! line and the prompt at the bottom.
use std::io::{Stdout, Write};

use anyhow::Result;
use crossterm::{self as ct, terminal};
use qurt_tour_lib::tour::{Change, TourController};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::plain::{PREVIOUS_LABEL, RUN_LABEL};
use crate::session::Frontend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    w: u16,
    h: u16,
    x: u16,
    y: u16,
}

#[derive(Debug, PartialEq, Eq)]
struct Rects {
    content: Rect,
    code: Rect,
    output: Rect,
    status: Rect,
    input: Rect,
    notice: Rect,
}

impl Rect {
    pub fn render(
        &self,
        stdout: &mut Stdout,
        lines: impl IntoIterator<Item = String>,
    ) -> Result<()> {
        let mut counter = 0;
        for (i, line) in lines.into_iter().take(self.h.into()).enumerate() {
            ct::queue!(
                stdout,
                ct::cursor::MoveTo(self.x, self.y + i as u16),
                ct::style::Print(fit(&line, self.w.into()))
            )?;
            counter += 1;
        }

        while counter < self.h {
            ct::queue!(
                stdout,
                ct::cursor::MoveTo(self.x, self.y + counter),
                ct::style::Print(" ".repeat(self.w.into()))
            )?;
            counter += 1;
        }
        Ok(())
    }
}

const TAB_WIDTH: usize = 4;

/// Makes `line` safe to print inside a panel. Tabs are expanded, `\r` is dropped,
/// other control characters (escape sequences included) show up as `�`.
fn printable(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let n = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(n));
                col += n;
            }
            '\r' => {}
            c if c.is_control() => {
                out.push('\u{FFFD}');
                col += 1;
            }
            c => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

/// Cuts or pads `line` to exactly `width` characters.
fn fit(line: &str, width: usize) -> String {
    let mut fitted: String = printable(line).chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat(' ').take(width - len));
    fitted
}

/// Breaks `text` into lines of at most `width` characters, at spaces where possible.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];
    for raw in text.split('\n') {
        let raw = printable(raw);
        let mut current = String::new();
        let mut current_len = 0;
        for word in raw.split(' ') {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            let mut chars = word.chars().peekable();
            while chars.peek().is_some() {
                if current_len == width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if let Some(c) = chars.next() {
                    current.push(c);
                    current_len += 1;
                }
            }
        }
        lines.push(current);
    }
    lines
}

fn titled(title: &str, body: impl IntoIterator<Item = String>) -> impl Iterator<Item = String> {
    std::iter::once(format!("── {} ──", title)).chain(body)
}

fn compute_rects((term_w, term_h): (u16, u16)) -> Rects {
    let width12 = term_w / 2;
    let panels_h = term_h.saturating_sub(4);
    let code_h = panels_h / 2;

    Rects {
        content: Rect {
            x: 0,
            y: 0,
            w: width12.saturating_sub(1),
            h: panels_h,
        },
        code: Rect {
            x: width12,
            y: 0,
            w: term_w - width12,
            h: code_h,
        },
        output: Rect {
            x: width12,
            y: code_h,
            w: term_w - width12,
            h: panels_h - code_h,
        },
        status: Rect {
            x: 0,
            y: panels_h,
            w: term_w,
            h: 1,
        },
        input: Rect {
            x: 0,
            y: panels_h + 1,
            w: term_w,
            h: 1,
        },
        notice: Rect {
            x: 0,
            y: panels_h + 2,
            w: term_w,
            h: term_h.saturating_sub(panels_h + 2),
        },
    }
}

pub struct ScreenFrontend {
    stdout: Stdout,
    rl: DefaultEditor,
    /// The content panel shows help text instead of the lesson.
    content_covered: bool,
}

impl ScreenFrontend {
    pub fn new(stdout: Stdout) -> Result<Self> {
        Ok(Self {
            stdout,
            rl: DefaultEditor::new()?,
            content_covered: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        ct::execute!(self.stdout, terminal::EnterAlternateScreen)?;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        ct::execute!(self.stdout, terminal::LeaveAlternateScreen)?;
        Ok(())
    }

    fn rects(&self) -> Result<Rects> {
        Ok(compute_rects(terminal::size()?))
    }

    fn render_status(&mut self, rect: &Rect, tour: &TourController) -> Result<()> {
        let frame = tour.render();
        let nav = &frame.navigation;
        let previous = if nav.previous_enabled {
            format!("p: {}", PREVIOUS_LABEL)
        } else {
            " ".repeat(PREVIOUS_LABEL.chars().count() + 3)
        };
        let line = format!(
            "[{}/{}] {}   {}   r: {}   n: {}   h: help",
            nav.position, nav.total, frame.title, previous, RUN_LABEL, nav.next
        );
        ct::queue!(self.stdout, ct::style::SetAttribute(ct::style::Attribute::Reverse))?;
        rect.render(&mut self.stdout, [line])?;
        ct::queue!(self.stdout, ct::style::SetAttribute(ct::style::Attribute::Reset))?;
        Ok(())
    }

    fn render_content(&mut self, rect: &Rect, tour: &TourController) -> Result<()> {
        let frame = tour.render();
        let body = wrap(frame.content, rect.w.into());
        rect.render(&mut self.stdout, titled(frame.title, body))
    }

    fn render_code(&mut self, rect: &Rect, tour: &TourController) -> Result<()> {
        let lines = tour
            .edited_code()
            .split('\n')
            .enumerate()
            .map(|(i, line)| format!("{:>3}| {}", i + 1, line));
        rect.render(&mut self.stdout, titled("код", lines))
    }

    fn render_output(&mut self, rect: &Rect, tour: &TourController) -> Result<()> {
        let lines = wrap(tour.last_output(), rect.w.into());
        rect.render(&mut self.stdout, titled("шығыс", lines))
    }
}

impl Frontend for ScreenFrontend {
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        let rects = self.rects()?;
        rects.input.render(&mut self.stdout, [String::new()])?;
        ct::queue!(self.stdout, ct::cursor::MoveTo(rects.input.x, rects.input.y))?;
        self.stdout.flush()?;

        use ReadlineError::*;
        let line = match self.rl.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.as_str())?;
                }
                Some(line)
            }
            Err(Interrupted | Eof) => None,
            Err(other) => return Err(other.into()),
        };
        rects.notice.render(&mut self.stdout, std::iter::empty())?;
        self.stdout.flush()?;
        Ok(line)
    }

    fn show(&mut self, tour: &TourController, change: Change) -> Result<()> {
        let rects = self.rects()?;
        let change = if std::mem::take(&mut self.content_covered) && change != Change::Unchanged {
            Change::Lesson
        } else {
            change
        };
        match change {
            Change::Lesson => {
                ct::queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                self.render_content(&rects.content, tour)?;
                self.render_code(&rects.code, tour)?;
                self.render_output(&rects.output, tour)?;
                self.render_status(&rects.status, tour)?;
            }
            Change::Code => self.render_code(&rects.code, tour)?,
            Change::Output => self.render_output(&rects.output, tour)?,
            Change::Completed | Change::Unchanged => {}
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<()> {
        let rects = self.rects()?;
        if text.lines().count() > rects.notice.h as usize {
            let lines = wrap(text, rects.content.w.into());
            rects.content.render(&mut self.stdout, titled("help", lines))?;
            self.content_covered = true;
        } else {
            rects.notice.render(&mut self.stdout, wrap(text, rects.notice.w.into()))?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn suspend<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.leave()?;
        let res = f();
        self.enter()?;
        // whatever ran in between may have scribbled over the screen
        self.content_covered = true;
        res
    }
}
