//! Line-oriented frontend for pipes and scripts.
use std::io::{BufRead, Write};

use anyhow::Result;
use qurt_tour_lib::tour::{Change, Frame, TourController};

use crate::session::Frontend;

pub const PREVIOUS_LABEL: &str = "← Артқа";
pub const RUN_LABEL: &str = "Іске қосу";

pub struct PlainFrontend<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> PlainFrontend<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let nav = &frame.navigation;
        writeln!(self.out, "=== {}/{} {}", nav.position, nav.total, frame.title)?;
        writeln!(self.out, "{}", frame.content)?;
        self.write_code(frame.code)?;
        self.write_output(frame.output)?;
        let previous = if nav.previous_enabled {
            format!("[{}]", PREVIOUS_LABEL)
        } else {
            format!("({})", PREVIOUS_LABEL)
        };
        writeln!(self.out, "--- {} [{}] [{}]", previous, RUN_LABEL, nav.next)?;
        Ok(())
    }

    fn write_code(&mut self, code: &str) -> Result<()> {
        writeln!(self.out, "--- code")?;
        writeln!(self.out, "{}", code)?;
        Ok(())
    }

    fn write_output(&mut self, output: &str) -> Result<()> {
        writeln!(self.out, "--- output")?;
        write!(self.out, "{}", output)?;
        if !output.is_empty() && !output.ends_with('\n') {
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for PlainFrontend<R, W> {
    fn read_line(&mut self, _prompt: &str, _initial: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    fn show(&mut self, tour: &TourController, change: Change) -> Result<()> {
        match change {
            Change::Lesson => self.write_frame(&tour.render())?,
            Change::Code => self.write_code(tour.edited_code())?,
            Change::Output => self.write_output(tour.last_output())?,
            Change::Completed | Change::Unchanged => {}
        }
        self.out.flush()?;
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    fn suspend<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        f()
    }
}
