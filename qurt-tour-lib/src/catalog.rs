use crate::error::{Error, Result};
use crate::lesson::Lesson;
use crate::parser;

const BUILTIN_LESSONS: &str = include_str!("builtin.lessons");

/// The ordered, fixed list of lessons a tour walks through.
///
/// A catalog always holds at least one lesson and never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    pub fn new(lessons: Vec<Lesson>) -> Result<Self> {
        if lessons.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        Ok(Self { lessons })
    }

    /// Parses a catalog from the lesson file format.
    pub fn parse(src: &str) -> Result<Self> {
        Self::new(parser::parse(src)?)
    }

    /// The Qurt curriculum that ships with the tour.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_LESSONS)
    }

    pub fn get(&self, index: usize) -> Result<&Lesson> {
        self.lessons.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.lessons.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.lessons.len()
    }

    pub fn last_index(&self) -> usize {
        self.lessons.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }
}
