use thiserror::Error;

use crate::parser::Rule;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("lesson index {index} is out of range, the catalog holds {len} lessons")]
    OutOfRange { index: usize, len: usize },
    #[error("a lesson catalog needs at least one lesson")]
    EmptyCatalog,
    #[error("invalid lesson file:\n{0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
}
