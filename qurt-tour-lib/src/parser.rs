//! Parses lesson files, see `lessons.pest` for the format.
use pest::Parser;
use pest_derive::Parser;

use crate::lesson::Lesson;
use crate::utils::{self, bug};

#[derive(Parser)]
#[grammar = "lessons.pest"]
pub struct LessonParser;

pub type PestError = pest::error::Error<Rule>;
pub type ParseResult<T> = Result<T, Box<PestError>>;

type Pair<'a> = pest::iterators::Pair<'a, Rule>;

pub fn parse(src: &str) -> ParseResult<Vec<Lesson>> {
    let mut pairs = LessonParser::parse(Rule::file, src).map_err(Box::new)?;
    let Some(file) = pairs.next() else {
        bug!("the file rule produced no pair");
    };
    Ok(file
        .into_inner()
        .filter(|p| p.as_rule() == Rule::lesson)
        .map(parse_lesson)
        .collect())
}

fn parse_lesson(pair: Pair) -> Lesson {
    let mut title = "";
    let mut content = String::new();
    let mut code = String::new();
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::title => title = child.as_str().trim(),
            Rule::content => content = body_text(child, true),
            Rule::code => code = body_text(child, false),
            _ => unreachable!(),
        }
    }
    Lesson::new(title, content, code)
}

fn body_text(pair: Pair, skip_leading_blanks: bool) -> String {
    let lines: Vec<&str> = pair
        .into_inner()
        .map(|line| line.as_str())
        .skip_while(|line| skip_leading_blanks && line.trim().is_empty())
        .collect();
    utils::trim_trailing_blank_lines(&lines.join("\n")).to_string()
}
