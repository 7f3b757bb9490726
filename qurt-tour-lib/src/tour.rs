//! The lesson cursor and everything the learner can do with it.
use strum_macros::Display;
use tracing::debug;

use crate::bridge::ExecutionBridge;
use crate::catalog::LessonCatalog;
use crate::lesson::Lesson;
use crate::utils::bug;

/// What a controller operation changed, and therefore what needs to be redrawn.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The active lesson changed, every surface is stale.
    Lesson,
    /// Only the code buffer changed.
    Code,
    /// Only the output panel changed.
    Output,
    /// The learner asked to go past the last lesson. Nothing changed.
    Completed,
    Unchanged,
}

/// The label and action of the "next" affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NextAction {
    #[strum(serialize = "Алға →")]
    Advance,
    #[strum(serialize = "Аяқтау ✓")]
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub previous_enabled: bool,
    pub next: NextAction,
    /// 1-based
    pub position: usize,
    pub total: usize,
}

/// Everything the presentation layer shows for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub code: &'a str,
    pub output: &'a str,
    pub navigation: Navigation,
}

/// A snapshot of where the learner is. Read it through the controller's
/// accessors, compare snapshots to see whether an operation changed anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState {
    current_index: usize,
    edited_code: String,
    last_output: String,
}

impl TourState {
    fn at(index: usize, lesson: &Lesson) -> Self {
        Self {
            current_index: index,
            edited_code: lesson.code().to_string(),
            last_output: String::new(),
        }
    }
}

/// Drives one learner through a catalog.
///
/// The controller is the only thing that writes the [`TourState`]. The cursor
/// is clamped to the catalog, navigating past either end is not an error.
pub struct TourController<'a> {
    catalog: &'a LessonCatalog,
    bridge: Box<dyn ExecutionBridge + 'a>,
    state: TourState,
}

impl<'a> TourController<'a> {
    pub fn new(catalog: &'a LessonCatalog, bridge: impl ExecutionBridge + 'a) -> Self {
        let state = TourState::at(0, lesson_at(catalog, 0));
        Self {
            catalog,
            bridge: Box::new(bridge),
            state,
        }
    }

    pub fn state(&self) -> &TourState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn edited_code(&self) -> &str {
        &self.state.edited_code
    }

    pub fn last_output(&self) -> &str {
        &self.state.last_output
    }

    pub fn current_lesson(&self) -> &'a Lesson {
        lesson_at(self.catalog, self.state.current_index)
    }

    fn is_last(&self) -> bool {
        self.state.current_index == self.catalog.last_index()
    }

    pub fn go_to_next(&mut self) -> Change {
        if self.is_last() {
            debug!(index = self.state.current_index, "tour completed");
            return Change::Completed;
        }
        self.go_to(self.state.current_index + 1)
    }

    pub fn go_to_previous(&mut self) -> Change {
        if self.state.current_index == 0 {
            return Change::Unchanged;
        }
        self.go_to(self.state.current_index - 1)
    }

    fn go_to(&mut self, index: usize) -> Change {
        self.state = TourState::at(index, lesson_at(self.catalog, index));
        debug!(index, "moved to lesson");
        Change::Lesson
    }

    /// Replaces the code buffer, no questions asked.
    pub fn edit_code(&mut self, text: impl Into<String>) -> Change {
        self.state.edited_code = text.into();
        Change::Code
    }

    /// Hands the code buffer to the bridge and keeps whatever text comes back.
    pub fn run(&mut self) -> Change {
        debug!(
            index = self.state.current_index,
            bytes = self.state.edited_code.len(),
            "running lesson code"
        );
        self.state.last_output = self.bridge.execute(&self.state.edited_code);
        Change::Output
    }

    pub fn render(&self) -> Frame<'_> {
        let lesson = self.current_lesson();
        Frame {
            title: lesson.title(),
            content: lesson.content(),
            code: &self.state.edited_code,
            output: &self.state.last_output,
            navigation: Navigation {
                previous_enabled: self.state.current_index > 0,
                next: if self.is_last() {
                    NextAction::Finish
                } else {
                    NextAction::Advance
                },
                position: self.state.current_index + 1,
                total: self.catalog.size(),
            },
        }
    }
}

fn lesson_at(catalog: &LessonCatalog, index: usize) -> &Lesson {
    match catalog.get(index) {
        Ok(lesson) => lesson,
        Err(e) => bug!("the lesson cursor left the catalog: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog_of(codes: &[&str]) -> LessonCatalog {
        LessonCatalog::new(
            codes
                .iter()
                .enumerate()
                .map(|(i, code)| Lesson::new(format!("lesson {i}"), format!("content {i}"), *code))
                .collect(),
        )
        .unwrap()
    }

    fn echo(src: &str) -> String {
        format!("ran: {src}")
    }

    #[test]
    fn test_starts_at_first_lesson() {
        let catalog = catalog_of(&["A", "B", "C"]);
        let tour = TourController::new(&catalog, echo);
        assert_eq!(tour.current_index(), 0);
        assert_eq!(tour.edited_code(), "A");
        assert_eq!(tour.last_output(), "");
    }

    #[test]
    fn test_next_then_completion() {
        let catalog = catalog_of(&["A", "B"]);
        let mut tour = TourController::new(&catalog, echo);

        assert_eq!(tour.go_to_next(), Change::Lesson);
        assert_eq!(tour.current_index(), 1);
        assert_eq!(tour.edited_code(), "B");

        assert_eq!(tour.go_to_next(), Change::Completed);
        assert_eq!(tour.current_index(), 1);
        assert_eq!(tour.edited_code(), "B");
    }

    #[test]
    fn test_single_lesson_catalog() {
        let catalog = catalog_of(&["A"]);
        let mut tour = TourController::new(&catalog, echo);
        let before = tour.state().clone();

        assert_eq!(tour.go_to_previous(), Change::Unchanged);
        assert_eq!(tour.state(), &before);
        assert_eq!(tour.go_to_next(), Change::Completed);
        assert_eq!(tour.state(), &before);

        let nav = tour.render().navigation;
        assert!(!nav.previous_enabled);
        assert_eq!(nav.next, NextAction::Finish);
        assert_eq!((nav.position, nav.total), (1, 1));
    }

    #[test]
    fn test_previous_at_start_is_a_noop() {
        let catalog = catalog_of(&["A", "B"]);
        let mut tour = TourController::new(&catalog, echo);
        let _ = tour.edit_code("changed");
        let _ = tour.run();
        let before = tour.state().clone();
        for _ in 0..5 {
            assert_eq!(tour.go_to_previous(), Change::Unchanged);
            assert_eq!(tour.state(), &before);
        }
    }

    #[test]
    fn test_completion_is_signalled_on_every_call() {
        let catalog = catalog_of(&["A", "B"]);
        let mut tour = TourController::new(&catalog, echo);
        let _ = tour.go_to_next();
        let _ = tour.edit_code("mine");
        let _ = tour.run();
        let before = tour.state().clone();
        let completions = (0..3)
            .map(|_| tour.go_to_next())
            .filter(|c| *c == Change::Completed)
            .count();
        assert_eq!(completions, 3);
        assert_eq!(tour.state(), &before);
    }

    #[test]
    fn test_navigation_resets_code_and_output() {
        let catalog = catalog_of(&["A", "B", "C"]);
        let mut tour = TourController::new(&catalog, echo);
        let _ = tour.go_to_next();
        let _ = tour.edit_code("edited");
        let _ = tour.run();
        assert_eq!(tour.last_output(), "ran: edited");

        assert_eq!(tour.go_to_previous(), Change::Lesson);
        assert_eq!(tour.edited_code(), "A");
        assert_eq!(tour.last_output(), "");

        let _ = tour.edit_code("again");
        let _ = tour.run();
        assert_eq!(tour.go_to_next(), Change::Lesson);
        assert_eq!(tour.edited_code(), "B");
        assert_eq!(tour.last_output(), "");
    }

    #[test]
    fn test_edit_code_is_verbatim() {
        let catalog = catalog_of(&["A"]);
        let mut tour = TourController::new(&catalog, echo);
        for text in ["", "бүтін х = 5", "жаз(\"«»\\n\");\r\n\t}", "  \n\n"] {
            assert_eq!(tour.edit_code(text), Change::Code);
            assert_eq!(tour.edited_code(), text);
            assert_eq!(tour.render().code, text);
        }
    }

    #[test]
    fn test_run_shows_bridge_text() {
        let catalog = catalog_of(&["A"]);
        let stub = |src: &str| {
            if src == "бүтін х = 5" {
                "5".to_string()
            } else {
                "қате: белгісіз".to_string()
            }
        };
        let mut tour = TourController::new(&catalog, stub);
        let _ = tour.edit_code("бүтін х = 5");
        assert_eq!(tour.run(), Change::Output);
        assert_eq!(tour.last_output(), "5");

        let _ = tour.edit_code("broken(");
        let _ = tour.run();
        assert_eq!(tour.last_output(), "қате: белгісіз");
        assert_eq!(tour.render().output, "қате: белгісіз");
    }

    #[test]
    fn test_run_submits_buffer_verbatim() {
        let catalog = catalog_of(&["A"]);
        let seen = Rc::new(RefCell::new(vec![]));
        let recorder = {
            let seen = seen.clone();
            move |src: &str| {
                seen.borrow_mut().push(src.to_string());
                String::new()
            }
        };
        let mut tour = TourController::new(&catalog, recorder);
        let _ = tour.run();
        let _ = tour.edit_code("  жаз(1);\n");
        let _ = tour.run();
        assert_eq!(*seen.borrow(), vec!["A".to_string(), "  жаз(1);\n".to_string()]);
    }

    #[test]
    fn test_there_and_back_again() {
        let catalog = LessonCatalog::builtin().unwrap();
        let mut tour = TourController::new(&catalog, echo);
        let initial = tour.state().clone();
        for _ in 0..catalog.last_index() {
            assert_eq!(tour.go_to_next(), Change::Lesson);
        }
        assert_eq!(tour.current_index(), catalog.last_index());
        for _ in 0..catalog.last_index() {
            assert_eq!(tour.go_to_previous(), Change::Lesson);
        }
        assert_eq!(tour.state(), &initial);
        assert_eq!(tour.edited_code(), catalog.get(0).unwrap().code());
    }

    #[test]
    fn test_render() {
        let catalog = catalog_of(&["A", "B", "C"]);
        let mut tour = TourController::new(&catalog, echo);

        let frame = tour.render();
        assert_eq!(frame.title, "lesson 0");
        assert_eq!(frame.content, "content 0");
        assert_eq!(
            frame.navigation,
            Navigation {
                previous_enabled: false,
                next: NextAction::Advance,
                position: 1,
                total: 3,
            }
        );

        let _ = tour.go_to_next();
        let nav = tour.render().navigation;
        assert!(nav.previous_enabled);
        assert_eq!(nav.next, NextAction::Advance);
        assert_eq!(nav.position, 2);

        let _ = tour.go_to_next();
        let frame = tour.render();
        assert_eq!(frame.content, "content 2");
        assert_eq!(frame.navigation.next, NextAction::Finish);
        assert_eq!(frame.navigation.position, 3);
    }

    #[test]
    fn test_next_action_labels() {
        assert_eq!(NextAction::Advance.to_string(), "Алға →");
        assert_eq!(NextAction::Finish.to_string(), "Аяқтау ✓");
    }

    #[derive(Debug, Clone, Copy)]
    enum Nav {
        Next,
        Previous,
    }

    fn nav_strategy() -> impl Strategy<Value = Nav> {
        prop_oneof![Just(Nav::Next), Just(Nav::Previous)]
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(
            size in 1usize..12,
            moves in prop::collection::vec(nav_strategy(), 0..64),
        ) {
            let codes: Vec<String> = (0..size).map(|i| format!("code {i}")).collect();
            let refs: Vec<&str> = codes.iter().map(String::as_str).collect();
            let catalog = catalog_of(&refs);
            let mut tour = TourController::new(&catalog, echo);

            for m in moves {
                let before = tour.current_index();
                let change = match m {
                    Nav::Next => tour.go_to_next(),
                    Nav::Previous => tour.go_to_previous(),
                };
                prop_assert!(tour.current_index() < size);
                match change {
                    Change::Lesson => {
                        prop_assert_ne!(tour.current_index(), before);
                        prop_assert_eq!(tour.edited_code(), codes[tour.current_index()].as_str());
                        prop_assert_eq!(tour.last_output(), "");
                    }
                    Change::Completed => {
                        prop_assert_eq!(before, size - 1);
                        prop_assert_eq!(tour.current_index(), before);
                    }
                    Change::Unchanged => {
                        prop_assert_eq!(before, 0);
                        prop_assert_eq!(tour.current_index(), 0);
                    }
                    other => prop_assert!(false, "navigation reported {:?}", other),
                }
            }
        }
    }
}
