//! The tour engine behind `qtour`, the interactive Qurt tutorial.
//!
//! What you need to do to drive a tour is the following:
//! 1. get a catalog, either the built-in curriculum via [`catalog::LessonCatalog::builtin`]
//!    or your own lesson file via [`catalog::LessonCatalog::parse`]
//! 1. pick an execution bridge. Anything implementing [`bridge::ExecutionBridge`] works,
//!    including plain closures. [`bridge::ProcessBridge`] runs an external interpreter.
//! 1. create a [`tour::TourController`] from both, it starts at the first lesson
//! 1. feed user input into `go_to_next`, `go_to_previous`, `edit_code` and `run`, and
//!    redraw whatever the returned [`tour::Change`] names, using
//!    [`tour::TourController::render`]:
//!
//!    ```
//!    use qurt_tour_lib::catalog::LessonCatalog;
//!    use qurt_tour_lib::tour::{Change, TourController};
//!
//!    let catalog = LessonCatalog::builtin().unwrap();
//!    let mut tour = TourController::new(&catalog, |src: &str| src.len().to_string());
//!    assert_eq!(tour.go_to_next(), Change::Lesson);
//!    let frame = tour.render();
//!    assert_eq!(frame.navigation.position, 2);
//!    ```
//!
pub mod bridge;
pub mod catalog;
pub mod error;
pub mod lesson;
pub mod parser;
pub mod tour;
pub mod utils;

pub use error::{Error, Result};
