use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use qurt_tour_lib::bridge::ProcessBridge;
use qurt_tour_lib::catalog::LessonCatalog;
use qurt_tour_lib::tour::TourController;

use std::io::{stdin, stdout};
use std::path::PathBuf;

mod commands;
mod config;
mod editor;
mod logging;
mod plain;
mod screen;
mod session;

use config::{PartialConfig, Settings};
use logging::LogTarget;
use session::SessionOptions;

/// An interactive tour of the Qurt programming language
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Interpreter that runs lesson programs. It gets the path of a source file as
    /// its last argument
    #[arg(long, env = "QTOUR_INTERPRETER")]
    interpreter: Option<String>,

    /// Extra argument for the interpreter, may be repeated
    #[arg(long = "interpreter-arg", allow_hyphen_values = true)]
    interpreter_args: Vec<String>,

    /// File name the program is saved under before it is run
    #[arg(long)]
    source_file: Option<String>,

    /// Editor for the `edit` command
    #[arg(long, env = "EDITOR")]
    editor: Option<String>,

    /// Tour a lesson file instead of the built-in curriculum
    #[arg(long)]
    lessons: Option<PathBuf>,

    /// TOML file with defaults for the options above
    #[arg(short, long, env = "QTOUR_CONFIG")]
    config: Option<PathBuf>,

    /// Read commands line by line and print plain text, even on a terminal
    #[arg(long)]
    plain: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            interpreter: self.interpreter.clone(),
            interpreter_args: (!self.interpreter_args.is_empty())
                .then(|| self.interpreter_args.clone()),
            source_file: self.source_file.clone(),
            editor: self.editor.clone(),
            lessons: self.lessons.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let full_screen = !cli.plain && stdin().is_tty() && stdout().is_tty();
    logging::init(LogTarget::choose(cli.log_file.as_deref(), full_screen))?;

    let file_config = match &cli.config {
        Some(path) => PartialConfig::load(path)?,
        None => PartialConfig::default(),
    };
    let settings = Settings::resolve(cli.overrides(), file_config);
    tracing::debug!(?settings, "resolved settings");

    let catalog = match &settings.lessons {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("reading lesson file {}", path.display()))?;
            LessonCatalog::parse(&src)?
        }
        None => LessonCatalog::builtin()?,
    };

    let bridge = ProcessBridge::new(&settings.interpreter)
        .with_args(&settings.interpreter_args)
        .with_source_file(&settings.source_file);
    let mut tour = TourController::new(&catalog, bridge);
    let options = SessionOptions {
        editor: settings.editor,
        source_file: settings.source_file,
    };

    if full_screen {
        let mut frontend = screen::ScreenFrontend::new(stdout())?;
        frontend.enter()?;
        let res = session::run(&mut tour, &mut frontend, &options);
        frontend.leave()?;
        res
    } else {
        let mut frontend = plain::PlainFrontend::new(stdin().lock(), stdout().lock());
        session::run(&mut tour, &mut frontend, &options)
    }
}
