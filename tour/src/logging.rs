//! Logging goes through `tracing`. The filter comes from `RUST_LOG` and defaults to
//! `warn`. The full-screen UI owns the terminal, so it only logs to a file, pass
//! `--log-file` when you want to see anything while it runs.
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Discard,
}

impl<'a> LogTarget<'a> {
    /// A log file always wins. Without one, only the plain frontend may share the
    /// terminal with log lines.
    pub fn choose(log_file: Option<&'a Path>, full_screen: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path),
            None if full_screen => LogTarget::Discard,
            None => LogTarget::Stderr,
        }
    }
}

pub fn init(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::Discard => {
            tracing_subscriber::registry()
                .with(EnvFilter::new("off"))
                .with(fmt::layer().with_writer(std::io::sink))
                .init();
        }
    }
    Ok(())
}
