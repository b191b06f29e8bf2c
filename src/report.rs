//! Operator-facing progress reporting.
//!
//! The installer reports through an injected [`Reporter`] instead of a
//! process-wide logger, so embedding callers and tests can capture every
//! message a run produces.

use colored::Colorize;
use std::sync::Mutex;

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    /// Verbose-only detail; hidden unless the reporter opts in.
    Detail,
}

/// Sink for operator-visible messages emitted during an install run.
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }

    fn detail(&self, message: &str) {
        self.report(Level::Detail, message);
    }
}

/// Renders events to the terminal.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Info => println!("  {} {}", "✔".green(), message),
            Level::Warn => println!("  {} {}", "!".yellow(), message),
            Level::Error => eprintln!("  {} {}", "✘".red(), message),
            Level::Detail => {
                if self.verbose {
                    println!("    {}", message.dimmed());
                }
            }
        }
    }
}

/// Collects events in memory. Used by tests and embedding callers that want
/// to inspect run output instead of printing it.
#[derive(Default)]
pub struct CaptureReporter {
    events: Mutex<Vec<(Level, String)>>,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().unwrap().clone()
    }

    /// True when any captured event at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Reporter for CaptureReporter {
    fn report(&self, level: Level, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}
