//! Output formatting module

pub mod access;
pub mod styles;

use chrono::Local;
use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

use crate::application::ports::{Level, Logger};

/// Output context carrying styling and terminal state.
///
/// Implements the `Logger` port: every line is timestamped and colored by
/// level. Errors go to stderr and are never suppressed.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to show debug lines.
    pub verbose: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, verbose: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
            verbose,
        }
    }

    /// Whether a line at `level` is printed.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Error => true,
            Level::Debug => self.verbose && !self.quiet,
            _ => !self.quiet,
        }
    }

    /// Print an undecorated line. Suppressed when `quiet`.
    pub fn line(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Render `msg` in bold.
    pub fn bold(&self, msg: &str) -> String {
        msg.style(self.styles.bold).to_string()
    }
}

impl Logger for OutputContext {
    fn log(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = format_line(level, &Local::now().format("%H:%M:%S").to_string(), message);
        let style = match level {
            Level::Header => self.styles.header,
            Level::Info => self.styles.info,
            Level::Success => self.styles.success,
            Level::Warn => self.styles.warning,
            Level::Error => self.styles.error,
            Level::Debug => self.styles.debug,
        };
        if level == Level::Error {
            eprintln!("{}", line.style(style));
        } else {
            println!("{}", line.style(style));
        }
    }
}

/// Render one log line without styling.
///
/// Headers are preceded by a blank line and carry no timestamp.
#[must_use]
pub fn format_line(level: Level, timestamp: &str, message: &str) -> String {
    let tag = match level {
        Level::Header => return format!("\n=== {message} ==="),
        Level::Info => "[INFO]   ",
        Level::Success => "[SUCCESS]",
        Level::Warn => "[WARN]   ",
        Level::Error => "[ERROR]  ",
        Level::Debug => "[DEBUG]  ",
    };
    format!("[{timestamp}] {tag} {message}")
}
