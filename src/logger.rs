//! # Console Logger
//!
//! User-facing, level-tagged line output. A `Logger` is a plain value handed
//! down the call chain; there is no process-wide logger state.
//!
//! ## Levels
//!
//! | level   | style        | stream |
//! |---------|--------------|--------|
//! | default | plain        | stdout |
//! | info    | cyan         | stdout |
//! | warning | yellow       | stdout |
//! | success | green        | stdout |
//! | verbose | bright black | stdout, only with `--verbose` |
//! | fatal   | red          | stderr |
//!
//! ## Respecting User Preferences
//!
//! Colors follow the `--color=never|always|auto` flag. In auto mode they are
//! disabled when `NO_COLOR` is set, `CLICOLOR=0`, `TERM=dumb`, or stdout is
//! not a TTY (unless `CLICOLOR_FORCE=1`).
//!
//! Developer diagnostics are a separate concern and go through the `log`
//! facade; verbose lines are mirrored there at debug level.

use std::env;
use std::sync::{Arc, Mutex};

use console::style;

/// Severity of a logged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Default,
    Info,
    Warning,
    Success,
    Verbose,
    Fatal,
}

/// Lines recorded by a capturing logger.
pub type CapturedLines = Arc<Mutex<Vec<(Level, String)>>>;

#[derive(Debug, Clone)]
enum Sink {
    Console,
    Capture(CapturedLines),
}

/// Level-tagged console output.
#[derive(Debug, Clone)]
pub struct Logger {
    use_color: bool,
    verbose: bool,
    sink: Sink,
}

impl Logger {
    /// Create a console logger from the `--color` flag value and the
    /// `--verbose` switch.
    pub fn new(color_flag: &str, verbose: bool) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(),
        };

        Self {
            use_color,
            verbose,
            sink: Sink::Console,
        }
    }

    /// Create a logger that records every line instead of printing it.
    ///
    /// Verbose lines are always recorded.
    pub fn capture() -> (Self, CapturedLines) {
        let lines: CapturedLines = Arc::new(Mutex::new(Vec::new()));
        let logger = Self {
            use_color: false,
            verbose: true,
            sink: Sink::Capture(Arc::clone(&lines)),
        };
        (logger, lines)
    }

    pub fn default_ln(&self, msg: impl AsRef<str>) {
        self.emit(Level::Default, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.emit(Level::Info, msg.as_ref());
    }

    pub fn warning(&self, msg: impl AsRef<str>) {
        self.emit(Level::Warning, msg.as_ref());
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.emit(Level::Success, msg.as_ref());
    }

    pub fn verbose(&self, msg: impl AsRef<str>) {
        log::debug!("{}", msg.as_ref());
        self.emit(Level::Verbose, msg.as_ref());
    }

    pub fn fatal(&self, msg: impl AsRef<str>) {
        self.emit(Level::Fatal, msg.as_ref());
    }

    fn emit(&self, level: Level, msg: &str) {
        if level == Level::Verbose && !self.verbose {
            return;
        }
        match &self.sink {
            Sink::Console => {
                let line = self.paint(level, msg);
                if level == Level::Fatal {
                    eprintln!("{line}");
                } else {
                    println!("{line}");
                }
            }
            Sink::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push((level, msg.to_string()));
                }
            }
        }
    }

    fn paint(&self, level: Level, msg: &str) -> String {
        if !self.use_color {
            return msg.to_string();
        }
        let styled = style(msg).force_styling(true);
        match level {
            Level::Default => styled.to_string(),
            Level::Info => styled.cyan().to_string(),
            Level::Warning => styled.yellow().to_string(),
            Level::Success => styled.green().to_string(),
            Level::Verbose => styled.black().bright().to_string(),
            Level::Fatal => styled.red().to_string(),
        }
    }
}

/// Detect whether color output is supported based on environment.
fn detect_color_support() -> bool {
    // The presence of NO_COLOR (even if empty) disables colors
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }

    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }

    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }

    console::Term::stdout().features().colors_supported()
}
