//! Styled status output for stderr
//!
//! Everything here degrades to plain text when colors are off, so the same
//! call sites serve terminals, pipes and `NO_COLOR` users.

use std::env;
use std::fmt;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Color mode for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Color when stderr is a capable terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Resolve the effective mode
    ///
    /// An explicit `--color` wins. Otherwise `NO_COLOR` (any value) or
    /// `TERM=dumb` turn colors off, and everything else is `Auto`.
    #[must_use]
    pub fn resolve(cli_mode: Option<Self>) -> Self {
        if let Some(mode) = cli_mode {
            return mode;
        }
        let no_color = env::var_os("NO_COLOR").is_some();
        let dumb_term = env::var("TERM").is_ok_and(|term| term == "dumb");
        if no_color || dumb_term {
            Self::Never
        } else {
            Self::Auto
        }
    }

    /// Whether stderr output should carry ANSI styling
    #[must_use]
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Auto => supports_color::on_cached(supports_color::Stream::Stderr).is_some(),
            Self::Never => false,
        }
    }

    /// Branch names in cyan
    #[must_use]
    pub fn colorize_branch(self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    /// Work item references such as `#12345` in bold yellow
    #[must_use]
    pub fn colorize_work_item(self, text: &str) -> String {
        self.paint(text, |t| t.yellow().bold().to_string())
    }

    /// Web URLs underlined in blue
    #[must_use]
    pub fn colorize_url(self, text: &str) -> String {
        self.paint(text, |t| t.blue().underline().to_string())
    }

    fn paint(self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.should_colorize() {
            style(text)
        } else {
            text.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Info,
    Warn,
    Error,
}

impl Status {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Warn => "⚠",
            Self::Error => "✗",
        }
    }
}

/// A status line: symbol, then message
pub struct StatusLine<D> {
    status: Status,
    mode: ColorMode,
    message: D,
}

impl<D: fmt::Display> fmt::Display for StatusLine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.status.symbol();
        if !self.mode.should_colorize() {
            return write!(f, "{symbol} {}", self.message);
        }
        match self.status {
            Status::Success => write!(f, "{} {}", symbol.bright_green().bold(), self.message),
            Status::Info => write!(f, "{} {}", symbol.bright_cyan(), self.message),
            Status::Warn => write!(f, "{} {}", symbol.bright_yellow(), self.message),
            Status::Error => write!(f, "{} {}", symbol.bright_red().bold(), self.message),
        }
    }
}

const fn status_line<D>(status: Status, mode: ColorMode, message: D) -> StatusLine<D> {
    StatusLine {
        status,
        mode,
        message,
    }
}

pub const fn success<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Success, mode, message)
}

/// Progress and neutral notices
pub const fn info<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Info, mode, message)
}

/// Something the user should act on that does not fail the command
pub const fn warn<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Warn, mode, message)
}

pub const fn error<D: fmt::Display>(mode: ColorMode, message: D) -> StatusLine<D> {
    status_line(Status::Error, mode, message)
}

/// Secondary text such as paths and hints
pub struct Dimmed<D> {
    mode: ColorMode,
    text: D,
}

impl<D: fmt::Display> fmt::Display for Dimmed<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode.should_colorize() {
            write!(f, "{}", self.text.to_string().dimmed())
        } else {
            write!(f, "{}", self.text)
        }
    }
}

pub const fn dim<D: fmt::Display>(mode: ColorMode, text: D) -> Dimmed<D> {
    Dimmed { mode, text }
}

/// Run `f` while a spinner with `message` ticks on stderr
///
/// Nothing is drawn unless colors are enabled.
pub fn with_spinner<T>(mode: ColorMode, message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = mode.should_colorize().then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = f();

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

/// One line of a `├─`/`└─` detail list under a status line
pub struct TreeItem<D> {
    mode: ColorMode,
    message: D,
    is_last: bool,
    indent_level: usize,
}

impl<D: fmt::Display> fmt::Display for TreeItem<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.indent_level);
        let connector = if self.is_last { "└─" } else { "├─" };
        if self.mode.should_colorize() {
            write!(f, "{indent}{} {}", connector.dimmed(), self.message)
        } else {
            write!(f, "{indent}{connector} {}", self.message)
        }
    }
}

pub const fn tree_item<D: fmt::Display>(
    mode: ColorMode,
    message: D,
    is_last: bool,
    indent_level: usize,
) -> TreeItem<D> {
    TreeItem {
        mode,
        message,
        is_last,
        indent_level,
    }
}

/// Print `items` as a detail list, closing with `└─`
pub fn print_tree(mode: ColorMode, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        eprintln!("{}", tree_item(mode, item, i + 1 == items.len(), 1));
    }
}
