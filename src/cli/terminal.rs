//! Terminal capability detection and styling

use owo_colors::{OwoColorize, Style, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

fn paint(text: &str, style: Style) -> String {
    if supports_color() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Matches and completed actions (green)
    fn success(&self) -> String;
    /// Cautions (amber)
    fn warning(&self) -> String;
    /// Seats and dates (bold light blue)
    fn accent(&self) -> String;
    /// Secondary detail
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint(self, Style::new().fg::<css::Green>())
    }

    fn warning(&self) -> String {
        paint(self, Style::new().fg::<css::Orange>())
    }

    fn accent(&self) -> String {
        paint(self, Style::new().fg::<css::LightBlue>().bold())
    }

    fn dim(&self) -> String {
        paint(self, Style::new().dimmed())
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn accent(&self) -> String {
        self.as_str().accent()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
