//! Terminal styling
//!
//! Output goes through `anstream`, which strips the escapes when stdout is
//! not a terminal.

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Styling helpers for CLI output
pub trait Stylize {
    /// Bold text
    fn emphasis(&self) -> String;
    /// Dimmed text
    fn muted(&self) -> String;
    /// Cyan text
    fn accent(&self) -> String;
    /// Yellow text
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.style(Style::new().bold()).to_string()
    }

    fn muted(&self) -> String {
        self.style(Style::new().dimmed()).to_string()
    }

    fn accent(&self) -> String {
        self.style(Style::new().cyan()).to_string()
    }

    fn warn(&self) -> String {
        self.style(Style::new().yellow()).to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".style(Style::new().green().bold()).to_string()
}

/// Red cross
pub fn cross() -> String {
    "✗".style(Style::new().red().bold()).to_string()
}
