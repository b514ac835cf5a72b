//! Console styling helpers
//!
//! Colors go through owo-colors and are written with `anstream`, which strips
//! them when stdout is not a terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Semantic styles for console output
pub trait Stylize: Display + Sized {
    /// Repository being processed
    fn processing(&self) -> String {
        self.cyan().to_string()
    }

    /// Failures
    fn failure(&self) -> String {
        self.red().to_string()
    }

    /// Skips and aborts
    fn warn(&self) -> String {
        self.magenta().to_string()
    }

    /// Completed work
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Headings and key values
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Counts and names inside a sentence
    fn accent(&self) -> String {
        self.cyan().bold().to_string()
    }

    /// Secondary information
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// `→` arrow used in previews
pub fn arrow() -> String {
    "→".muted()
}
