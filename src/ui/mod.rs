//! Centralized UI formatting and color utilities
//!
//! This module provides the colors, formatting patterns and terminal
//! helpers used by the game and its command-line surfaces.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub mod editor;
pub mod menu;

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var("GLORY_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Whether stdin and stdout are both terminals, so rich widgets can be used.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Wait `ms` milliseconds after a bot turn.
///
/// Shows a spinner on a terminal unless quiet mode is on.
pub fn pause(ms: u64) {
    if ms == 0 {
        return;
    }
    let duration = Duration::from_millis(ms);
    if is_quiet() || !atty::is(atty::Stream::Stdout) {
        thread::sleep(duration);
        return;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("next player...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    thread::sleep(duration);
    spinner.finish_and_clear();
}

/// Color scheme for game output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success/victory
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for events and warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors and defeat
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for room ids and map names
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }

    /// Room kind tag, colored by kind.
    pub fn room_tag(tag: &str) -> ColoredString {
        match tag {
            "ENTRADA" => tag.green(),
            "TESOURO" => tag.yellow().bold(),
            "ENIGMA" => tag.magenta(),
            "ALAVANCA" => tag.blue(),
            _ => tag.normal(),
        }
    }
}

/// Common text formatting patterns
pub mod format {
    const BAR_WIDTH: usize = 10;

    /// `[#####-----] 50/100`
    pub fn power_bar(power: i64, max: i64) -> String {
        let max = max.max(1);
        let filled = ((power.clamp(0, max) * BAR_WIDTH as i64) / max) as usize;
        format!(
            "[{}{}] {}/{}",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            power,
            max
        )
    }

    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }

    /// File name without directories, for menus.
    pub fn file_label(path: &std::path::Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}
