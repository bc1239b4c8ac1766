//! Line-oriented player input.
//!
//! The game never reads stdin directly; it asks a [`Console`] for the next
//! line. `None` means the input is exhausted and callers must back out
//! gracefully.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Read one line without its trailing newline.
    fn read_line(&mut self) -> Option<String>;

    /// Show a line of game output.
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    /// Print `text` without a newline, flush, then read a line.
    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{}", text);
        let _ = io::stdout().flush();
        self.read_line()
    }

    /// Keep prompting until the answer parses as a number.
    ///
    /// Returns `None` at end of input.
    fn prompt_number(&mut self, text: &str) -> Option<i64> {
        loop {
            let line = self.prompt(text)?;
            match line.trim().parse::<i64>() {
                Ok(n) => return Some(n),
                Err(_) => self.say("Please enter a valid number!"),
            }
        }
    }

    /// Ask a yes/no question. Accepts `y`, `yes`, `s`, `sim`.
    fn confirm(&mut self, text: &str) -> bool {
        self.prompt(text)
            .map(|answer| is_yes(&answer))
            .unwrap_or(false)
    }
}

/// Whether an answer means "yes" (English or Portuguese).
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

/// Console reading from the process stdin.
pub struct StdinConsole {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl StdinConsole {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }
}

impl Default for StdinConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdinConsole {
    fn read_line(&mut self) -> Option<String> {
        match self.lines.next() {
            Some(Ok(line)) => Some(line.trim_end_matches('\r').to_string()),
            _ => None,
        }
    }
}

/// Console replaying queued lines.
///
/// Nothing is printed: output and prompts are kept in a transcript that
/// tests can inspect.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Split a block of text into lines.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Whether any recorded output contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        self.transcript.push(text.to_string());
        self.read_line()
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }

    fn say(&mut self, text: &str) {
        (**self).say(text)
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        (**self).prompt(text)
    }
}
