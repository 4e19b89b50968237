//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_bumped_version, display_current_version, display_dry_run, display_error,
    display_status, display_success,
};

/// The only answer that lets a release continue over uncommitted changes
pub const AFFIRMATIVE: &str = "y";

/// Asks the operator a question and returns the raw answer
pub trait Prompt: Send + Sync {
    fn ask(&self, question: &str) -> Result<String>;
}

/// Prompts on stdout and reads one line from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> Result<String> {
        print!("{}", question);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(strip_line_ending(&input).to_string())
    }
}

/// Prompt with canned answers, for tests and non-interactive runs
///
/// Answers are handed out in order; once exhausted every question gets an
/// empty answer.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<Vec<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut answers: Vec<String> = answers.into_iter().map(Into::into).collect();
        answers.reverse();
        ScriptedPrompt {
            answers: Mutex::new(answers),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn questions(&self) -> Vec<String> {
        self.asked.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str) -> Result<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop())
            .unwrap_or_default();
        Ok(answer)
    }
}

/// Asks for confirmation to continue with a dirty working tree.
///
/// Only the exact answer [AFFIRMATIVE] confirms; "Y", "yes" and anything
/// else decline.
pub fn confirm_uncommitted_changes<P: Prompt + ?Sized>(prompt: &P) -> Result<bool> {
    let answer = prompt.ask("Uncommitted changes detected. Continue (y/n)? ")?;
    Ok(answer == AFFIRMATIVE)
}

fn strip_line_ending(input: &str) -> &str {
    input.strip_suffix('\n').map_or(input, |s| s.strip_suffix('\r').unwrap_or(s))
}
