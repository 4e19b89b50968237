use crate::error::Result;
use crate::git::runner::{command_line, CommandOutput, CommandRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock command runner for testing without spawning processes
///
/// Every invocation is recorded as a command line. Commands without a
/// scripted response succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds silently
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Script the output for an exact command line, e.g. `git add src/manifest.json`
    pub fn respond(mut self, command: impl Into<String>, output: CommandOutput) -> Self {
        self.responses.insert(command.into(), output);
        self
    }

    /// Script the listing returned by `git status --short`
    pub fn with_status_output(self, stdout: impl Into<String>) -> Self {
        self.respond("git status --short", CommandOutput::ok(stdout))
    }

    /// Command lines issued so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded commands other than the status query
    pub fn mutating_commands(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c != "git status --short")
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = command_line(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }
        Ok(self
            .responses
            .get(&line)
            .cloned()
            .unwrap_or_else(|| CommandOutput::ok("")))
    }
}
