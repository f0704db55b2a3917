//! Test doubles for external commands and prompts

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::error::{LinuxBuildError, Result};
use crate::infra::process::{CommandRunner, ExternalCommand};
use crate::infra::prompt::Confirm;

/// Records commands instead of running them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<ExternalCommand>>,
    outputs: HashMap<String, String>,
    failures: HashMap<String, i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `output()` for a command line
    pub fn with_output(mut self, command_line: &str, stdout: &str) -> Self {
        self.outputs
            .insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Make a command line fail with an exit code
    pub fn with_failure(mut self, command_line: &str, code: i32) -> Self {
        self.failures.insert(command_line.to_string(), code);
        self
    }

    /// Every command seen, in order
    pub fn calls(&self) -> Vec<ExternalCommand> {
        self.calls.borrow().clone()
    }

    /// Command lines of every command seen, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(ExternalCommand::command_line)
            .collect()
    }

    fn record(&self, command: &ExternalCommand) -> Result<()> {
        self.calls.borrow_mut().push(command.clone());
        match self.failures.get(&command.command_line()) {
            Some(code) => Err(LinuxBuildError::CommandFailed {
                command: command.command_line(),
                code: Some(*code),
            }),
            None => Ok(()),
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        self.record(command)
    }

    fn output(&self, command: &ExternalCommand) -> Result<String> {
        self.record(command)?;
        Ok(self
            .outputs
            .get(&command.command_line())
            .cloned()
            .unwrap_or_default())
    }

    fn pipe(&self, producer: &ExternalCommand, consumer: &ExternalCommand) -> Result<()> {
        let produced = self.record(producer);
        let consumed = self.record(consumer);
        produced.and(consumed)
    }
}

/// Answers prompts from a script and remembers the questions
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
    }
}
