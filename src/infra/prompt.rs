//! Interactive confirmation
//!
//! Irreversible steps ask before running. The question goes through the
//! [`Confirm`] trait so callers can substitute `--yes` or a scripted answer.

use std::io::{self, BufRead, Write};

use crate::error::{LinuxBuildError, Result};

/// Asks the user a yes/no question
pub trait Confirm {
    /// Returns whether the user agreed
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Ask and turn a decline into [`LinuxBuildError::UserAborted`]
pub fn require(confirm: &dyn Confirm, prompt: &str) -> Result<()> {
    if confirm.confirm(prompt)? {
        Ok(())
    } else {
        Err(LinuxBuildError::UserAborted)
    }
}

/// Interpret one line of input to a `[Y/n]` question
///
/// Returns `None` when the line should be asked again.
pub fn parse_answer(input: &str, default: bool) -> Option<bool> {
    let answer = input.trim().to_lowercase();
    if answer.is_empty() {
        Some(default)
    } else if answer.starts_with('y') {
        Some(true)
    } else if answer.starts_with('n') {
        Some(false)
    } else {
        None
    }
}

/// Prompts on stdout and reads answers from stdin, defaulting to yes
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl StdinConfirm {
    /// Ask on `reader`/`writer`; end of input declines
    pub fn ask<R: BufRead, W: Write>(prompt: &str, reader: &mut R, writer: &mut W) -> Result<bool> {
        loop {
            write!(writer, "{prompt} [Y/n] ").map_err(|e| LinuxBuildError::io("stdout", &e))?;
            writer.flush().map_err(|e| LinuxBuildError::io("stdout", &e))?;

            let mut line = String::new();
            let read = reader
                .read_line(&mut line)
                .map_err(|e| LinuxBuildError::io("stdin", &e))?;
            if read == 0 {
                tracing::debug!("End of input at prompt, treating as no");
                return Ok(false);
            }
            if let Some(answer) = parse_answer(&line, true) {
                return Ok(answer);
            }
        }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut writer = io::stdout();
        Self::ask(prompt, &mut reader, &mut writer)
    }
}

/// Answers yes without asking (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        tracing::info!("{prompt} [assumed yes]");
        Ok(true)
    }
}
