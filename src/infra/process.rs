//! External process execution
//!
//! Every tool this crate drives (`make`, `xz`, `tar`, `gpg`, `tee`, `cp`,
//! `rm`, `mkinitcpio`, `grub-mkconfig`) goes through a [`CommandRunner`], so
//! the phases can be exercised against a recording runner in tests.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{LinuxBuildError, Result};

/// Description of an external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    /// Program name, resolved through `PATH`
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory, inherited when `None`
    pub cwd: Option<PathBuf>,
    /// File to feed on stdin
    pub stdin: Option<PathBuf>,
    /// File to write stdout into
    pub stdout: Option<PathBuf>,
}

impl ExternalCommand {
    /// Create a command for a program with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            stdin: None,
            stdout: None,
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in the given directory
    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Redirect stdin from a file
    #[must_use]
    pub fn stdin_file(mut self, path: &Path) -> Self {
        self.stdin = Some(path.to_path_buf());
        self
    }

    /// Redirect stdout into a file, truncating it
    #[must_use]
    pub fn stdout_file(mut self, path: &Path) -> Self {
        self.stdout = Some(path.to_path_buf());
        self
    }

    /// Program and arguments joined by spaces
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn failed(&self, status: ExitStatus) -> LinuxBuildError {
        LinuxBuildError::CommandFailed {
            command: self.command_line(),
            code: status.code(),
        }
    }

    fn spawn_error(&self, error: &std::io::Error) -> LinuxBuildError {
        LinuxBuildError::Io {
            path: PathBuf::from(&self.program),
            error: format!("failed to run '{}': {error}", self.command_line()),
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())?;
        if let Some(stdin) = &self.stdin {
            write!(f, " < {}", stdin.display())?;
        }
        if let Some(stdout) = &self.stdout {
            write!(f, " > {}", stdout.display())?;
        }
        Ok(())
    }
}

/// Executes external commands
pub trait CommandRunner {
    /// Run a command to completion, failing on a non-zero exit
    fn run(&self, command: &ExternalCommand) -> Result<()>;

    /// Run a command and return its trimmed stdout
    fn output(&self, command: &ExternalCommand) -> Result<String>;

    /// Run `producer` with stdout and stderr merged into `consumer`'s stdin
    ///
    /// Both processes run to completion. A producer failure is reported
    /// before a consumer failure.
    fn pipe(&self, producer: &ExternalCommand, consumer: &ExternalCommand) -> Result<()>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    /// Print each command line before running it
    echo: bool,
}

impl SystemRunner {
    /// Create a runner that echoes commands
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Create a runner with echoing switched on or off
    pub fn with_echo(echo: bool) -> Self {
        Self { echo }
    }

    fn build(command: &ExternalCommand) -> Result<Command> {
        let program = which::which(&command.program).map_err(|_| LinuxBuildError::ToolNotFound {
            tool: command.program.clone(),
        })?;

        let mut cmd = Command::new(program);
        cmd.args(&command.args);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }
        if let Some(path) = &command.stdin {
            let file = File::open(path).map_err(|e| LinuxBuildError::io(path, &e))?;
            cmd.stdin(file);
        }
        if let Some(path) = &command.stdout {
            let file = File::create(path).map_err(|e| LinuxBuildError::io(path, &e))?;
            cmd.stdout(file);
        }
        Ok(cmd)
    }

    fn echo(&self, line: &str) {
        if self.echo {
            println!("{line}");
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ExternalCommand) -> Result<()> {
        let mut cmd = Self::build(command)?;
        self.echo(&command.to_string());
        tracing::debug!(cwd = ?command.cwd, "Running {}", command);

        let status = cmd.status().map_err(|e| command.spawn_error(&e))?;
        if !status.success() {
            return Err(command.failed(status));
        }
        Ok(())
    }

    fn output(&self, command: &ExternalCommand) -> Result<String> {
        let mut cmd = Self::build(command)?;
        cmd.stderr(Stdio::inherit());
        tracing::debug!(cwd = ?command.cwd, "Capturing output of {}", command);

        let output = cmd.output().map_err(|e| command.spawn_error(&e))?;
        if !output.status.success() {
            return Err(command.failed(output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn pipe(&self, producer: &ExternalCommand, consumer: &ExternalCommand) -> Result<()> {
        let mut producer_cmd = Self::build(producer)?;
        let mut consumer_cmd = Self::build(consumer)?;

        let (reader, writer) =
            std::io::pipe().map_err(|e| LinuxBuildError::io(&producer.program, &e))?;
        let writer_err = writer
            .try_clone()
            .map_err(|e| LinuxBuildError::io(&producer.program, &e))?;
        producer_cmd.stdout(writer).stderr(writer_err);
        consumer_cmd.stdin(reader);

        self.echo(&format!("{producer} 2>&1 | {consumer}"));
        tracing::debug!(cwd = ?producer.cwd, "Piping {} into {}", producer, consumer);

        let mut consumer_child = consumer_cmd
            .spawn()
            .map_err(|e| consumer.spawn_error(&e))?;
        // The write ends live in the Command until it is dropped; the consumer
        // only sees EOF once every copy outside the producer is closed.
        drop(consumer_cmd);
        let spawned = producer_cmd.spawn();
        drop(producer_cmd);

        let mut producer_child = match spawned {
            Ok(child) => child,
            Err(e) => {
                let _ = consumer_child.wait();
                return Err(producer.spawn_error(&e));
            }
        };

        let producer_status = producer_child
            .wait()
            .map_err(|e| producer.spawn_error(&e))?;
        let consumer_status = consumer_child
            .wait()
            .map_err(|e| consumer.spawn_error(&e))?;

        if !producer_status.success() {
            return Err(producer.failed(producer_status));
        }
        if !consumer_status.success() {
            return Err(consumer.failed(consumer_status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line_joins_program_and_args() {
        let cmd = ExternalCommand::new("make").args(["-j", "3"]);
        assert_eq!(cmd.command_line(), "make -j 3");
    }

    #[test]
    fn test_display_shows_redirections() {
        let cmd = ExternalCommand::new("xz")
            .arg("-cd")
            .stdin_file(Path::new("linux-6.1.tar.xz"))
            .stdout_file(Path::new("linux-6.1.tar"));
        assert_eq!(cmd.to_string(), "xz -cd < linux-6.1.tar.xz > linux-6.1.tar");
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let runner = SystemRunner::with_echo(false);
        let cmd = ExternalCommand::new("definitely-not-a-real-tool-4711");
        match runner.run(&cmd) {
            Err(LinuxBuildError::ToolNotFound { tool }) => {
                assert_eq!(tool, "definitely-not-a-real-tool-4711");
            }
            other => panic!("Expected ToolNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_run_reports_exit_code() {
        let runner = SystemRunner::with_echo(false);
        let cmd = ExternalCommand::new("sh").args(["-c", "exit 3"]);
        match runner.run(&cmd) {
            Err(LinuxBuildError::CommandFailed { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("Expected CommandFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_output_is_trimmed() {
        let runner = SystemRunner::with_echo(false);
        let cmd = ExternalCommand::new("echo").arg("6.6.1-custom");
        assert_eq!(runner.output(&cmd).unwrap(), "6.6.1-custom");
    }

    #[test]
    fn test_run_with_redirections_and_cwd() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("in.txt"), "kernel\n").unwrap();

        let runner = SystemRunner::with_echo(false);
        let cmd = ExternalCommand::new("cat")
            .current_dir(temp.path())
            .stdin_file(&temp.path().join("in.txt"))
            .stdout_file(&temp.path().join("out.txt"));
        runner.run(&cmd).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("out.txt")).unwrap(),
            "kernel\n"
        );
    }

    #[test]
    fn test_pipe_merges_stdout_and_stderr() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("make.log");

        let runner = SystemRunner::with_echo(false);
        let producer = ExternalCommand::new("sh").args(["-c", "echo out; echo err >&2"]);
        let consumer = ExternalCommand::new("tee").path_arg(&log);
        runner.pipe(&producer, &consumer).unwrap();

        let logged = std::fs::read_to_string(&log).unwrap();
        assert!(logged.contains("out"));
        assert!(logged.contains("err"));
    }

    #[test]
    fn test_pipe_reports_producer_failure() {
        let temp = TempDir::new().unwrap();
        let runner = SystemRunner::with_echo(false);
        let producer = ExternalCommand::new("sh").args(["-c", "echo building; exit 2"]);
        let consumer = ExternalCommand::new("tee").path_arg(&temp.path().join("make.log"));

        match runner.pipe(&producer, &consumer) {
            Err(LinuxBuildError::CommandFailed { command, code }) => {
                assert!(command.starts_with("sh"));
                assert_eq!(code, Some(2));
            }
            other => panic!("Expected CommandFailed, got: {other:?}"),
        }
    }

    #[test]
    fn test_pipe_reports_consumer_failure() {
        let temp = TempDir::new().unwrap();
        let runner = SystemRunner::with_echo(false);
        let producer = ExternalCommand::new("sh").args(["-c", "echo building"]);
        let consumer = ExternalCommand::new("sh")
            .args(["-c", "cat > /dev/null; exit 5"])
            .current_dir(temp.path());

        match runner.pipe(&producer, &consumer) {
            Err(LinuxBuildError::CommandFailed { code, .. }) => assert_eq!(code, Some(5)),
            other => panic!("Expected CommandFailed, got: {other:?}"),
        }
    }
}
