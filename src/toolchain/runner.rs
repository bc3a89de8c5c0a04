//! External process execution
//!
//! Toolchains describe the command they need as a [`CommandSpec`] and hand it
//! to a [`ProcessRunner`]. Arguments are always passed argv-style, never
//! through a shell, so repository-controlled file names cannot inject
//! commands.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Specification for a command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a command to completion, blocking the caller.
pub trait ProcessRunner: Send + Sync {
    /// Returns `Err` only when the process could not be started.
    fn run(&self, spec: &CommandSpec) -> std::io::Result<ProcessExit>;
}

/// Runs commands on the host. Child output goes to this process's stdout and
/// stderr so build logs land next to our own.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &CommandSpec) -> std::io::Result<ProcessExit> {
        debug!(command = %spec, cwd = ?spec.cwd, "Spawning process");

        let status = spec
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        Ok(ProcessExit {
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let spec = CommandSpec::new("emcc")
            .arg("main.c")
            .args(["-s", "WASM=1"])
            .cwd("/tmp/repo");

        assert_eq!(spec.program, OsString::from("emcc"));
        assert_eq!(spec.args.len(), 3);
        assert_eq!(spec.cwd, Some(PathBuf::from("/tmp/repo")));
    }

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::new("cargo").args(["build", "--release"]);
        assert_eq!(spec.to_string(), "cargo build --release");
    }

    #[test]
    fn test_to_command_keeps_arguments_discrete() {
        let spec = CommandSpec::new("echo").arg("a; rm -rf /");
        let cmd = spec.to_command();
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("a; rm -rf /")]);
    }

    #[test]
    fn test_process_exit() {
        assert!(ProcessExit::success().is_success());
        assert!(!ProcessExit::code(2).is_success());
        assert!(!ProcessExit { code: None }.is_success());
    }

    #[test]
    #[cfg(unix)]
    fn test_system_runner_reports_exit_codes() {
        let runner = SystemProcessRunner;

        let ok = runner.run(&CommandSpec::new("true")).unwrap();
        assert!(ok.is_success());

        let failed = runner.run(&CommandSpec::new("false")).unwrap();
        assert_eq!(failed.code, Some(1));
    }

    #[test]
    fn test_system_runner_missing_program_is_spawn_error() {
        let runner = SystemProcessRunner;
        let result = runner.run(&CommandSpec::new("repo2wasm-definitely-not-a-real-tool"));
        assert!(result.is_err());
    }
}
