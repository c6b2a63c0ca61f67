//! Invocation of the external icon packaging tool.
//!
//! The tool is opaque: it receives the full-resolution source and a target
//! directory, and only its exit status decides whether the fallback runs.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

/// Captured result of one packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackagerOutput {
    /// Exit code, or `None` if the tool could not be started or was killed
    /// by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl PackagerOutput {
    /// A run that exited with `code`.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A run that never produced an exit status.
    pub fn not_run(reason: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: reason.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Text worth showing when the run failed: stderr, else stdout.
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Produces a platform icon set from a single source image.
pub trait Packager {
    /// Packages `source` into `output_dir`, blocking until done.
    fn package(&self, source: &Path, output_dir: &Path) -> PackagerOutput;
}

/// Runs a command-line packaging tool as a subprocess.
///
/// The command line is `<program> <args...> <source> --output <output_dir>`.
/// Both paths are made absolute first, since the tool runs in `working_dir`.
/// There is no timeout; a tool that never exits stalls the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPackager {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl CommandPackager {
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.into(),
        }
    }

    /// `cargo tauri icon`, run from the Tauri project directory.
    pub fn tauri(working_dir: impl Into<PathBuf>) -> Self {
        Self::new("cargo", ["tauri", "icon"], working_dir)
    }

    fn command(&self, source: &Path, output_dir: &Path) -> io::Result<Command> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(std::path::absolute(source)?)
            .arg("--output")
            .arg(std::path::absolute(output_dir)?)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null());
        Ok(command)
    }
}

impl Packager for CommandPackager {
    fn package(&self, source: &Path, output_dir: &Path) -> PackagerOutput {
        let mut command = match self.command(source, output_dir) {
            Ok(command) => command,
            Err(e) => return PackagerOutput::not_run(format!("failed to resolve paths: {}", e)),
        };
        debug!("running {:?}", command);

        // `output()` captures both streams; nothing reaches the terminal.
        match command.output() {
            Ok(output) => PackagerOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => PackagerOutput::not_run(format!("failed to run {}: {}", self.program, e)),
        }
    }
}
