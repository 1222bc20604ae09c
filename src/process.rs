// src/process.rs

//! Subprocess execution with streamed logging
//!
//! Every external tool (yum, rpm, apt-get, reposync, ...) runs through
//! [`run`] or [`run_get_stdout`]. While a child runs, its stderr lines are
//! logged at WARN and stdout lines at DEBUG. Each pipe is drained by its own
//! scoped thread so a chatty child cannot block on a full pipe.

use crate::error::{Error, Result};
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info, warn};

/// A command line to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Full argv, program first
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    fn check_status(&self, code: Option<i32>) -> Result<()> {
        match code {
            Some(0) => Ok(()),
            // Killed by a signal reports no code
            code => Err(Error::NonZeroExit {
                command: self.to_string(),
                code: code.unwrap_or(-1),
            }),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

fn spawn_error(cmd: &CommandLine, e: std::io::Error) -> Error {
    Error::Io(std::io::Error::new(
        e.kind(),
        format!("failed to run {}: {}", cmd.program, e),
    ))
}

/// Log each line of a child pipe with the given logger
fn drain<R: Read>(pipe: R, log: fn(&str)) {
    for line in BufReader::new(pipe).lines().map_while(std::result::Result::ok) {
        let line = line.trim_end();
        if !line.is_empty() {
            log(line);
        }
    }
}

fn log_warn(line: &str) {
    warn!("{}", line);
}

fn log_debug(line: &str) {
    debug!("{}", line);
}

/// Run a command, streaming its output into the log
pub fn run(cmd: &CommandLine) -> Result<()> {
    info!("Running command: {}", cmd);

    let mut child = cmd
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(cmd, e))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    thread::scope(|s| {
        if let Some(out) = stdout {
            s.spawn(move || drain(out, log_debug));
        }
        if let Some(err) = stderr {
            s.spawn(move || drain(err, log_warn));
        }
    });

    let status = child.wait()?;
    cmd.check_status(status.code())
}

/// Run a command and return its stdout
///
/// `quiet` suppresses the "Running command" line for chatty lookups.
pub fn run_get_stdout(cmd: &CommandLine, quiet: bool) -> Result<String> {
    if quiet {
        debug!("Running command: {}", cmd);
    } else {
        info!("Running command: {}", cmd);
    }

    let mut child = cmd
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(cmd, e))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let captured = thread::scope(|s| {
        if let Some(err) = stderr {
            s.spawn(move || drain(err, log_warn));
        }
        let mut buf = Vec::new();
        if let Some(mut out) = stdout {
            out.read_to_end(&mut buf)?;
        }
        Ok::<_, std::io::Error>(buf)
    })?;

    let status = child.wait()?;
    cmd.check_status(status.code())?;
    Ok(String::from_utf8_lossy(&captured).into_owned())
}

/// Convert a path argument for a command line
pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
