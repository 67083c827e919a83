use crate::error::{BlameTallyError, Result};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Source of per-line authorship text for a file.
pub trait Attributor {
    /// Raw attribution output for `file`, a path relative to `repo_root`.
    fn attribute(&self, repo_root: &Path, file: &Path) -> Result<String>;
}

/// Runs `git blame` in the repository root.
#[derive(Debug, Clone)]
pub struct GitBlame {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for GitBlame {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout: None,
        }
    }
}

impl GitBlame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a `git` executable other than the one found on `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, repo_root: &Path, file: &Path) -> Command {
        let mut command = Command::new(&self.program);
        // Pin the settings that change the shape of the default output.
        command
            .args(["-c", "blame.showEmail=false", "-c", "blame.blankBoundary=false"])
            .args(["blame", "--date=iso", "--"])
            .arg(file)
            .current_dir(repo_root)
            .stdin(Stdio::null());
        command
    }
}

impl Attributor for GitBlame {
    fn attribute(&self, repo_root: &Path, file: &Path) -> Result<String> {
        trace!(file = %file.display(), "running git blame");
        let mut command = self.command(repo_root, file);
        let output = match self.timeout {
            Some(timeout) => output_with_timeout(&mut command, file, timeout)?,
            None => command.output()?,
        };

        if !output.status.success() {
            return Err(BlameTallyError::Blame {
                path: file.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn output_with_timeout(command: &mut Command, file: &Path, timeout: Duration) -> Result<Output> {
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain both pipes while waiting so a large blame cannot block on a full pipe.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(BlameTallyError::Timeout {
                path: file.to_path_buf(),
                after: timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    Ok(Output {
        status,
        stdout: finish(stdout)?,
        stderr: finish(stderr)?,
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || match pipe {
        Some(pipe) => read_all(pipe),
        None => Ok(Vec::new()),
    })
}

fn read_all<R: Read>(mut pipe: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

fn finish(reader: thread::JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    reader
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe reader thread panicked")))
}
