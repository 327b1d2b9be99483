// src/exec/process.rs

//! Payload that runs an external program with an explicit argument vector.
//!
//! The program is started directly (no shell) and waited on. Stdout and
//! stderr are streamed line by line and logged at debug level as they arrive;
//! only the tail of stderr is kept. A non-zero exit becomes a payload failure
//! that carries the exit code and that tail.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, warn};

use crate::exec::payload::Runnable;

/// Lines of stderr kept for the failure diagnostic.
const STDERR_TAIL_LINES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPayload {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessPayload {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Run the program from `cwd` instead of the current directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl Runnable for ProcessPayload {
    fn invoke(&mut self) -> Result<()> {
        let line = self.describe();
        info!(cmd = %line, cwd = ?self.cwd, "starting process");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning process '{line}'"))?;

        // Drain stderr on its own thread so neither pipe can fill up and block
        // the child while the other is being read.
        let stderr_reader = child.stderr.take().map(|stderr| {
            let line = line.clone();
            thread::spawn(move || {
                let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
                for_each_line(stderr, |l| {
                    debug!(cmd = %line, "stderr: {}", l);
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(l);
                });
                tail
            })
        });

        if let Some(stdout) = child.stdout.take() {
            for_each_line(stdout, |l| debug!(cmd = %line, "stdout: {}", l));
        }

        let status = child
            .wait()
            .with_context(|| format!("waiting for process '{line}'"))?;

        let stderr_tail = match stderr_reader {
            Some(handle) => handle
                .join()
                .map_err(|_| anyhow!("stderr reader for '{line}' panicked"))?,
            None => VecDeque::new(),
        };

        let code = status.code().unwrap_or(-1);
        info!(
            cmd = %line,
            exit_code = code,
            success = status.success(),
            "process exited"
        );

        if !status.success() {
            let stderr = Vec::from(stderr_tail).join("\n");
            let stderr = stderr.trim_end();
            if stderr.is_empty() {
                bail!("'{line}' exited with code {code}");
            }
            bail!("'{line}' exited with code {code}\nstderr:\n{stderr}");
        }

        Ok(())
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Feed every line of `pipe` to `f`, decoding lossily and stripping line
/// endings. Stops quietly at EOF and logs any read error.
fn for_each_line(pipe: impl Read, mut f: impl FnMut(String)) {
    for chunk in BufReader::new(pipe).split(b'\n') {
        match chunk {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                f(text.trim_end_matches('\r').to_string());
            }
            Err(err) => {
                warn!(error = %err, "reading process output failed");
                break;
            }
        }
    }
}
