//! External line selection for `delete`.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Error type for the selection command
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("could not run select command `{command}`: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },
    #[error("select command `{command}` failed: {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Picks one line out of the rendered task table
pub trait Selector {
    /// Returns the chosen text with trailing newlines removed. An empty
    /// string means nothing was chosen.
    fn select(&mut self, candidates: &str) -> Result<String, SelectError>;
}

/// Runs `sh -c <command>` with the candidates on stdin and captures stdout
pub struct ShellSelector {
    command: String,
}

impl ShellSelector {
    pub fn new(command: impl Into<String>) -> Self {
        ShellSelector {
            command: command.into(),
        }
    }
}

impl Selector for ShellSelector {
    fn select(&mut self, candidates: &str) -> Result<String, SelectError> {
        let io_err = |source| SelectError::Io {
            command: self.command.clone(),
            source,
        };
        tracing::debug!(command = %self.command, "running select command");

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(io_err)?;

        // Feed stdin from another thread so a command that writes before
        // draining its input can't deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = candidates.to_string();
            thread::spawn(move || {
                // The command may exit without reading everything; a broken
                // pipe here is not an error.
                let _ = stdin.write_all(input.as_bytes());
            })
        });

        let output = child.wait_with_output().map_err(io_err)?;
        if let Some(handle) = writer {
            let _ = handle.join();
        }

        if !output.status.success() {
            return Err(SelectError::Failed {
                command: self.command.clone(),
                status: output.status,
            });
        }

        let selected = String::from_utf8_lossy(&output.stdout);
        Ok(trim_newlines(&selected).to_string())
    }
}

fn trim_newlines(s: &str) -> &str {
    s.trim_end_matches(['\n', '\r'])
}
