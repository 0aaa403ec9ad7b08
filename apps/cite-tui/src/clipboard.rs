//! System clipboard access
//!
//! The text is piped to the first platform clipboard tool that can be
//! spawned. The call blocks until that tool exits, so every copy resolves to
//! exactly one success or one failure.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

/// Destination for copied citations.
pub trait Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool available (tried {0})")]
    Unavailable(String),

    #[error("{program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// A clipboard tool invocation that reads the text from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Clipboard backed by platform command-line tools.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: Vec<ClipboardCommand>,
}

impl SystemClipboard {
    /// Candidate tools for the current platform, in preference order.
    pub fn detect() -> Self {
        let mut commands = Vec::new();

        if cfg!(target_os = "macos") {
            commands.push(ClipboardCommand::new("pbcopy", &[]));
        } else if cfg!(windows) {
            commands.push(ClipboardCommand::new("clip", &[]));
        } else {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                commands.push(ClipboardCommand::new("wl-copy", &[]));
            }
            commands.push(ClipboardCommand::new("xclip", &["-selection", "clipboard"]));
            commands.push(ClipboardCommand::new("xsel", &["--clipboard", "--input"]));
        }

        Self { commands }
    }

    /// Use an explicit list of tools.
    pub fn with_commands(commands: Vec<ClipboardCommand>) -> Self {
        Self { commands }
    }

    /// A single configured tool, given as program followed by arguments.
    pub fn from_command_line(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        Some(Self::with_commands(vec![ClipboardCommand {
            program: program.clone(),
            args: args.to_vec(),
        }]))
    }

    fn pipe_to(command: &ClipboardCommand, text: &str) -> Result<(), ClipboardError> {
        let io_err = |source| ClipboardError::Io {
            program: command.program.clone(),
            source,
        };

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(io_err)?;

        // Dropping stdin closes the pipe so the tool sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(io_err)?;
        }

        let status = child.wait().map_err(io_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                program: command.program.clone(),
                status,
            })
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::detect()
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for command in &self.commands {
            match Self::pipe_to(command, text) {
                Err(ClipboardError::Io { source, .. })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    debug!(program = %command.program, "clipboard tool not installed");
                    continue;
                }
                Ok(()) => {
                    debug!(program = %command.program, bytes = text.len(), "copied to clipboard");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }

        let tried = self
            .commands
            .iter()
            .map(|c| c.program.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ClipboardError::Unavailable(tried))
    }
}

/// In-memory clipboard for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub copied: Vec<String>,
    pub fail_with: Option<String>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn failing(reason: &str) -> Self {
        Self {
            copied: Vec::new(),
            fail_with: Some(reason.to_string()),
        }
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(reason) = &self.fail_with {
            return Err(ClipboardError::Io {
                program: "memory".to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, reason.clone()),
            });
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}
