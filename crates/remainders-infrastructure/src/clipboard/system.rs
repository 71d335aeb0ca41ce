//! Platform clipboard via the usual command-line helpers.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use remainders_core::clipboard::{ClipboardBridge, ClipboardError};

/// One external program that reads clipboard content from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Clipboard bridge that pipes text into the first helper found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<ClipboardCommand>,
}

impl SystemClipboard {
    /// Uses the helpers customary for the current platform.
    pub fn new() -> Self {
        Self {
            candidates: platform_candidates(),
        }
    }

    /// Uses exactly the given helpers, tried in order.
    pub fn with_commands(candidates: Vec<ClipboardCommand>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[ClipboardCommand] {
        &self.candidates
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardBridge for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::EmptyText);
        }

        for command in &self.candidates {
            match pipe_into(command, text).await {
                Ok(()) => {
                    tracing::debug!("[SystemClipboard] copied via {}", command.program);
                    return Ok(());
                }
                Err(ClipboardError::Unsupported(reason)) => {
                    tracing::debug!("[SystemClipboard] {} unavailable: {}", command.program, reason);
                }
                Err(other) => return Err(other),
            }
        }

        let tried: Vec<&str> = self.candidates.iter().map(|c| c.program.as_str()).collect();
        Err(ClipboardError::Unsupported(format!(
            "no clipboard helper found (tried: {})",
            tried.join(", ")
        )))
    }
}

async fn pipe_into(command: &ClipboardCommand, text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipboardError::Unsupported(e.to_string()),
            ErrorKind::PermissionDenied => ClipboardError::Denied(e.to_string()),
            _ => ClipboardError::Failed(e.to_string()),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| ClipboardError::Failed(format!("{}: {}", command.program, e)))?;
        // Closing stdin lets the helper finish.
        drop(stdin);
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| ClipboardError::Failed(format!("{}: {}", command.program, e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ClipboardError::Failed(format!(
            "{} exited with {}: {}",
            command.program,
            output.status,
            stderr.trim()
        )))
    }
}

fn platform_candidates() -> Vec<ClipboardCommand> {
    if cfg!(target_os = "macos") {
        vec![ClipboardCommand::new("pbcopy", &[])]
    } else if cfg!(target_os = "windows") {
        vec![ClipboardCommand::new("clip.exe", &[])]
    } else {
        vec![
            ClipboardCommand::new("wl-copy", &[]),
            ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
            ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
            // WSL
            ClipboardCommand::new("clip.exe", &[]),
        ]
    }
}
