use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub(crate) enum ClipboardError {
    #[error("no clipboard tool found (tried pbcopy, wl-copy, xclip, xsel, clip)")]
    NoTool,
    #[error("{tool} exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for copied text.
pub(crate) trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into the first platform clipboard tool that can be spawned.
pub(crate) struct SystemClipboard;

const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

impl ClipboardWriter for SystemClipboard {
    /// A tool that is missing or exits non-zero (e.g. `wl-copy` outside
    /// Wayland) hands over to the next one. The last failure is reported.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::NoTool;
        for &(tool, args) in TOOLS {
            match pipe_to(tool, args, text) {
                Ok(()) => {
                    tracing::debug!(tool, "clipboard write succeeded");
                    return Ok(());
                }
                Err(ClipboardError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::debug!(tool, error = %e, "clipboard tool failed, trying next");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

fn pipe_to(tool: &'static str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    // Reap the child even when the pipe broke.
    let status = child.wait()?;
    if !status.success() {
        return Err(ClipboardError::ToolFailed { tool, status });
    }
    written.map_err(ClipboardError::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_missing_tool_is_not_found() {
        let err = pipe_to("spendsplit-no-such-clipboard-tool", &[], "x").unwrap_err();
        assert!(matches!(err, ClipboardError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_reports_status() {
        let err = pipe_to("false", &[], "x").unwrap_err();
        assert!(matches!(err, ClipboardError::ToolFailed { tool: "false", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_working_tool_succeeds() {
        pipe_to("cat", &[], "breakdown").unwrap();
    }
}
