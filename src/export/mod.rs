mod clipboard;
mod table;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::engine::{self, Breakdown};
use crate::models::AllocationState;

pub(crate) use clipboard::{ClipboardWriter, SystemClipboard};
pub(crate) use table::{CsvTable, TableRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Text,
    Csv,
}

impl ExportFormat {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "csv" | "table" => Some(Self::Csv),
            _ => None,
        }
    }

    pub(crate) fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a file extension, defaulting to text.
    pub(crate) fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::parse)
            .unwrap_or(Self::Text)
    }
}

/// `breakdown-<unix millis>.<ext>` inside `dir`.
pub(crate) fn default_export_path(dir: &Path, format: ExportFormat) -> PathBuf {
    let stamp = chrono::Utc::now().timestamp_millis();
    dir.join(format!("breakdown-{stamp}.{}", format.extension()))
}

/// Write the breakdown in `format` to `path`, refusing when export is gated.
pub(crate) fn export_to_file(state: &AllocationState, format: ExportFormat, path: &Path) -> Result<()> {
    Breakdown::compute(state).export_gate()?;
    match format {
        ExportFormat::Text => write_text(state, path)?,
        ExportFormat::Csv => CsvTable.render_table(
            ["Category", "Amount"],
            &engine::breakdown_lines(state),
            path,
        )?,
    }
    tracing::info!(path = %path.display(), ?format, "exported breakdown");
    Ok(())
}

fn write_text(state: &AllocationState, path: &Path) -> Result<()> {
    std::fs::write(path, engine::breakdown_text(state))
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Send the breakdown text to `clipboard`, refusing when export is gated.
pub(crate) fn copy_to_clipboard(state: &AllocationState, clipboard: &dyn ClipboardWriter) -> Result<()> {
    Breakdown::compute(state).export_gate()?;
    clipboard
        .write_text(&engine::breakdown_text(state))
        .context("Failed to copy to clipboard")?;
    tracing::info!("copied breakdown to clipboard");
    Ok(())
}
