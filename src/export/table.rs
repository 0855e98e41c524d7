use anyhow::{Context, Result};
use std::path::Path;

/// Renders a two-column table document.
pub(crate) trait TableRenderer {
    fn render_table(&self, head: [&str; 2], rows: &[(String, String)], out: &Path) -> Result<()>;
}

/// Comma-separated table, one record per row after the header.
pub(crate) struct CsvTable;

impl TableRenderer for CsvTable {
    fn render_table(&self, head: [&str; 2], rows: &[(String, String)], out: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(out)
            .with_context(|| format!("Failed to create {}", out.display()))?;
        wtr.write_record(head)?;
        for (label, amount) in rows {
            wtr.write_record([label.as_str(), amount.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
