//! Output formatting and persistence for report documents.
//!
//! Both the report and the error document replace whatever is at the
//! destination.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::reportcard::types::{ErrorDocument, ReportCard};

/// Renders a [`ReportCard`] as JSON, compact unless `pretty` is set.
pub fn render_report(report: &ReportCard, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(text)
}

/// Writes a [`ReportCard`] to `path`.
pub fn write_report(path: impl AsRef<Path>, report: &ReportCard, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), pretty, "Writing report card");
    write_text(path, &render_report(report, pretty)?)
}

/// Writes `{"error": message}` to `path`.
pub fn write_error(path: impl AsRef<Path>, message: &str) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), message, "Writing error document");
    let text = serde_json::to_string(&ErrorDocument { error: message })?;
    write_text(path, &text)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
