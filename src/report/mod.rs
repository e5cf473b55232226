//! Final per-method report, rendered as an aligned text table or JSON.
mod json;
mod text;

#[cfg(test)]
mod tests;

use std::path::Path;

use chrono::Utc;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::args::{OutputFormat, TesterArgs};
use crate::error::AppResult;
use crate::runner::RunSummary;

pub use json::{JsonReport, MethodRow, ReportSettings};
pub use text::summary_lines;

/// Renders the summary in the format chosen on the command line.
///
/// # Errors
///
/// Returns an error when the JSON report cannot be serialized.
pub fn render(summary: &RunSummary, args: &TesterArgs) -> AppResult<String> {
    match args.output_format {
        OutputFormat::Text => {
            let mut rendered = summary_lines(summary).join("\n");
            rendered.push('\n');
            Ok(rendered)
        }
        OutputFormat::Json => {
            let report = JsonReport::new(summary, args, Utc::now());
            let mut rendered = serde_json::to_string_pretty(&report)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

/// Writes the rendered report to `output`, or to stdout when unset.
///
/// # Errors
///
/// Returns an error when the destination cannot be written.
pub async fn write_report(rendered: &str, output: Option<&Path>) -> AppResult<()> {
    match output {
        Some(path) => {
            let file = tokio::fs::File::create(path).await?;
            let mut writer = BufWriter::new(file);
            writer.write_all(rendered.as_bytes()).await?;
            writer.flush().await?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
