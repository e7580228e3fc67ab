//! Weekly attendance reports for Muster.
//!
//! Renders the check-ins for one course in one program week into an `.xlsx`
//! workbook held in memory. Querying goes through any
//! [`muster_core::store::CheckInStore`]; nothing is written to disk.
//!
//! # Quick start
//!
//! ```no_run
//! # async fn demo(store: &impl muster_core::store::CheckInStore) -> muster_export::Result<()> {
//! use chrono::{Offset as _, Utc};
//! use muster_export::{ReportConfig, ReportExporter};
//!
//! let exporter = ReportExporter::new(ReportConfig::default(), Utc.fix());
//! match exporter.export(store, "Data101", 3).await? {
//!   Some(report) => println!("{}: {} rows", report.file_name, report.rows),
//!   None => println!("no check-ins"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod sheet;

use std::path::PathBuf;

use chrono::FixedOffset;
use muster_core::{record::CheckInRecord, store::CheckInStore};
use serde::Deserialize;

pub use error::{Error, Result};
pub use sheet::{COLUMNS, Cell, row_cells};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Branding for the report's title block and file name.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  pub institution: String,
  pub file_prefix: String,
  /// Image placed at the top-left of the sheet, scaled to 100×100 px.
  pub logo_path:   Option<PathBuf>,
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      institution: "Southern Labs Institute of Technology".to_owned(),
      file_prefix: "SLABS".to_owned(),
      logo_path:   None,
    }
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// A rendered workbook ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct AttendanceReport {
  pub file_name: String,
  /// Number of check-in rows in the table.
  pub rows:      usize,
  pub bytes:     Vec<u8>,
}

pub const CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ─── Exporter ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ReportExporter {
  config: ReportConfig,
  /// Clock used for the Time column.
  offset: FixedOffset,
}

impl ReportExporter {
  pub fn new(config: ReportConfig, offset: FixedOffset) -> Self { Self { config, offset } }

  /// Query and render the roster for `course` in `week`.
  ///
  /// Returns `Ok(None)` when no check-ins match; an empty workbook is never
  /// produced.
  pub async fn export<S: CheckInStore>(
    &self,
    store: &S,
    course: &str,
    week: u32,
  ) -> Result<Option<AttendanceReport>> {
    let records = store
      .list_by_course_and_week(course, week)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    if records.is_empty() {
      return Ok(None);
    }
    self.render(course, week, &records).map(Some)
  }

  /// Render `records` without querying. `records` should be non-empty.
  pub fn render(
    &self,
    course: &str,
    week: u32,
    records: &[CheckInRecord],
  ) -> Result<AttendanceReport> {
    let bytes = sheet::render(&self.config, self.offset, course, week, records)?;
    tracing::info!(course, week, rows = records.len(), "rendered attendance report");
    Ok(AttendanceReport {
      file_name: file_name(&self.config.file_prefix, course, week),
      rows: records.len(),
      bytes,
    })
  }
}

/// `{prefix}_{course}_Week_{week}.xlsx`, with anything outside
/// `[A-Za-z0-9_-]` in the course replaced by `_`.
pub fn file_name(prefix: &str, course: &str, week: u32) -> String {
  let course: String = course
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
    .collect();
  format!("{prefix}_{course}_Week_{week}.xlsx")
}
