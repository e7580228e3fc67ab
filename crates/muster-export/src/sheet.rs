//! Worksheet layout for the attendance report.
//!
//! ```text
//! row 1   [logo]
//! row 2               <institution>
//! row 3               Attendance Report: <course> - Week <n>
//! row 6   ID | First Name | ... | Time        (navy band)
//! row 7+  one row per check-in
//! n + 9   Facilitator Signature: ____
//! ```

use chrono::FixedOffset;
use muster_core::record::CheckInRecord;
use rust_xlsxwriter::{Color, Format, Image, Workbook, Worksheet};

use crate::{ReportConfig, Result};

/// Table header, in column order.
pub const COLUMNS: [&str; 12] = [
  "ID",
  "First Name",
  "Middle Name",
  "Last Name",
  "ID/Passport",
  "Email",
  "Phone",
  "Ethnicity",
  "Gender",
  "Course",
  "Week",
  "Time",
];

const NAVY: u32 = 0x003366;
const SHEET_NAME: &str = "Attendance";
const TITLE_COL: u16 = 3;
const HEADER_ROW: u32 = 5;
const LOGO_PX: f64 = 100.0;
const SIGNATURE: &str = "Facilitator Signature: ___________________________";

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Number(f64),
  Text(String),
  Blank,
}

impl From<Option<String>> for Cell {
  fn from(v: Option<String>) -> Self { v.map_or(Cell::Blank, Cell::Text) }
}

/// The table cells for one record, in [`COLUMNS`] order.
pub fn row_cells(record: &CheckInRecord, offset: FixedOffset) -> [Cell; 12] {
  [
    Cell::Number(record.id as f64),
    Cell::Text(record.first_name.clone()),
    record.middle_name.clone().into(),
    Cell::Text(record.last_name.clone()),
    Cell::Text(record.id_passport.clone()),
    Cell::Text(record.email.clone()),
    Cell::Text(record.phone.clone()),
    record.ethnicity.clone().into(),
    record.gender.clone().into(),
    Cell::Text(record.course.clone()),
    Cell::Number(f64::from(record.week_number)),
    Cell::Text(
      record
        .checked_in_at
        .with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string(),
    ),
  ]
}

/// Zero-based row of the signature line for a table of `rows` records.
pub(crate) fn signature_row(rows: usize) -> u32 {
  HEADER_ROW + 1 + rows as u32 + 2
}

pub(crate) fn render(
  config: &ReportConfig,
  offset: FixedOffset,
  course: &str,
  week: u32,
  records: &[CheckInRecord],
) -> Result<Vec<u8>> {
  let mut workbook = Workbook::new();
  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_NAME)?;

  insert_logo(ws, config);

  let title = Format::new()
    .set_bold()
    .set_font_size(16)
    .set_font_color(Color::RGB(NAVY));
  ws.write_string_with_format(1, TITLE_COL, &config.institution, &title)?;
  ws.write_string(2, TITLE_COL, format!("Attendance Report: {course} - Week {week}"))?;

  let header = Format::new()
    .set_bold()
    .set_font_color(Color::White)
    .set_background_color(Color::RGB(NAVY));
  for (col, name) in COLUMNS.iter().enumerate() {
    ws.write_string_with_format(HEADER_ROW, col as u16, *name, &header)?;
  }

  for (i, record) in records.iter().enumerate() {
    let row = HEADER_ROW + 1 + i as u32;
    for (col, cell) in row_cells(record, offset).into_iter().enumerate() {
      match cell {
        Cell::Number(n) => {
          ws.write_number(row, col as u16, n)?;
        }
        Cell::Text(s) => {
          ws.write_string(row, col as u16, s)?;
        }
        Cell::Blank => {}
      }
    }
  }

  ws.autofit();

  let bold = Format::new().set_bold();
  ws.write_string_with_format(signature_row(records.len()), 0, SIGNATURE, &bold)?;

  Ok(workbook.save_to_buffer()?)
}

/// Best effort: a missing or unreadable logo leaves the sheet without one.
fn insert_logo(ws: &mut Worksheet, config: &ReportConfig) {
  let Some(path) = config.logo_path.as_deref() else { return };

  let placed = Image::new(path).and_then(|image| {
    let image = image.set_scale_to_size(LOGO_PX, LOGO_PX, false);
    ws.insert_image(0, 0, &image).map(|_| ())
  });
  if let Err(e) = placed {
    tracing::warn!(path = %path.display(), error = %e, "skipping report logo");
  }
}
