//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings with microsecond
//! precision, so lexical order in SQL equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use muster_core::record::CheckInRecord;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Week number ─────────────────────────────────────────────────────────────

pub fn decode_week(raw: i64) -> Result<u32> {
  u32::try_from(raw)
    .ok()
    .filter(|w| *w >= 1)
    .ok_or(Error::InvalidWeek(raw))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// A `check_ins` row exactly as SQLite hands it back.
pub struct RawCheckIn {
  pub id:            i64,
  pub first_name:    String,
  pub middle_name:   Option<String>,
  pub last_name:     String,
  pub id_passport:   String,
  pub email:         String,
  pub phone:         String,
  pub ethnicity:     Option<String>,
  pub gender:        Option<String>,
  pub course:        String,
  pub week_number:   i64,
  pub check_in_time: String,
}

impl RawCheckIn {
  /// Map a row selected with [`crate::schema::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      first_name:    row.get(1)?,
      middle_name:   row.get(2)?,
      last_name:     row.get(3)?,
      id_passport:   row.get(4)?,
      email:         row.get(5)?,
      phone:         row.get(6)?,
      ethnicity:     row.get(7)?,
      gender:        row.get(8)?,
      course:        row.get(9)?,
      week_number:   row.get(10)?,
      check_in_time: row.get(11)?,
    })
  }

  pub fn into_record(self) -> Result<CheckInRecord> {
    Ok(CheckInRecord {
      id:            self.id,
      first_name:    self.first_name,
      middle_name:   self.middle_name,
      last_name:     self.last_name,
      id_passport:   self.id_passport,
      email:         self.email,
      phone:         self.phone,
      ethnicity:     self.ethnicity,
      gender:        self.gender,
      course:        self.course,
      week_number:   decode_week(self.week_number)?,
      checked_in_at: decode_dt(&self.check_in_time)?,
    })
  }
}
