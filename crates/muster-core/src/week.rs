//! Program week derivation.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset as _, TimeZone, Utc};
use serde::Deserialize;

/// 1-based program week that `now` falls in, counting from `start`.
///
/// Days are counted on `now`'s local calendar date. Dates before `start`
/// (including clock skew) clamp to week 1.
pub fn week_number<Tz: TimeZone>(now: &DateTime<Tz>, start: NaiveDate) -> u32 {
  let days = (now.date_naive() - start).num_days();
  if days < 0 {
    return 1;
  }
  u32::try_from(days / 7 + 1).unwrap_or(u32::MAX)
}

// ─── ProgramCalendar ─────────────────────────────────────────────────────────

/// The fixed program start date and the campus clock used to read "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgramCalendar {
  pub start_date:         NaiveDate,
  /// Campus offset from UTC, in minutes. Offsets beyond ±24h fall back to UTC.
  pub utc_offset_minutes: i32,
}

impl Default for ProgramCalendar {
  fn default() -> Self {
    Self {
      start_date:         NaiveDate::from_ymd_opt(2026, 2, 13).unwrap_or_default(),
      utc_offset_minutes: 0,
    }
  }
}

impl ProgramCalendar {
  pub fn offset(&self) -> FixedOffset {
    self
      .utc_offset_minutes
      .checked_mul(60)
      .and_then(FixedOffset::east_opt)
      .unwrap_or_else(|| Utc.fix())
  }

  /// Week number for the instant `now`, read on the campus clock.
  pub fn week_at(&self, now: DateTime<Utc>) -> u32 {
    week_number(&now.with_timezone(&self.offset()), self.start_date)
  }
}
