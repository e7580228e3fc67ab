//! Check-in records — the single persisted entity.
//!
//! A record is written once by the check-in service and never updated or
//! deleted. The identifier and timestamp are always assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── CheckInRecord ───────────────────────────────────────────────────────────

/// One attendance event tied to a person, a course and a program week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
  /// Store-assigned, monotonically increasing.
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
  /// Always ≥ 1; derived server-side, never accepted from the client.
  pub week_number:   u32,
  /// Server-assigned at insertion time.
  pub checked_in_at: DateTime<Utc>,
}

// ─── NewCheckIn ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::CheckInStore::insert`].
/// `id` and `checked_in_at` are set by the store; they are not accepted from
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckIn {
  pub first_name:  String,
  pub middle_name: Option<String>,
  pub last_name:   String,
  pub id_passport: String,
  pub email:       String,
  pub phone:       String,
  pub ethnicity:   Option<String>,
  pub gender:      Option<String>,
  pub course:      String,
  pub week_number: u32,
}

impl NewCheckIn {
  /// Attach the store-assigned identity, producing the persisted record.
  pub fn into_record(self, id: i64, checked_in_at: DateTime<Utc>) -> CheckInRecord {
    CheckInRecord {
      id,
      first_name: self.first_name,
      middle_name: self.middle_name,
      last_name: self.last_name,
      id_passport: self.id_passport,
      email: self.email,
      phone: self.phone,
      ethnicity: self.ethnicity,
      gender: self.gender,
      course: self.course,
      week_number: self.week_number,
      checked_in_at,
    }
  }
}

// ─── CheckInForm ─────────────────────────────────────────────────────────────

/// The raw, form-encoded submission. Nothing here has been validated;
/// `latitude`/`longitude` are filled in by client-side geolocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInForm {
  pub first_name:  Option<String>,
  pub middle_name: Option<String>,
  pub last_name:   Option<String>,
  pub id_passport: Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  pub ethnicity:   Option<String>,
  pub gender:      Option<String>,
  pub course:      Option<String>,
  pub latitude:    Option<String>,
  pub longitude:   Option<String>,
}

/// Trim `value`, mapping absent or blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}
