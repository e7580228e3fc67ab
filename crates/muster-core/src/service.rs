//! The check-in admission pipeline.
//!
//! A submission is admitted only if it carries a usable location inside the
//! geofence and every required field is present. Rejections never touch the
//! store; an admitted submission is persisted with a single insert.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
  CheckInError, Result,
  geofence::{Geofence, parse_coordinate},
  record::{CheckInForm, CheckInRecord, NewCheckIn, non_blank},
  store::CheckInStore,
  week::ProgramCalendar,
};

/// Orchestrates geofence validation, week derivation and persistence.
///
/// Holds no mutable state; concurrent `submit` calls are independent and
/// coordinate only through the store.
pub struct CheckInService<S> {
  store:    Arc<S>,
  geofence: Geofence,
  calendar: ProgramCalendar,
}

impl<S> Clone for CheckInService<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      geofence: self.geofence,
      calendar: self.calendar,
    }
  }
}

impl<S: CheckInStore> CheckInService<S> {
  pub fn new(store: Arc<S>, geofence: Geofence, calendar: ProgramCalendar) -> Self {
    Self { store, geofence, calendar }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn geofence(&self) -> &Geofence { &self.geofence }

  pub fn calendar(&self) -> &ProgramCalendar { &self.calendar }

  /// Admit or reject one submission received at `now`.
  pub async fn submit(&self, form: CheckInForm, now: DateTime<Utc>) -> Result<CheckInRecord> {
    match self.admit(form, now).await {
      Ok(record) => {
        tracing::info!(
          id = record.id,
          course = %record.course,
          week = record.week_number,
          "check-in admitted"
        );
        Ok(record)
      }
      Err(CheckInError::Persistence(e)) => {
        tracing::error!(error = %e, "failed to persist check-in");
        Err(CheckInError::Persistence(e))
      }
      Err(e) => {
        tracing::info!(reason = e.kind(), "check-in rejected: {e}");
        Err(e)
      }
    }
  }

  async fn admit(&self, form: CheckInForm, now: DateTime<Utc>) -> Result<CheckInRecord> {
    let (lat, lon) = parse_coordinate(form.latitude.as_deref(), form.longitude.as_deref())?;
    self.geofence.check(lat, lon)?;

    let week_number = self.calendar.week_at(now);
    let input = build_check_in(form, week_number)?;

    self
      .store
      .insert(input)
      .await
      .map_err(|e| CheckInError::Persistence(Box::new(e)))
  }

  /// All records, most recent first.
  pub async fn list_all(&self) -> Result<Vec<CheckInRecord>> {
    self
      .store
      .list_all()
      .await
      .map_err(|e| CheckInError::Persistence(Box::new(e)))
  }

  /// Records for one course in one program week.
  pub async fn list_by_course_and_week(
    &self,
    course: &str,
    week: u32,
  ) -> Result<Vec<CheckInRecord>> {
    self
      .store
      .list_by_course_and_week(course, week)
      .await
      .map_err(|e| CheckInError::Persistence(Box::new(e)))
  }
}

/// Validate the form's person fields and pair them with the derived week.
pub fn build_check_in(form: CheckInForm, week_number: u32) -> Result<NewCheckIn> {
  Ok(NewCheckIn {
    first_name: required("first_name", form.first_name)?,
    middle_name: non_blank(form.middle_name),
    last_name: required("last_name", form.last_name)?,
    id_passport: required("id_passport", form.id_passport)?,
    email: required("email", form.email)?,
    phone: required("phone", form.phone)?,
    ethnicity: non_blank(form.ethnicity),
    gender: non_blank(form.gender),
    course: required("course", form.course)?,
    week_number: week_number.max(1),
  })
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
  non_blank(value).ok_or(CheckInError::Validation { field })
}
