//! The `CheckInStore` trait.
//!
//! Implemented by storage backends (e.g. `muster-store-sqlite`). The check-in
//! service, the exporter and the HTTP layers depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::record::{CheckInRecord, NewCheckIn};

/// Abstraction over the check-in table.
///
/// Writes are append-only; there is no update or delete. Every call reflects
/// the current state of the backing store (no caching), and each call is a
/// single auto-committed unit.
pub trait CheckInStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the backing table if it does not exist. Idempotent and
  /// non-destructive; safe to call on every process start.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Append a record. The store assigns `id` and `checked_in_at`.
  fn insert(
    &self,
    input: NewCheckIn,
  ) -> impl Future<Output = Result<CheckInRecord, Self::Error>> + Send + '_;

  /// All records, most recent first.
  fn list_all(&self) -> impl Future<Output = Result<Vec<CheckInRecord>, Self::Error>> + Send + '_;

  /// Records whose course and week match exactly. Empty when nothing matches.
  fn list_by_course_and_week<'a>(
    &'a self,
    course: &'a str,
    week: u32,
  ) -> impl Future<Output = Result<Vec<CheckInRecord>, Self::Error>> + Send + 'a;
}
