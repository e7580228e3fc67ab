//! Error type for `muster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored row carries a week number outside `1..=u32::MAX`.
  #[error("invalid week number in store: {0}")]
  InvalidWeek(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
