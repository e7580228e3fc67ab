//! Error taxonomy for the check-in pipeline.

use thiserror::Error;

/// Why a submission was not admitted.
///
/// Every variant except [`CheckInError::Persistence`] is user-correctable and
/// guarantees that no record was written.
#[derive(Debug, Error)]
pub enum CheckInError {
  #[error("location is required to verify attendance")]
  MissingLocation,

  #[error("submitted location is {distance_m}m from campus")]
  OutOfRange { distance_m: u64 },

  #[error("required field is empty: {field}")]
  Validation { field: &'static str },

  #[error("store error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CheckInError {
  /// Short machine-readable tag, used in structured logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::MissingLocation => "missing_location",
      Self::OutOfRange { .. } => "out_of_range",
      Self::Validation { .. } => "validation",
      Self::Persistence(_) => "persistence",
    }
  }
}

pub type Result<T, E = CheckInError> = std::result::Result<T, E>;
