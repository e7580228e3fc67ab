//! Error types and axum `IntoResponse` implementation.
//!
//! Check-in rejections are user-facing and render as HTML pages; everything
//! else is an operator problem and is logged before a generic page is sent.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use muster_core::CheckInError;
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  CheckIn(#[from] CheckInError),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("export error: {0}")]
  Export(#[from] muster_export::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, title, message) = match self {
      Error::CheckIn(CheckInError::MissingLocation) => (
        StatusCode::BAD_REQUEST,
        "Location Error",
        "GPS access is required to verify attendance.".to_owned(),
      ),
      Error::CheckIn(CheckInError::OutOfRange { distance_m }) => (
        StatusCode::FORBIDDEN,
        "Check-in Denied",
        format!("You must be on campus to check in. You are currently {distance_m}m away."),
      ),
      Error::CheckIn(CheckInError::Validation { field }) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        "Check-in Incomplete",
        format!("Please fill in the {} field.", field.replace('_', " ")),
      ),
      Error::CheckIn(CheckInError::Persistence(_)) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Check-in Failed",
        "Your check-in could not be saved. Please try again.".to_owned(),
      ),
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
      Error::Export(e) => {
        tracing::error!(error = %e, "report export failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Export Failed",
          "The attendance report could not be generated.".to_owned(),
        )
      }
    };
    (status, Html(pages::message(title, &message))).into_response()
  }
}
