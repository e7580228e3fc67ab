//! `GET /download/{course}/{week}` — weekly attendance spreadsheet.

use axum::{
  body::Body,
  extract::{Path, State},
  http::{HeaderValue, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use muster_core::store::CheckInStore;

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path((course, week)): Path<(String, u32)>,
) -> Result<Response, Error>
where
  S: CheckInStore + Clone + 'static,
{
  if week == 0 {
    return Err(Error::BadRequest("week must be at least 1".to_owned()));
  }

  let report = state
    .exporter
    .export(state.service.store().as_ref(), &course, week)
    .await?;

  let Some(report) = report else {
    return Ok((StatusCode::NOT_FOUND, Html(pages::no_data(&course, week))).into_response());
  };

  let disposition = format!("attachment; filename=\"{}\"", report.file_name);
  let disposition = HeaderValue::from_str(&disposition)
    .map_err(|_| Error::BadRequest("course cannot be used in a file name".to_owned()))?;

  let mut res = Response::new(Body::from(report.bytes));
  let headers = res.headers_mut();
  headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(muster_export::CONTENT_TYPE));
  headers.insert(header::CONTENT_DISPOSITION, disposition);
  Ok(res)
}
