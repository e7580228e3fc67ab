//! Handlers for `/check-ins` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/check-ins` | All records, most recent first |
//! | `GET`  | `/check-ins/{course}/{week}` | Exact course/week match; `[]` when none |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use muster_core::{record::CheckInRecord, store::CheckInStore};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /check-ins`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<CheckInRecord>>, ApiError>
where
  S: CheckInStore,
{
  let records = store
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Roster ───────────────────────────────────────────────────────────────────

/// `GET /check-ins/{course}/{week}`
pub async fn roster<S>(
  State(store): State<Arc<S>>,
  Path((course, week)): Path<(String, u32)>,
) -> Result<Json<Vec<CheckInRecord>>, ApiError>
where
  S: CheckInStore,
{
  if week == 0 {
    return Err(ApiError::BadRequest("week must be at least 1".to_owned()));
  }
  let records = store
    .list_by_course_and_week(&course, week)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
