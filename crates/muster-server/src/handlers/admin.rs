//! `GET /admin` — all check-ins, newest first.

use axum::{extract::State, response::Html};
use muster_core::store::CheckInStore;

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: CheckInStore + Clone + 'static,
{
  let records = state.service.list_all().await?;
  let offset = state.service.calendar().offset();
  Ok(Html(pages::admin(&records, offset)))
}
