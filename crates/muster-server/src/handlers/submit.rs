//! `POST /submit` — the check-in admission endpoint.

use axum::{
  Form,
  extract::State,
  response::Html,
};
use chrono::Utc;
use muster_core::{record::CheckInForm, store::CheckInStore};

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<CheckInForm>,
) -> Result<Html<String>, Error>
where
  S: CheckInStore + Clone + 'static,
{
  let record = state.service.submit(form, Utc::now()).await?;
  Ok(Html(pages::success(&record)))
}
