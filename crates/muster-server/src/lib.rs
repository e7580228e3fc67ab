//! HTTP front end for Muster.
//!
//! Serves the check-in form, admits submissions through
//! [`CheckInService`], and exposes the admin listing and spreadsheet
//! downloads, all backed by any [`CheckInStore`].

pub mod error;
pub mod handlers;
pub mod pages;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use muster_core::{
  geofence::{Geofence, GeofenceConfig},
  service::CheckInService,
  store::CheckInStore,
  week::ProgramCalendar,
};
use muster_export::{ReportConfig, ReportExporter};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `muster.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub geofence:   GeofenceConfig,
  pub program:    ProgramCalendar,
  pub report:     ReportConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "0.0.0.0".to_owned(),
      port:       5000,
      store_path: PathBuf::from("muster.db"),
      geofence:   GeofenceConfig::default(),
      program:    ProgramCalendar::default(),
      report:     ReportConfig::default(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CheckInStore> {
  pub service:  CheckInService<S>,
  pub exporter: Arc<ReportExporter>,
  pub config:   Arc<ServerConfig>,
}

impl<S: CheckInStore> AppState<S> {
  /// Wire the service and exporter from `config`.
  pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
    let service = CheckInService::new(store, Geofence::new(config.geofence), config.program);
    let exporter = ReportExporter::new(config.report.clone(), config.program.offset());
    Self {
      service,
      exporter: Arc::new(exporter),
      config: Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`], including the JSON API under `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CheckInStore + Clone + 'static,
{
  let api = muster_api::api_router(Arc::clone(state.service.store()));

  Router::new()
    .route("/",                         get(handlers::index))
    .route("/health",                   get(handlers::health))
    .route("/submit",                   post(handlers::submit::handler::<S>))
    .route("/admin",                    get(handlers::admin::handler::<S>))
    .route("/download/{course}/{week}", get(handlers::download::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use muster_core::record::NewCheckIn;
  use muster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.ensure_schema().await.unwrap();
    AppState::new(Arc::new(store), ServerConfig {
      store_path: PathBuf::from(":memory:"),
      ..ServerConfig::default()
    })
  }

  async fn oneshot_raw(
    state:   AppState<SqliteStore>,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn post_form(state: AppState<SqliteStore>, body: &str) -> axum::response::Response {
    oneshot_raw(
      state,
      "POST",
      "/submit",
      vec![(header::CONTENT_TYPE, "application/x-www-form-urlencoded")],
      body,
    ).await
  }

  async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn form_body(lat: Option<f64>, lon: Option<f64>, email: &str) -> String {
    let mut body = format!(
      "first_name=Thandi&middle_name=&last_name=Nkosi&id_passport=9001015009087\
       &email={email}&phone=0825550101&ethnicity=&gender=Female&course=Data101"
    );
    if let Some(lat) = lat {
      body.push_str(&format!("&latitude={lat}"));
    }
    if let Some(lon) = lon {
      body.push_str(&format!("&longitude={lon}"));
    }
    body
  }

  fn campus() -> GeofenceConfig { GeofenceConfig::default() }

  fn check_in(first: &str, course: &str, week: u32) -> NewCheckIn {
    NewCheckIn {
      first_name:  first.into(),
      middle_name: None,
      last_name:   "Nkosi".into(),
      id_passport: "9001015009087".into(),
      email:       "thandi@example.com".into(),
      phone:       "0825550101".into(),
      ethnicity:   None,
      gender:      None,
      course:      course.into(),
      week_number: week,
    }
  }

  #[tokio::test]
  async fn state_wires_configured_geofence() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let fence = GeofenceConfig { max_distance_km: 0.5, ..campus() };
    let state = AppState::new(Arc::new(store), ServerConfig {
      geofence: fence,
      ..ServerConfig::default()
    });
    assert_eq!(state.service.geofence().config(), &fence);
  }

  // ── Pages ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_returns_ok() {
    let resp = oneshot_raw(make_state().await, "GET", "/health", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
  }

  #[tokio::test]
  async fn index_serves_form_with_location_fields() {
    let resp = oneshot_raw(make_state().await, "GET", "/", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("action=\"/submit\""));
    assert!(html.contains("name=\"latitude\""));
    assert!(html.contains("name=\"longitude\""));
  }

  // ── Submit ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn on_campus_submission_is_recorded() {
    let state = make_state().await;
    let c = campus();
    let resp = post_form(
      state.clone(),
      &form_body(Some(c.latitude), Some(c.longitude), "thandi@example.com"),
    ).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Thank you, Thandi!"));

    let all = state.service.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].middle_name, None);
    assert_eq!(all[0].gender.as_deref(), Some("Female"));
  }

  #[tokio::test]
  async fn missing_location_returns_400() {
    let state = make_state().await;
    let resp = post_form(
      state.clone(),
      &form_body(Some(campus().latitude), None, "thandi@example.com"),
    ).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Location Error"));
    assert!(state.service.list_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn distant_submission_returns_403_with_distance() {
    let state = make_state().await;
    let c = campus();
    let resp = post_form(
      state.clone(),
      &form_body(Some(c.latitude + 0.01), Some(c.longitude), "thandi@example.com"),
    ).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(body_text(resp).await.contains("1112m away"));
    assert!(state.service.list_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn blank_required_field_returns_422() {
    let state = make_state().await;
    let c = campus();
    let resp = post_form(
      state.clone(),
      &form_body(Some(c.latitude), Some(c.longitude), ""),
    ).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(resp).await.contains("email"));
    assert!(state.service.list_all().await.unwrap().is_empty());
  }

  // ── Admin ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_lists_escaped_records() {
    let state = make_state().await;
    state.service.store().insert(check_in("<b>Sizwe</b>", "Data101", 2)).await.unwrap();

    let resp = oneshot_raw(state, "GET", "/admin", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("&lt;b&gt;Sizwe&lt;/b&gt; Nkosi"));
    assert!(!html.contains("<b>Sizwe</b>"));
    assert!(html.contains("/download/Data101/2"));
  }

  // ── Download ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn download_without_rows_returns_no_data() {
    let resp = oneshot_raw(make_state().await, "GET", "/download/Data101/3", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("No check-ins for Data101 in Week 3."));
  }

  #[tokio::test]
  async fn download_returns_spreadsheet_attachment() {
    let state = make_state().await;
    state.service.store().insert(check_in("Sizwe", "Data101", 3)).await.unwrap();

    let resp = oneshot_raw(state, "GET", "/download/Data101/3", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert_eq!(ct, muster_export::CONTENT_TYPE);
    let cd = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(cd.contains("SLABS_Data101_Week_3.xlsx"), "Content-Disposition: {cd}");

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
  }

  #[tokio::test]
  async fn download_week_zero_is_bad_request() {
    let resp = oneshot_raw(make_state().await, "GET", "/download/Data101/0", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── API ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_is_nested() {
    let state = make_state().await;
    state.service.store().insert(check_in("Sizwe", "Data101", 3)).await.unwrap();

    let resp = oneshot_raw(state, "GET", "/api/check-ins/Data101/3", vec![], "").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("\"first_name\":\"Sizwe\""));
  }
}
