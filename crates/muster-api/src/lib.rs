//! JSON read API for Muster.
//!
//! Exposes an axum [`Router`] backed by any [`muster_core::store::CheckInStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", muster_api::api_router(store.clone()))
//! ```

pub mod check_ins;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use muster_core::store::CheckInStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CheckInStore + 'static,
{
  Router::new()
    .route("/check-ins", get(check_ins::list::<S>))
    .route("/check-ins/{course}/{week}", get(check_ins::roster::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use muster_core::record::{CheckInRecord, NewCheckIn};
  use muster_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn check_in(course: &str, week: u32) -> NewCheckIn {
    NewCheckIn {
      first_name:  "Mpho".into(),
      middle_name: None,
      last_name:   "Khumalo".into(),
      id_passport: "X7788990".into(),
      email:       "mpho@example.com".into(),
      phone:       "0835550177".into(),
      ethnicity:   None,
      gender:      None,
      course:      course.into(),
      week_number: week,
    }
  }

  async fn seeded() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.insert(check_in("Data101", 3)).await.unwrap();
    store.insert(check_in("Data101", 4)).await.unwrap();
    store.insert(check_in("Web201", 3)).await.unwrap();
    Arc::new(store)
  }

  async fn get_json(store: Arc<SqliteStore>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn list_returns_newest_first() {
    let (status, body) = get_json(seeded().await, "/check-ins").await;
    assert_eq!(status, StatusCode::OK);

    let records: Vec<CheckInRecord> = serde_json::from_value(body).unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
  }

  #[tokio::test]
  async fn roster_filters_by_course_and_week() {
    let (status, body) = get_json(seeded().await, "/check-ins/Data101/3").await;
    assert_eq!(status, StatusCode::OK);

    let records: Vec<CheckInRecord> = serde_json::from_value(body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].course, "Data101");
    assert_eq!(records[0].week_number, 3);
  }

  #[tokio::test]
  async fn roster_without_matches_is_empty_list() {
    let (status, body) = get_json(seeded().await, "/check-ins/Data101/9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
  }

  #[tokio::test]
  async fn week_zero_is_bad_request() {
    let (status, body) = get_json(seeded().await, "/check-ins/Data101/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("week"));
  }
}
