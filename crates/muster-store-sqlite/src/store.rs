//! [`SqliteStore`] — the SQLite implementation of [`CheckInStore`].

use std::{path::Path, sync::Arc};

use chrono::{SubsecRound as _, Utc};
use muster_core::{
  record::{CheckInRecord, NewCheckIn},
  store::CheckInStore,
};
use tokio::sync::OnceCell;

use crate::{
  Result,
  encode::{RawCheckIn, encode_dt},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A check-in store backed by a single SQLite file.
///
/// Opening does not touch the schema. [`CheckInStore::ensure_schema`] runs the
/// DDL; until it has succeeded once, every data operation retries it first, so
/// a failed start-up attempt recovers on the next request.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  schema: Arc<OnceCell<()>>,
}

impl SqliteStore {
  /// Open (or create) the database file at `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self::from_connection(conn))
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self::from_connection(conn))
  }

  fn from_connection(conn: tokio_rusqlite::Connection) -> Self {
    Self { conn, schema: Arc::new(OnceCell::new()) }
  }

  async fn query(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<CheckInRecord>> {
    self.ensure_schema().await?;

    let raws: Vec<RawCheckIn> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawCheckIn::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCheckIn::into_record).collect()
  }
}

// ─── CheckInStore impl ───────────────────────────────────────────────────────

impl CheckInStore for SqliteStore {
  type Error = crate::Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .schema
      .get_or_try_init(|| async {
        self
          .conn
          .call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
          })
          .await?;
        tracing::debug!("check_ins schema ready");
        Ok::<_, crate::Error>(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, input: NewCheckIn) -> Result<CheckInRecord> {
    self.ensure_schema().await?;

    let row = input.clone();

    // Id and time are both assigned on the connection thread so they sort
    // the same way.
    let (id, checked_in_at) = self
      .conn
      .call(move |conn| {
        let checked_in_at = Utc::now().trunc_subsecs(6);
        conn.execute(
          "INSERT INTO check_ins (
             first_name, middle_name, last_name, id_passport, email, phone,
             ethnicity, gender, course, week_number, check_in_time
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            row.first_name,
            row.middle_name,
            row.last_name,
            row.id_passport,
            row.email,
            row.phone,
            row.ethnicity,
            row.gender,
            row.course,
            row.week_number,
            encode_dt(checked_in_at),
          ],
        )?;
        Ok((conn.last_insert_rowid(), checked_in_at))
      })
      .await?;

    Ok(input.into_record(id, checked_in_at))
  }

  async fn list_all(&self) -> Result<Vec<CheckInRecord>> {
    self
      .query(
        format!("SELECT {COLUMNS} FROM check_ins ORDER BY check_in_time DESC, id DESC"),
        Vec::new(),
      )
      .await
  }

  async fn list_by_course_and_week(&self, course: &str, week: u32) -> Result<Vec<CheckInRecord>> {
    self
      .query(
        format!(
          "SELECT {COLUMNS} FROM check_ins
           WHERE course = ?1 AND week_number = ?2
           ORDER BY id"
        ),
        vec![course.to_owned().into(), i64::from(week).into()],
      )
      .await
  }
}
