//! Error types for the report exporter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("spreadsheet error: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
