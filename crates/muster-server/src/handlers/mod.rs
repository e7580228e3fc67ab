pub mod admin;
pub mod download;
pub mod submit;

use axum::response::Html;

use crate::pages;

/// `GET /`
pub async fn index() -> Html<String> { Html(pages::index()) }

/// `GET /health`
pub async fn health() -> &'static str { "ok" }
