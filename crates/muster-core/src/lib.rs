//! Core types and trait definitions for the Muster attendance service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! admission pipeline (geofence, week derivation, record construction) lives
//! here; storage backends implement [`store::CheckInStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod geofence;
pub mod record;
pub mod service;
pub mod store;
pub mod week;

pub use error::{CheckInError, Result};
