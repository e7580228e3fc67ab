//! Geofence validation — great-circle distance to the campus reference point.

use serde::Deserialize;

use crate::{CheckInError, Result};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Center and radius of the admission perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeofenceConfig {
  pub latitude:        f64,
  pub longitude:       f64,
  /// Inclusive admission radius.
  pub max_distance_km: f64,
}

impl Default for GeofenceConfig {
  /// 85 Grayston Drive, Morningside, Sandton with a 200 m radius.
  fn default() -> Self {
    Self {
      latitude:        -26.099059,
      longitude:       28.0538272,
      max_distance_km: 0.2,
    }
  }
}

// ─── Geofence ────────────────────────────────────────────────────────────────

/// A single circular perimeter. Pure; holds no state beyond its config.
#[derive(Debug, Clone, Copy)]
pub struct Geofence {
  config: GeofenceConfig,
}

impl Geofence {
  pub fn new(config: GeofenceConfig) -> Self { Self { config } }

  pub fn config(&self) -> &GeofenceConfig { &self.config }

  /// Haversine distance in kilometres from (`lat`, `lon`) to the center.
  pub fn distance_km(&self, lat: f64, lon: f64) -> f64 {
    let (lat1, lon1) = (lat.to_radians(), lon.to_radians());
    let (lat2, lon2) =
      (self.config.latitude.to_radians(), self.config.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2)
      + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
  }

  /// `true` iff the distance is at most `max_distance_km`.
  pub fn is_within_range(&self, lat: f64, lon: f64) -> bool {
    self.distance_km(lat, lon) <= self.config.max_distance_km
  }

  /// Distance in kilometres, or [`CheckInError::OutOfRange`] carrying the
  /// distance rounded to whole metres (never below 1).
  pub fn check(&self, lat: f64, lon: f64) -> Result<f64> {
    let distance = self.distance_km(lat, lon);
    if distance <= self.config.max_distance_km {
      Ok(distance)
    } else {
      let distance_m = (distance * 1000.0).round().max(1.0) as u64;
      Err(CheckInError::OutOfRange { distance_m })
    }
  }
}

// ─── Coordinate parsing ──────────────────────────────────────────────────────

/// Parse a submitted latitude/longitude pair.
///
/// Absent, blank, unparseable, non-finite or out-of-range values all mean the
/// client did not supply a usable location.
pub fn parse_coordinate(
  latitude: Option<&str>,
  longitude: Option<&str>,
) -> Result<(f64, f64)> {
  let lat = parse_axis(latitude, 90.0).ok_or(CheckInError::MissingLocation)?;
  let lon = parse_axis(longitude, 180.0).ok_or(CheckInError::MissingLocation)?;
  Ok((lat, lon))
}

fn parse_axis(raw: Option<&str>, bound: f64) -> Option<f64> {
  raw
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .and_then(|s| s.parse::<f64>().ok())
    .filter(|v| v.is_finite() && v.abs() <= bound)
}
