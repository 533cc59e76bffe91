//! Core types for the location subsystem.

use serde::Serialize;
use std::fmt;

/// How a coordinate fix was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeoSource {
    /// Highest-importance Nominatim candidate of the first query variant
    /// that returned anything.
    Nominatim,
    /// Built-in country-center dataset, last resort.
    CountryCenter,
}

impl fmt::Display for GeoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nominatim => write!(f, "Nominatim"),
            Self::CountryCenter => write!(f, "Country center"),
        }
    }
}

/// A bounds-checked coordinate fix with provenance. Immutable once
/// produced; |lat| <= 90 and |lon| <= 180 always hold.
#[derive(Debug, Clone, Serialize)]
pub struct GeoFix {
    pub lat: f64,
    pub lon: f64,
    /// Provider display name, or an "Approximate center of …" label.
    pub display_name: String,
    pub source: GeoSource,
}

/// Outcome of a geocoding pass. `NoResult` tells the caller to try the
/// country-center fallback; it is a signal, not an error.
#[derive(Debug, Clone)]
pub enum GeoOutcome {
    Found(GeoFix),
    NoResult,
}

/// Transport and decoding failures inside a single lookup attempt. These
/// are logged and downgraded by the callers, never propagated as fatal.
#[derive(Debug)]
pub enum LocationError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for LocationError {}

/// Coordinates formatted to six decimal places, as shown in the summary
/// and embedded in the rendered map.
pub fn format_coords(lat: f64, lon: f64) -> String {
    format!("{:.6}, {:.6}", lat, lon)
}
