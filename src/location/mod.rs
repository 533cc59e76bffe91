//! Location resolution for phone-number service areas.
//!
//! Geocodes a region description via ordered Nominatim query variants and
//! falls back to a built-in country-center dataset when no candidate
//! survives the bounds check.

pub mod fallback;
pub mod geocoder;
pub mod types;

pub use fallback::country_center;
pub use geocoder::resolve;
pub use types::{format_coords, GeoFix, GeoOutcome, GeoSource, LocationError};
