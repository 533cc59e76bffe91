//! Local-time resolution with a deterministic fallback chain.
//!
//! Order: TimezoneDB by position (needs an API key) → rounded
//! longitude-based UTC offset → country-name timezone table →
//! machine-local wall clock marked approximate. Every branch yields a
//! printable pair; this module never fails.

use crate::location::LocationError;
use chrono::Utc;
use chrono_tz::Tz;
use serde::Deserialize;
use std::time::Duration;

/// 12-hour timestamp format used everywhere a local time is shown.
pub const TIME_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

const TIMEZONEDB_URL: &str = "http://api.timezonedb.com/v2.1/get-time-zone";
const USER_AGENT: &str = "phonetrace/0.1 (phone-number-area-mapper)";
const TIMEOUT: Duration = Duration::from_secs(10);

/// A local-time snapshot. Only meaningful at the instant it was produced;
/// never re-evaluated later.
#[derive(Debug, Clone)]
pub struct LocalTime {
    pub formatted: String,
    /// IANA zone name, "UTC±N" estimate, or an explicit approximate label.
    pub zone_label: String,
}

#[derive(Deserialize)]
struct TimezoneDbResponse {
    status: String,
    #[serde(default, rename = "zoneName")]
    zone_name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn timezonedb_lookup(api_key: &str, lat: f64, lon: f64) -> Result<String, LocationError> {
    let url = format!(
        "{}?key={}&format=json&by=position&lat={}&lng={}",
        TIMEZONEDB_URL, api_key, lat, lon,
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(TIMEOUT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let body: TimezoneDbResponse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    if body.status != "OK" {
        return Err(LocationError::InvalidResponse(
            body.message.unwrap_or(body.status),
        ));
    }

    body.zone_name
        .ok_or_else(|| LocationError::InvalidResponse("missing zoneName".into()))
}

/// Estimate local time from longitude alone: round(lon / 15) hours off UTC.
fn offset_estimate(lon: f64) -> LocalTime {
    let offset = (lon / 15.0).round() as i32;
    let shifted = Utc::now() + chrono::Duration::hours(i64::from(offset));
    LocalTime {
        formatted: shifted.format(TIME_FORMAT).to_string(),
        zone_label: format!("UTC{:+}", offset),
    }
}

fn zone_time(tz: Tz, label: &str) -> LocalTime {
    LocalTime {
        formatted: Utc::now().with_timezone(&tz).format(TIME_FORMAT).to_string(),
        zone_label: label.to_string(),
    }
}

fn local_approximate() -> LocalTime {
    LocalTime {
        formatted: chrono::Local::now().format(TIME_FORMAT).to_string(),
        zone_label: "Local time (approximate)".to_string(),
    }
}

// Ordered longest key first; exact pass before substring pass, same
// semantics as the country-center dataset.
const COUNTRY_TIMEZONES: &[(&str, &str)] = &[
    ("united kingdom", "Europe/London"),
    ("united states", "America/New_York"),
    ("south africa", "Africa/Johannesburg"),
    ("australia", "Australia/Sydney"),
    ("germany", "Europe/Berlin"),
    ("france", "Europe/Paris"),
    ("canada", "America/Toronto"),
    ("brazil", "America/Sao_Paulo"),
    ("russia", "Europe/Moscow"),
    ("mexico", "America/Mexico_City"),
    ("india", "Asia/Kolkata"),
    ("china", "Asia/Shanghai"),
    ("japan", "Asia/Tokyo"),
    ("usa", "America/New_York"),
    ("uk", "Europe/London"),
];

/// Representative IANA zone for a country name, if known.
pub fn country_timezone(name: &str) -> Option<&'static str> {
    let n = name.trim().to_lowercase();
    if n.is_empty() {
        return None;
    }
    for (key, tz) in COUNTRY_TIMEZONES {
        if *key == n {
            return Some(tz);
        }
    }
    for (key, tz) in COUNTRY_TIMEZONES {
        if n.contains(key) {
            return Some(tz);
        }
    }
    None
}

/// Resolve a local time for the lookup. Total by construction — every
/// combination of inputs lands on one of the four branches:
///
/// 1. coordinates + API key: TimezoneDB by position;
/// 2. coordinates, primary disabled or failed: longitude offset estimate;
/// 3. no coordinates, known country: country timezone table;
/// 4. otherwise: machine-local time, labeled approximate.
pub fn resolve(coords: Option<(f64, f64)>, country: &str, api_key: &str, offline: bool) -> LocalTime {
    if let Some((lat, lon)) = coords {
        if !offline && !api_key.is_empty() {
            match timezonedb_lookup(api_key, lat, lon) {
                Ok(zone) => {
                    if let Ok(tz) = zone.parse::<Tz>() {
                        return zone_time(tz, &zone);
                    }
                    eprintln!("  Warning: unrecognized zone '{}' from timezone service", zone);
                }
                Err(e) => eprintln!("  Warning: timezone lookup failed: {}", e),
            }
        }
        return offset_estimate(lon);
    }

    if let Some(zone) = country_timezone(country) {
        if let Ok(tz) = zone.parse::<Tz>() {
            return zone_time(tz, zone);
        }
    }

    local_approximate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_meridiem(t: &LocalTime) -> bool {
        t.formatted.ends_with("AM") || t.formatted.ends_with("PM")
    }

    #[test]
    fn test_offset_estimate_labels() {
        assert_eq!(offset_estimate(18.07).zone_label, "UTC+1");
        assert_eq!(offset_estimate(-74.0).zone_label, "UTC-5");
        assert_eq!(offset_estimate(0.0).zone_label, "UTC+0");
    }

    #[test]
    fn test_offset_rounds_at_zone_boundary() {
        // 112.5° is exactly halfway; round() goes away from zero, so the
        // estimate lands in the nearer-by-rounding zone on both sides.
        assert_eq!(offset_estimate(112.5).zone_label, "UTC+8");
        assert_eq!(offset_estimate(-112.5).zone_label, "UTC-8");
    }

    #[test]
    fn test_country_timezone_table() {
        assert_eq!(country_timezone("South Africa"), Some("Africa/Johannesburg"));
        assert_eq!(country_timezone("japan"), Some("Asia/Tokyo"));
        assert_eq!(country_timezone("Atlantis"), None);
        assert_eq!(country_timezone(""), None);
    }

    #[test]
    fn test_country_timezone_longer_key_first() {
        assert_eq!(
            country_timezone("United States of America"),
            Some("America/New_York"),
        );
        assert_eq!(country_timezone("united kingdom"), Some("Europe/London"));
    }

    #[test]
    fn test_branch_coords_without_key() {
        // Empty API key disables the primary path entirely.
        let t = resolve(Some((40.7128, -74.0060)), "United States", "", false);
        assert_eq!(t.zone_label, "UTC-5");
        assert!(has_meridiem(&t));
    }

    #[test]
    fn test_branch_coords_offline_ignores_key() {
        let t = resolve(Some((0.0, 0.0)), "", "some-key", true);
        assert_eq!(t.zone_label, "UTC+0");
    }

    #[test]
    fn test_branch_country_table() {
        let t = resolve(None, "South Africa", "", false);
        assert_eq!(t.zone_label, "Africa/Johannesburg");
        assert!(has_meridiem(&t));
    }

    #[test]
    fn test_branch_unknown_country_approximate() {
        let t = resolve(None, "Atlantis", "", false);
        assert_eq!(t.zone_label, "Local time (approximate)");
        assert!(has_meridiem(&t));
    }

    #[test]
    fn test_branch_no_inputs_approximate() {
        let t = resolve(None, "", "", false);
        assert_eq!(t.zone_label, "Local time (approximate)");
        assert!(!t.formatted.is_empty());
    }
}
