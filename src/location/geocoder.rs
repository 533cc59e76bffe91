//! Nominatim geocoding with ordered query variants.
//!
//! One blocking GET per variant, broader contextual queries first and bare
//! names last. The first variant that returns any candidate wins; only its
//! highest-importance candidate is considered, and an out-of-bounds winner
//! rejects the batch so the next variant gets a turn. Transport or decoding
//! failures downgrade to "no result for this attempt" — callers only ever
//! see a [`GeoOutcome`].

use super::types::{GeoFix, GeoOutcome, GeoSource, LocationError};
use serde::Deserialize;
use std::time::Duration;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "phonetrace/0.1 (phone-number-area-mapper)";
const RESULT_LIMIT: usize = 5;
const TIMEOUT: Duration = Duration::from_secs(10);

/// One Nominatim candidate. Coordinates arrive as strings.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub importance: Option<f64>,
}

/// The ordered query variants for a region description. Fully blank
/// variants are dropped; a trailing ", " from an empty country context is
/// kept as-is, matching what the search endpoint tolerates.
pub fn build_queries(region: &str, country: &str) -> Vec<String> {
    let variants = vec![
        format!("{}, {}", region, country),
        format!("{} city, {}", region, country),
        format!("{} center, {}", region, country),
        format!("{} downtown, {}", region, country),
        region.to_string(),
        format!("{} city", region),
    ];
    variants
        .into_iter()
        .filter(|q| !q.trim().is_empty())
        .collect()
}

/// Pick the highest-importance candidate and bounds-check it. Only the top
/// candidate counts: if its coordinates are out of bounds or unparsable,
/// the whole batch is rejected.
pub fn select_candidate(results: &[SearchResult]) -> Option<GeoFix> {
    let best = results.iter().max_by(|a, b| {
        let ia = a.importance.unwrap_or(0.0);
        let ib = b.importance.unwrap_or(0.0);
        ia.partial_cmp(&ib).unwrap_or(std::cmp::Ordering::Equal)
    })?;

    let lat: f64 = best.lat.parse().ok()?;
    let lon: f64 = best.lon.parse().ok()?;
    if lat.abs() > 90.0 || lon.abs() > 180.0 {
        return None;
    }

    let display_name = if best.display_name.is_empty() {
        "Unknown location".to_string()
    } else {
        best.display_name.clone()
    };

    Some(GeoFix {
        lat,
        lon,
        display_name,
        source: GeoSource::Nominatim,
    })
}

fn search(query: &str) -> Result<Vec<SearchResult>, LocationError> {
    let url = format!(
        "{}?q={}&format=json&limit={}&addressdetails=1",
        SEARCH_URL,
        urlencod(query),
        RESULT_LIMIT,
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(TIMEOUT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))
}

/// Resolve a region description through the variant chain.
pub fn resolve(region: &str, country: &str) -> GeoOutcome {
    for query in build_queries(region, country) {
        match search(&query) {
            Ok(results) => {
                if results.is_empty() {
                    continue;
                }
                if let Some(fix) = select_candidate(&results) {
                    return GeoOutcome::Found(fix);
                }
                // top candidate out of bounds; next variant
            }
            Err(e) => eprintln!("  Warning: geocoding '{}' failed: {}", query, e),
        }
    }
    GeoOutcome::NoResult
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

fn urlencod(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '&' => "%26".to_string(),
            '=' => "%3D".to_string(),
            '+' => "%2B".to_string(),
            ',' => "%2C".to_string(),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '~' => {
                c.to_string()
            }
            _ => format!("%{:02X}", c as u32),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(lat: &str, lon: &str, name: &str, importance: Option<f64>) -> SearchResult {
        SearchResult {
            lat: lat.to_string(),
            lon: lon.to_string(),
            display_name: name.to_string(),
            importance,
        }
    }

    #[test]
    fn test_build_queries_with_country() {
        let queries = build_queries("Cape Town", "South Africa");
        assert_eq!(
            queries,
            vec![
                "Cape Town, South Africa",
                "Cape Town city, South Africa",
                "Cape Town center, South Africa",
                "Cape Town downtown, South Africa",
                "Cape Town",
                "Cape Town city",
            ]
        );
    }

    #[test]
    fn test_build_queries_empty_country() {
        // Contextual variants keep their shape; nothing collapses to blank.
        let queries = build_queries("London", "");
        assert_eq!(queries.len(), 6);
        assert_eq!(queries[0], "London, ");
        assert_eq!(queries[4], "London");
    }

    #[test]
    fn test_build_queries_all_blank() {
        assert!(build_queries("", "").is_empty());
    }

    #[test]
    fn test_select_highest_importance() {
        let results = vec![
            result("51.5", "-0.12", "London, UK", Some(0.4)),
            result("42.98", "-81.24", "London, Ontario", Some(0.9)),
        ];
        let fix = select_candidate(&results).unwrap();
        assert!((fix.lat - 42.98).abs() < 1e-9);
        assert_eq!(fix.display_name, "London, Ontario");
        assert_eq!(fix.source, GeoSource::Nominatim);
    }

    #[test]
    fn test_select_missing_importance_defaults_low() {
        let results = vec![
            result("10.0", "10.0", "Scored", Some(0.2)),
            result("20.0", "20.0", "Unscored", None),
        ];
        let fix = select_candidate(&results).unwrap();
        assert_eq!(fix.display_name, "Scored");
    }

    #[test]
    fn test_select_rejects_out_of_bounds_winner() {
        // The in-bounds runner-up is NOT considered: the batch is rejected.
        let results = vec![
            result("91.0", "10.0", "Broken", Some(0.9)),
            result("10.0", "10.0", "Fine", Some(0.5)),
        ];
        assert!(select_candidate(&results).is_none());
    }

    #[test]
    fn test_select_rejects_unparsable_coordinates() {
        let results = vec![result("not-a-lat", "10.0", "Broken", Some(0.9))];
        assert!(select_candidate(&results).is_none());
    }

    #[test]
    fn test_select_empty() {
        assert!(select_candidate(&[]).is_none());
    }

    #[test]
    fn test_select_fills_unknown_display_name() {
        let results = vec![result("1.0", "2.0", "", Some(0.5))];
        let fix = select_candidate(&results).unwrap();
        assert_eq!(fix.display_name, "Unknown location");
    }

    #[test]
    fn test_urlencod() {
        assert_eq!(urlencod("Cape Town, South Africa"), "Cape%20Town%2C%20South%20Africa");
        assert_eq!(urlencod("a&b=c+d"), "a%26b%3Dc%2Bd");
        assert_eq!(urlencod("plain-name_1.~"), "plain-name_1.~");
    }
}
