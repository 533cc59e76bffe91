//! Built-in country-center dataset — the last-resort coordinate source.
//!
//! Single representative coordinate pair per country, used only when the
//! geocoder produced nothing. Matching: exact pass first, then substring,
//! with the table ordered longest key first so "united states of america"
//! lands on "united states" and never on "usa".

use super::types::{GeoFix, GeoSource};

struct CountryCenter {
    key: &'static str, // lowercase; ordered longest first
    lat: f64,
    lon: f64,
}

const COUNTRY_CENTERS: &[CountryCenter] = &[
    CountryCenter { key: "united kingdom", lat: 55.3781, lon: -3.4360 },
    CountryCenter { key: "united states", lat: 39.8283, lon: -98.5795 },
    CountryCenter { key: "south africa", lat: -30.5595, lon: 22.9375 },
    CountryCenter { key: "australia", lat: -25.2744, lon: 133.7751 },
    CountryCenter { key: "germany", lat: 51.1657, lon: 10.4515 },
    CountryCenter { key: "france", lat: 46.6031, lon: 1.8883 },
    CountryCenter { key: "canada", lat: 56.1304, lon: -106.3468 },
    CountryCenter { key: "brazil", lat: -14.2350, lon: -51.9253 },
    CountryCenter { key: "russia", lat: 61.5240, lon: 105.3188 },
    CountryCenter { key: "mexico", lat: 23.6345, lon: -102.5528 },
    CountryCenter { key: "india", lat: 20.5937, lon: 78.9629 },
    CountryCenter { key: "china", lat: 35.8617, lon: 104.1954 },
    CountryCenter { key: "japan", lat: 36.2048, lon: 138.2529 },
    CountryCenter { key: "usa", lat: 39.8283, lon: -98.5795 },
    CountryCenter { key: "uk", lat: 55.3781, lon: -3.4360 },
];

fn lookup(name: &str) -> Option<&'static CountryCenter> {
    let n = name.trim().to_lowercase();
    if n.is_empty() {
        return None;
    }
    for entry in COUNTRY_CENTERS {
        if entry.key == n {
            return Some(entry);
        }
    }
    for entry in COUNTRY_CENTERS {
        if n.contains(entry.key) {
            return Some(entry);
        }
    }
    None
}

/// Representative coordinates for a country, labeled as approximate.
pub fn country_center(name: &str) -> Option<GeoFix> {
    lookup(name).map(|entry| GeoFix {
        lat: entry.lat,
        lon: entry.lon,
        display_name: format!("Approximate center of {}", name),
        source: GeoSource::CountryCenter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_south_africa_center() {
        let fix = country_center("South Africa").unwrap();
        assert_relative_eq!(fix.lat, -30.5595);
        assert_relative_eq!(fix.lon, 22.9375);
        assert_eq!(fix.display_name, "Approximate center of South Africa");
        assert_eq!(fix.source, GeoSource::CountryCenter);
    }

    #[test]
    fn test_substring_match() {
        let fix = country_center("Republic of South Africa").unwrap();
        assert_relative_eq!(fix.lat, -30.5595);
    }

    #[test]
    fn test_longer_key_beats_shorter() {
        // "united states of america" contains both "united states" and
        // "usa" is absent; the long-form key must win regardless.
        let fix = country_center("United States of America").unwrap();
        assert_relative_eq!(fix.lat, 39.8283);
        assert_relative_eq!(fix.lon, -98.5795);
    }

    #[test]
    fn test_exact_short_alias() {
        let fix = country_center("UK").unwrap();
        assert_relative_eq!(fix.lat, 55.3781);
    }

    #[test]
    fn test_unknown_country() {
        assert!(country_center("Atlantis").is_none());
        assert!(country_center("").is_none());
    }
}
