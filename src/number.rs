//! Phone number parsing and offline descriptor lookup.
//!
//! Parsing and validation go through the `phonenumber` crate (international
//! numbering rules). Region, country, and carrier descriptions come from
//! the built-in datasets below — the same coarse, offline class of data a
//! numbering plan exposes.

use phonenumber::Mode;
use std::fmt;

/// Sentinel used when no carrier can be derived for a number.
pub const UNKNOWN_CARRIER: &str = "Unknown carrier";

/// Errors from parsing or describing a number.
#[derive(Debug)]
pub enum NumberError {
    /// Input could not be parsed as an international number.
    Unparseable(String),
    /// Parsed, but fails validation against its numbering plan.
    Invalid,
    /// Valid, but no region description can be derived.
    NoRegion,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable(msg) => write!(f, "Invalid phone number format: {}", msg),
            Self::Invalid => write!(f, "Phone number is not valid for its numbering plan"),
            Self::NoRegion => write!(f, "Could not determine a location from this phone number"),
        }
    }
}

impl std::error::Error for NumberError {}

/// A validated phone number.
#[derive(Debug, Clone)]
pub struct ParsedNumber {
    /// E.164 rendering, e.g. "+16502530000".
    pub e164: String,
    /// Human-readable international rendering, e.g. "+1 650-253-0000".
    pub international: String,
    /// Country calling code, e.g. 1, 44, 27.
    pub calling_code: u16,
    /// National significant number as digits (leading zeros preserved).
    pub national: String,
    /// ISO 3166-1 alpha-2 region, e.g. "US". None for non-geographic
    /// ranges such as +800 universal freephone.
    pub region_id: Option<String>,
}

/// Parse and validate a number in international format (leading "+").
///
/// No default region is assumed, so input without a country calling code
/// fails here rather than guessing.
pub fn parse(raw: &str) -> Result<ParsedNumber, NumberError> {
    let number =
        phonenumber::parse(None, raw).map_err(|e| NumberError::Unparseable(e.to_string()))?;

    if !phonenumber::is_valid(&number) {
        return Err(NumberError::Invalid);
    }

    let e164 = number.format().mode(Mode::E164).to_string();
    let calling_code = number.code().value();

    // The national significant number, sliced out of E.164 so leading
    // zeros survive (NationalNumber::value() is a bare u64).
    let cc_digits = calling_code.to_string();
    let national = e164
        .strip_prefix('+')
        .and_then(|s| s.strip_prefix(cc_digits.as_str()))
        .unwrap_or_default()
        .to_string();

    Ok(ParsedNumber {
        international: number.format().mode(Mode::International).to_string(),
        e164,
        calling_code,
        national,
        region_id: number.country().id().map(|id| id.as_ref().to_string()),
    })
}

/// Textual geographic guess for a number: region description, country name,
/// carrier name. Read-only after creation.
#[derive(Debug, Clone)]
pub struct NumberDescriptor {
    /// City/region name when the number is specific enough, country name
    /// otherwise.
    pub general_area: String,
    /// Country name (falls back to the raw ISO code for exotic regions).
    pub country: String,
    /// Carrier name, or [`UNKNOWN_CARRIER`].
    pub carrier: String,
}

/// Derive descriptors for a validated number from the built-in datasets.
/// No network access. Fails only when no region description at all can be
/// derived — the pipeline cannot proceed without a country-level guess.
pub fn describe(number: &ParsedNumber) -> Result<NumberDescriptor, NumberError> {
    let region_id = number.region_id.as_deref().ok_or(NumberError::NoRegion)?;

    let country = country_name(region_id)
        .map(str::to_string)
        .unwrap_or_else(|| region_id.to_string());

    let general_area = match area_for(region_id, &number.national) {
        Some(area) => area.to_string(),
        None => country.clone(),
    };

    if general_area.trim().is_empty() || general_area == "None" {
        return Err(NumberError::NoRegion);
    }

    let carrier = carrier_for(region_id, &number.national)
        .unwrap_or(UNKNOWN_CARRIER)
        .to_string();

    Ok(NumberDescriptor {
        general_area,
        country,
        carrier,
    })
}

// ─── Built-in descriptor datasets ───────────────────────────────

struct AreaPrefix {
    region: &'static str, // ISO 3166-1 alpha-2
    prefix: &'static str, // leading national-number digits
    area: &'static str,
}

/// Curated area-code dataset. Longest matching prefix wins; anything not
/// listed falls back to the country name.
const AREA_PREFIXES: &[AreaPrefix] = &[
    // United States
    AreaPrefix { region: "US", prefix: "212", area: "New York, NY" },
    AreaPrefix { region: "US", prefix: "213", area: "Los Angeles, CA" },
    AreaPrefix { region: "US", prefix: "202", area: "Washington, DC" },
    AreaPrefix { region: "US", prefix: "206", area: "Seattle, WA" },
    AreaPrefix { region: "US", prefix: "305", area: "Miami, FL" },
    AreaPrefix { region: "US", prefix: "312", area: "Chicago, IL" },
    AreaPrefix { region: "US", prefix: "415", area: "San Francisco, CA" },
    AreaPrefix { region: "US", prefix: "617", area: "Boston, MA" },
    AreaPrefix { region: "US", prefix: "650", area: "Mountain View, CA" },
    AreaPrefix { region: "US", prefix: "713", area: "Houston, TX" },
    // Canada
    AreaPrefix { region: "CA", prefix: "416", area: "Toronto, ON" },
    AreaPrefix { region: "CA", prefix: "514", area: "Montreal, QC" },
    AreaPrefix { region: "CA", prefix: "604", area: "Vancouver, BC" },
    AreaPrefix { region: "CA", prefix: "613", area: "Ottawa, ON" },
    // United Kingdom
    AreaPrefix { region: "GB", prefix: "20", area: "London" },
    AreaPrefix { region: "GB", prefix: "29", area: "Cardiff" },
    AreaPrefix { region: "GB", prefix: "113", area: "Leeds" },
    AreaPrefix { region: "GB", prefix: "121", area: "Birmingham" },
    AreaPrefix { region: "GB", prefix: "131", area: "Edinburgh" },
    AreaPrefix { region: "GB", prefix: "141", area: "Glasgow" },
    AreaPrefix { region: "GB", prefix: "161", area: "Manchester" },
    // South Africa
    AreaPrefix { region: "ZA", prefix: "11", area: "Johannesburg" },
    AreaPrefix { region: "ZA", prefix: "12", area: "Pretoria" },
    AreaPrefix { region: "ZA", prefix: "21", area: "Cape Town" },
    AreaPrefix { region: "ZA", prefix: "31", area: "Durban" },
    AreaPrefix { region: "ZA", prefix: "41", area: "Gqeberha" },
    // Australia
    AreaPrefix { region: "AU", prefix: "2", area: "New South Wales" },
    AreaPrefix { region: "AU", prefix: "3", area: "Victoria" },
    AreaPrefix { region: "AU", prefix: "7", area: "Queensland" },
    AreaPrefix { region: "AU", prefix: "8", area: "South Australia and Western Australia" },
    // Germany
    AreaPrefix { region: "DE", prefix: "30", area: "Berlin" },
    AreaPrefix { region: "DE", prefix: "40", area: "Hamburg" },
    AreaPrefix { region: "DE", prefix: "69", area: "Frankfurt am Main" },
    AreaPrefix { region: "DE", prefix: "89", area: "Munich" },
    AreaPrefix { region: "DE", prefix: "221", area: "Cologne" },
    // France
    AreaPrefix { region: "FR", prefix: "1", area: "Paris, Île-de-France" },
    // India
    AreaPrefix { region: "IN", prefix: "11", area: "New Delhi" },
    AreaPrefix { region: "IN", prefix: "22", area: "Mumbai" },
    AreaPrefix { region: "IN", prefix: "33", area: "Kolkata" },
    AreaPrefix { region: "IN", prefix: "44", area: "Chennai" },
    AreaPrefix { region: "IN", prefix: "80", area: "Bengaluru" },
    // Sweden
    AreaPrefix { region: "SE", prefix: "8", area: "Stockholm" },
    AreaPrefix { region: "SE", prefix: "31", area: "Gothenburg" },
    AreaPrefix { region: "SE", prefix: "40", area: "Malmö" },
    // Japan
    AreaPrefix { region: "JP", prefix: "3", area: "Tokyo" },
    AreaPrefix { region: "JP", prefix: "6", area: "Osaka" },
];

struct CarrierPrefix {
    region: &'static str,
    prefix: &'static str,
    name: &'static str,
}

/// Curated mobile-prefix → carrier dataset. NANPA countries allocate by
/// geography, not carrier, so US/CA numbers always hit the sentinel.
const CARRIER_PREFIXES: &[CarrierPrefix] = &[
    // South Africa
    CarrierPrefix { region: "ZA", prefix: "72", name: "Vodacom" },
    CarrierPrefix { region: "ZA", prefix: "82", name: "Vodacom" },
    CarrierPrefix { region: "ZA", prefix: "73", name: "MTN" },
    CarrierPrefix { region: "ZA", prefix: "78", name: "MTN" },
    CarrierPrefix { region: "ZA", prefix: "83", name: "MTN" },
    CarrierPrefix { region: "ZA", prefix: "74", name: "Cell C" },
    CarrierPrefix { region: "ZA", prefix: "84", name: "Cell C" },
    CarrierPrefix { region: "ZA", prefix: "81", name: "Telkom Mobile" },
    // United Kingdom
    CarrierPrefix { region: "GB", prefix: "7911", name: "Vodafone" },
    // Germany
    CarrierPrefix { region: "DE", prefix: "151", name: "Telekom" },
    CarrierPrefix { region: "DE", prefix: "160", name: "Telekom" },
    CarrierPrefix { region: "DE", prefix: "170", name: "Telekom" },
    CarrierPrefix { region: "DE", prefix: "171", name: "Telekom" },
    CarrierPrefix { region: "DE", prefix: "175", name: "Telekom" },
    CarrierPrefix { region: "DE", prefix: "152", name: "Vodafone" },
    CarrierPrefix { region: "DE", prefix: "172", name: "Vodafone" },
    CarrierPrefix { region: "DE", prefix: "173", name: "Vodafone" },
    CarrierPrefix { region: "DE", prefix: "174", name: "Vodafone" },
    CarrierPrefix { region: "DE", prefix: "157", name: "O2" },
    CarrierPrefix { region: "DE", prefix: "163", name: "O2" },
    CarrierPrefix { region: "DE", prefix: "176", name: "O2" },
    CarrierPrefix { region: "DE", prefix: "177", name: "O2" },
    CarrierPrefix { region: "DE", prefix: "178", name: "O2" },
    CarrierPrefix { region: "DE", prefix: "179", name: "O2" },
    // Sweden
    CarrierPrefix { region: "SE", prefix: "70", name: "Telia" },
    CarrierPrefix { region: "SE", prefix: "73", name: "Tele2" },
    CarrierPrefix { region: "SE", prefix: "76", name: "Telenor" },
];

fn area_for(region: &str, national: &str) -> Option<&'static str> {
    AREA_PREFIXES
        .iter()
        .filter(|e| e.region == region && national.starts_with(e.prefix))
        .max_by_key(|e| e.prefix.len())
        .map(|e| e.area)
}

fn carrier_for(region: &str, national: &str) -> Option<&'static str> {
    CARRIER_PREFIXES
        .iter()
        .filter(|e| e.region == region && national.starts_with(e.prefix))
        .max_by_key(|e| e.prefix.len())
        .map(|e| e.name)
}

/// Display name for an ISO 3166-1 alpha-2 region.
pub fn country_name(region_id: &str) -> Option<&'static str> {
    let name = match region_id {
        "US" => "United States",
        "CA" => "Canada",
        "MX" => "Mexico",
        "BR" => "Brazil",
        "AR" => "Argentina",
        "CO" => "Colombia",
        "PE" => "Peru",
        "CL" => "Chile",
        "GB" => "United Kingdom",
        "IE" => "Ireland",
        "FR" => "France",
        "DE" => "Germany",
        "IT" => "Italy",
        "ES" => "Spain",
        "PT" => "Portugal",
        "NL" => "Netherlands",
        "BE" => "Belgium",
        "CH" => "Switzerland",
        "AT" => "Austria",
        "SE" => "Sweden",
        "NO" => "Norway",
        "DK" => "Denmark",
        "FI" => "Finland",
        "IS" => "Iceland",
        "PL" => "Poland",
        "CZ" => "Czech Republic",
        "HU" => "Hungary",
        "RO" => "Romania",
        "GR" => "Greece",
        "UA" => "Ukraine",
        "RU" => "Russia",
        "TR" => "Turkey",
        "EG" => "Egypt",
        "MA" => "Morocco",
        "NG" => "Nigeria",
        "KE" => "Kenya",
        "ET" => "Ethiopia",
        "TZ" => "Tanzania",
        "ZA" => "South Africa",
        "IL" => "Israel",
        "SA" => "Saudi Arabia",
        "AE" => "United Arab Emirates",
        "QA" => "Qatar",
        "KW" => "Kuwait",
        "OM" => "Oman",
        "BH" => "Bahrain",
        "YE" => "Yemen",
        "JO" => "Jordan",
        "LB" => "Lebanon",
        "IQ" => "Iraq",
        "IR" => "Iran",
        "PK" => "Pakistan",
        "IN" => "India",
        "BD" => "Bangladesh",
        "LK" => "Sri Lanka",
        "NP" => "Nepal",
        "AF" => "Afghanistan",
        "CN" => "China",
        "JP" => "Japan",
        "KR" => "South Korea",
        "TH" => "Thailand",
        "VN" => "Vietnam",
        "PH" => "Philippines",
        "SG" => "Singapore",
        "MY" => "Malaysia",
        "ID" => "Indonesia",
        "AU" => "Australia",
        "NZ" => "New Zealand",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_us() {
        let parsed = parse("+16502530000").unwrap();
        assert_eq!(parsed.calling_code, 1);
        assert_eq!(parsed.national, "6502530000");
        assert_eq!(parsed.e164, "+16502530000");
        assert_eq!(parsed.region_id.as_deref(), Some("US"));
    }

    #[test]
    fn test_parse_requires_country_code() {
        // National format without "+<cc>" cannot be attributed to a plan.
        assert!(parse("6502530000").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("notanumber").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_calling_code() {
        assert!(parse("+999123456789").is_err());
    }

    #[test]
    fn test_describe_area_specific() {
        let parsed = parse("+16502530000").unwrap();
        let desc = describe(&parsed).unwrap();
        assert_eq!(desc.general_area, "Mountain View, CA");
        assert_eq!(desc.country, "United States");
        assert_eq!(desc.carrier, UNKNOWN_CARRIER);
    }

    #[test]
    fn test_describe_london_landline() {
        let parsed = parse("+442070313000").unwrap();
        let desc = describe(&parsed).unwrap();
        assert_eq!(desc.general_area, "London");
        assert_eq!(desc.country, "United Kingdom");
    }

    #[test]
    fn test_describe_mobile_country_level() {
        // ZA mobile: no area entry, so the description is the country name,
        // and the prefix dataset attributes the carrier.
        let parsed = parse("+27821234567").unwrap();
        let desc = describe(&parsed).unwrap();
        assert_eq!(desc.general_area, "South Africa");
        assert_eq!(desc.country, "South Africa");
        assert_eq!(desc.carrier, "Vodacom");
    }

    #[test]
    fn test_carrier_longest_prefix_wins() {
        // DE "151" (Telekom) must beat any shorter overlap.
        assert_eq!(carrier_for("DE", "1511234567"), Some("Telekom"));
        assert_eq!(carrier_for("DE", "1761234567"), Some("O2"));
        assert_eq!(carrier_for("DE", "9991234567"), None);
    }

    #[test]
    fn test_area_prefix_respects_region() {
        // "21" is Cape Town only inside ZA.
        assert_eq!(area_for("ZA", "214032911"), Some("Cape Town"));
        assert_eq!(area_for("GB", "2070313000"), Some("London"));
        assert_eq!(area_for("US", "2125551234"), Some("New York, NY"));
    }

    #[test]
    fn test_country_name_lookup() {
        assert_eq!(country_name("ZA"), Some("South Africa"));
        assert_eq!(country_name("US"), Some("United States"));
        assert_eq!(country_name("XX"), None);
    }
}
