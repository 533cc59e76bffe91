use clap::Parser;
use phonetrace::localtime;
use phonetrace::location::{self, format_coords, GeoFix, GeoOutcome, GeoSource};
use phonetrace::map::{self, MapInputs};
use phonetrace::number;
use phonetrace::report::{self, ArtifactOpener, SystemOpener};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

/// Phonetrace — phone number service-area mapper
///
/// Resolves a phone number in international format to an approximate
/// geographic area, renders an interactive HTML map with service-area
/// circles, and reports the area's local time.
///
/// Examples:
///   phonetrace +16502530000
///   phonetrace --number "+442070313000" -o london.html
///   phonetrace +27821234567 --api-key YOUR_TIMEZONEDB_KEY
///   phonetrace +27821234567 --offline
#[derive(Parser)]
#[command(name = "phonetrace", version, about, long_about = None)]
struct Cli {
    /// Phone number in international format (positional). Example: +16502530000
    #[arg(index = 1)]
    number_positional: Option<String>,

    /// Phone number (named).
    #[arg(long)]
    number: Option<String>,

    /// TimezoneDB API key. Empty disables the position-based timezone
    /// lookup and falls back to the longitude estimate.
    #[arg(long, default_value = "")]
    api_key: String,

    /// Output HTML file.
    #[arg(long, short = 'o', default_value = "phone_location_map.html")]
    output: PathBuf,

    /// Offline mode: skip network lookups, use built-in datasets only.
    #[arg(long)]
    offline: bool,

    /// Do not open the rendered map in the default browser.
    #[arg(long)]
    no_open: bool,
}

/// Machine-readable lookup result, printed to stdout as JSON.
#[derive(Serialize)]
struct LookupReport {
    number: String,
    general_area: String,
    country: String,
    carrier: String,
    lat: f64,
    lon: f64,
    precise_location: String,
    coordinate_source: String,
    local_time: String,
    timezone: String,
    map_file: String,
    map_bytes: u64,
}

fn main() {
    let cli = Cli::parse();

    eprintln!("=== Phonetrace ===");

    let raw = match cli.number.clone().or_else(|| cli.number_positional.clone()) {
        Some(n) => n,
        None => {
            eprintln!("Error: No phone number specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  phonetrace +16502530000");
            eprintln!("  phonetrace --number \"+442070313000\"");
            eprintln!("  phonetrace +27821234567 --api-key YOUR_TIMEZONEDB_KEY");
            process::exit(1);
        }
    };

    eprintln!("Processing number: {}", raw);

    // ── Parse + descriptors ─────────────────────────────────────

    let parsed = number::parse(&raw).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Tip: Use international format with a country code, e.g. +1 for US, +44 for UK, +27 for South Africa.");
        process::exit(1);
    });

    let descriptor = number::describe(&parsed).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    eprintln!("General Location: {}", descriptor.general_area);
    eprintln!("Country: {}", descriptor.country);
    eprintln!("Service Provider: {}", descriptor.carrier);

    // ── Geocode ─────────────────────────────────────────────────

    let outcome = if cli.offline {
        GeoOutcome::NoResult
    } else {
        eprintln!("Getting precise coordinates...");
        location::resolve(&descriptor.general_area, &descriptor.country)
    };

    // ── Local time (before the country-center fallback, so the
    //    coordinates-absent branches stay reachable) ─────────────

    let geo_coords = match &outcome {
        GeoOutcome::Found(fix) => Some((fix.lat, fix.lon)),
        GeoOutcome::NoResult => None,
    };
    let time = localtime::resolve(geo_coords, &descriptor.country, &cli.api_key, cli.offline);

    eprintln!("Local Time: {}", time.formatted);
    eprintln!("Timezone: {}", time.zone_label);

    // ── Country-center fallback ─────────────────────────────────

    let fix: GeoFix = match outcome {
        GeoOutcome::Found(fix) => fix,
        GeoOutcome::NoResult => {
            eprintln!("Using country-level accuracy as fallback...");
            match location::country_center(&descriptor.country) {
                Some(fix) => fix,
                None => {
                    eprintln!("Error: Could not determine any coordinates for this number.");
                    process::exit(1);
                }
            }
        }
    };

    match fix.source {
        GeoSource::Nominatim => {
            eprintln!("Precise Coordinates: {}", format_coords(fix.lat, fix.lon));
            eprintln!("Precise Location: {}", fix.display_name);
        }
        GeoSource::CountryCenter => {
            eprintln!("Country Center: {}", format_coords(fix.lat, fix.lon));
        }
    }

    // ── Render + write ──────────────────────────────────────────

    eprintln!("Creating detailed map...");
    let doc = map::render(&MapInputs {
        lat: fix.lat,
        lon: fix.lon,
        general_area: &descriptor.general_area,
        precise_location: &fix.display_name,
        carrier: &descriptor.carrier,
        local_time: &time.formatted,
        timezone: &time.zone_label,
    });

    let artifact = report::write_map(&doc, &cli.output).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    // ── Summary ─────────────────────────────────────────────────

    eprintln!("==================================================");
    eprintln!("SUCCESS: Map created");
    eprintln!("File: {}", artifact.path.display());
    eprintln!("Size: {} bytes", artifact.bytes);
    eprintln!("==================================================");
    eprintln!();
    eprintln!("Location Information:");
    eprintln!("   * Phone Number: {}", parsed.international);
    eprintln!("   * General Area: {}", descriptor.general_area);
    eprintln!("   * Country: {}", descriptor.country);
    eprintln!("   * Service Provider: {}", descriptor.carrier);
    eprintln!("   * Coordinates: {}", format_coords(fix.lat, fix.lon));
    eprintln!("   * Precise Location: {}", fix.display_name);
    eprintln!("   * Local Time: {}", time.formatted);
    eprintln!("   * Timezone: {}", time.zone_label);
    eprintln!();
    eprintln!("Accuracy Note: Phone number locations show the general");
    eprintln!("service area, not the exact device location.");

    let report_out = LookupReport {
        number: parsed.e164.clone(),
        general_area: descriptor.general_area.clone(),
        country: descriptor.country.clone(),
        carrier: descriptor.carrier.clone(),
        lat: fix.lat,
        lon: fix.lon,
        precise_location: fix.display_name.clone(),
        coordinate_source: fix.source.to_string(),
        local_time: time.formatted.clone(),
        timezone: time.zone_label.clone(),
        map_file: artifact.path.display().to_string(),
        map_bytes: artifact.bytes,
    };
    println!("{}", serde_json::to_string_pretty(&report_out).unwrap());

    // ── Open in default viewer (non-fatal) ──────────────────────

    if !cli.no_open {
        match SystemOpener.open(&artifact.path) {
            Ok(()) => eprintln!("Opening map in your browser..."),
            Err(_) => eprintln!("Please open this file manually: {}", artifact.path.display()),
        }
    }
}
