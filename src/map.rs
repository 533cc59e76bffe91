//! Self-contained HTML map rendering (Leaflet over OpenStreetMap tiles).
//!
//! Pure: the document is a function of its inputs and touches no network
//! at generation time — tiles and the Leaflet assets load when the file is
//! opened in a browser. All interpolated text is escaped; the popup markup
//! is embedded as a JSON-encoded JS string.

use crate::location::format_coords;

/// Fixed zoom level for the service-area view.
pub const ZOOM: u32 = 11;
/// Primary service-area indicator radius (meters).
pub const SERVICE_RADIUS_M: f64 = 8_000.0;
/// Extended-reference indicator radius (meters).
pub const EXTENDED_RADIUS_M: f64 = 15_000.0;

/// Inputs for one rendered map. Strings are untrusted text and are escaped
/// on the way into the document.
#[derive(Debug, Clone)]
pub struct MapInputs<'a> {
    pub lat: f64,
    pub lon: f64,
    pub general_area: &'a str,
    pub precise_location: &'a str,
    pub carrier: &'a str,
    pub local_time: &'a str,
    pub timezone: &'a str,
}

/// A rendered, self-contained HTML document.
#[derive(Debug, Clone)]
pub struct MapDocument {
    html: String,
}

impl MapDocument {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn popup_html(inputs: &MapInputs) -> String {
    format!(
        concat!(
            "<div style='max-width: 300px;'>",
            "<h3 style='color: #d9534f; margin-bottom: 10px;'>Phone Number Location</h3>",
            "<p><b>General Area:</b> {area}</p>",
            "<p><b>Precise Location:</b> {precise}</p>",
            "<p><b>Service Provider:</b> {carrier}</p>",
            "<p><b>Local Time:</b> {time}</p>",
            "<p><b>Timezone:</b> {tz}</p>",
            "<p><b>Coordinates:</b> {coords}</p>",
            "<hr style='margin: 10px 0;'>",
            "<small style='color: #666;'>Note: Phone number locations show the ",
            "general service area, not the exact device location. Accuracy is ",
            "typically within 10-50 km.</small>",
            "</div>",
        ),
        area = html_escape(inputs.general_area),
        precise = html_escape(inputs.precise_location),
        carrier = html_escape(inputs.carrier),
        time = html_escape(inputs.local_time),
        tz = html_escape(inputs.timezone),
        coords = format_coords(inputs.lat, inputs.lon),
    )
}

/// Render the map document: centered base map, one marker with the rich
/// popup, the filled 8 km service-area circle, and the unfilled 15 km
/// extended-reference circle.
pub fn render(inputs: &MapInputs) -> MapDocument {
    // A String always serializes; the fallback is unreachable.
    let popup = serde_json::to_string(&popup_html(inputs))
        .unwrap_or_else(|_| String::from("\"\""));
    let lat = format!("{:.6}", inputs.lat);
    let lon = format!("{:.6}", inputs.lon);

    let html = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\"/>\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\"/>\n",
            "<title>Phone Number Location</title>\n",
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n",
            "<script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n",
            "<style>html, body, #map {{ height: 100%; margin: 0; }}</style>\n",
            "</head>\n",
            "<body>\n",
            "<div id=\"map\"></div>\n",
            "<script>\n",
            "var map = L.map('map').setView([{lat}, {lon}], {zoom});\n",
            "L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{\n",
            "    maxZoom: 19,\n",
            "    attribution: '&copy; OpenStreetMap contributors'\n",
            "}}).addTo(map);\n",
            "L.marker([{lat}, {lon}]).addTo(map).bindPopup({popup});\n",
            "L.circle([{lat}, {lon}], {{\n",
            "    radius: {service_radius},\n",
            "    color: 'blue',\n",
            "    fill: true,\n",
            "    fillColor: 'blue',\n",
            "    fillOpacity: 0.2\n",
            "}}).addTo(map)\n",
            "  .bindPopup(\"Approximate service coverage area\")\n",
            "  .bindTooltip(\"This circle shows the general area served by this phone number\");\n",
            "L.circle([{lat}, {lon}], {{\n",
            "    radius: {extended_radius},\n",
            "    color: 'green',\n",
            "    fill: false,\n",
            "    weight: 2\n",
            "}}).addTo(map)\n",
            "  .bindPopup(\"Extended service area reference\");\n",
            "</script>\n",
            "</body>\n",
            "</html>\n",
        ),
        lat = lat,
        lon = lon,
        zoom = ZOOM,
        popup = popup,
        service_radius = SERVICE_RADIUS_M,
        extended_radius = EXTENDED_RADIUS_M,
    );

    MapDocument { html }
}
