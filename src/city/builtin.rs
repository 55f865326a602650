//! Built-in dataset of candidate conference host cities.
//!
//! Lookup order: exact name or alias (case-insensitive), then fuzzy match
//! (Levenshtein distance <= 2, queries of 4+ characters only).

use super::types::City;
use crate::error::CityError;

struct HostEntry {
    names: &'static [&'static str], // display name first, then lowercase aliases
    country: &'static str,
    lat: f64,
    lon: f64,
}

const HOST_CITIES: &[HostEntry] = &[
    HostEntry { names: &["Zurich", "zurich", "zürich", "zuerich"], country: "Switzerland", lat: 47.22, lon: 8.33 },
    HostEntry { names: &["Geneva", "geneva", "genève", "geneve"], country: "Switzerland", lat: 46.2044, lon: 6.1432 },
    HostEntry { names: &["London", "london"], country: "United Kingdom", lat: 51.5074, lon: -0.1278 },
    HostEntry { names: &["Paris", "paris"], country: "France", lat: 48.8566, lon: 2.3522 },
    HostEntry { names: &["Berlin", "berlin"], country: "Germany", lat: 52.52, lon: 13.405 },
    HostEntry { names: &["Amsterdam", "amsterdam"], country: "Netherlands", lat: 52.3676, lon: 4.9041 },
    HostEntry { names: &["Barcelona", "barcelona"], country: "Spain", lat: 41.3874, lon: 2.1686 },
    HostEntry { names: &["Vienna", "vienna", "wien"], country: "Austria", lat: 48.2082, lon: 16.3738 },
    HostEntry { names: &["Stockholm", "stockholm"], country: "Sweden", lat: 59.3293, lon: 18.0686 },
    HostEntry { names: &["New York", "new york", "newyork", "nyc"], country: "United States", lat: 40.7128, lon: -74.006 },
    HostEntry { names: &["San Francisco", "san francisco", "sf"], country: "United States", lat: 37.7749, lon: -122.4194 },
    HostEntry { names: &["Toronto", "toronto"], country: "Canada", lat: 43.6532, lon: -79.3832 },
    HostEntry { names: &["Mexico City", "mexico city", "cdmx"], country: "Mexico", lat: 19.4326, lon: -99.1332 },
    HostEntry { names: &["Sao Paulo", "sao paulo", "são paulo"], country: "Brazil", lat: -23.5505, lon: -46.6333 },
    HostEntry { names: &["Cairo", "cairo"], country: "Egypt", lat: 30.0444, lon: 31.2357 },
    HostEntry { names: &["Nairobi", "nairobi"], country: "Kenya", lat: -1.2921, lon: 36.8219 },
    HostEntry { names: &["Cape Town", "cape town"], country: "South Africa", lat: -33.9249, lon: 18.4241 },
    HostEntry { names: &["Dubai", "dubai"], country: "United Arab Emirates", lat: 25.2048, lon: 55.2708 },
    HostEntry { names: &["Mumbai", "mumbai", "bombay"], country: "India", lat: 19.076, lon: 72.8777 },
    HostEntry { names: &["Singapore", "singapore"], country: "Singapore", lat: 1.3521, lon: 103.8198 },
    HostEntry { names: &["Beijing", "beijing", "peking"], country: "China", lat: 39.9042, lon: 116.4074 },
    HostEntry { names: &["Tokyo", "tokyo"], country: "Japan", lat: 35.6762, lon: 139.6503 },
    HostEntry { names: &["Sydney", "sydney"], country: "Australia", lat: -33.8688, lon: 151.2093 },
];

/// Minimum query length before fuzzy matching is attempted.
const FUZZY_MIN_LEN: usize = 4;
const FUZZY_MAX_DISTANCE: usize = 2;

/// A host entry for listing.
#[derive(Debug, Clone)]
pub struct HostInfo {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Levenshtein distance.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

fn find_entry(query: &str) -> Option<&'static HostEntry> {
    let q = query.trim().to_lowercase();

    if let Some(entry) = HOST_CITIES
        .iter()
        .find(|e| e.names.iter().any(|name| name.to_lowercase() == q))
    {
        return Some(entry);
    }

    if q.chars().count() < FUZZY_MIN_LEN {
        return None;
    }

    // Closest alias wins; earlier entries win ties.
    HOST_CITIES
        .iter()
        .filter_map(|e| {
            e.names
                .iter()
                .map(|name| edit_distance(&q, &name.to_lowercase()))
                .min()
                .map(|d| (e, d))
        })
        .filter(|(_, d)| *d <= FUZZY_MAX_DISTANCE)
        .min_by_key(|(_, d)| *d)
        .map(|(e, _)| e)
}

/// Look up a host city in the built-in dataset.
///
/// The returned city carries `attendees` as its own attendee count. Returns
/// `None` when nothing matches.
pub fn builtin_host(query: &str, attendees: i64) -> Option<Result<City, CityError>> {
    find_entry(query).map(|e| City::new(e.names[0], e.country, attendees, e.lat, e.lon))
}

/// The full built-in host list.
pub fn builtin_host_list() -> Vec<HostInfo> {
    HOST_CITIES
        .iter()
        .map(|e| HostInfo {
            name: e.names[0].to_string(),
            country: e.country.to_string(),
            lat: e.lat,
            lon: e.lon,
        })
        .collect()
}

/// Host list as aligned text lines.
pub fn render_host_list(hosts: &[HostInfo]) -> String {
    let mut out = String::from("  Built-in host cities:\n");
    for h in hosts {
        out.push_str(&format!(
            "    {:<16} {:<22} {:>9.4}, {:>9.4}\n",
            h.name, h.country, h.lat, h.lon
        ));
    }
    out
}
