//! Aggregation over an attendee list relative to a host city.
//!
//! All operations are read-only. Per-country groupings only contain countries
//! present in the collection; nothing is pre-filled with zeros.

use crate::city::City;
use crate::error::ReportError;
use crate::report::{self, Summary};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// An ordered list of origin cities, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct CityCollection {
    cities: Vec<City>,
}

impl CityCollection {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// First city with this name, case-insensitive.
    pub fn find(&self, name: &str) -> Option<&City> {
        let name = name.trim().to_lowercase();
        self.cities.iter().find(|c| c.name().to_lowercase() == name)
    }

    /// Distinct countries.
    pub fn countries(&self) -> BTreeSet<String> {
        self.cities.iter().map(|c| c.country().to_string()).collect()
    }

    pub fn total_attendees(&self) -> u64 {
        self.cities.iter().map(|c| c.attendees() as u64).sum()
    }

    /// Person-kilometres travelled to `host`.
    pub fn total_distance_travel_to(&self, host: &City) -> f64 {
        self.cities.iter().map(|c| person_km(c, host)).sum()
    }

    /// Person-kilometres travelled to `host`, grouped by country.
    pub fn travel_by_country(&self, host: &City) -> BTreeMap<String, f64> {
        group_by_country(&self.cities, |c| person_km(c, host))
    }

    /// Total CO2 in kg for everyone travelling to `host`.
    pub fn total_co2(&self, host: &City) -> f64 {
        self.cities.iter().map(|c| c.co2_to(host)).sum()
    }

    /// CO2 in kg grouped by country of origin.
    pub fn co2_by_country(&self, host: &City) -> BTreeMap<String, f64> {
        group_by_country(&self.cities, |c| c.co2_to(host))
    }

    /// Every member scored as host against the whole collection, ascending.
    ///
    /// Ties keep collection order; field-identical members are listed
    /// separately.
    pub fn sorted_by_emissions(&self) -> Vec<(String, f64)> {
        let mut ranking: Vec<(String, f64)> = self
            .cities
            .iter()
            .map(|host| (host.name().to_string(), self.total_co2(host)))
            .collect();

        // `sort_by` is stable.
        ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
        debug!(candidates = ranking.len(), "ranked hosts by emissions");
        ranking
    }

    /// Report figures for `host`. Zero-attendee origins are left out of the
    /// city and attendee counts.
    pub fn summary_of(&self, host: &City) -> Summary {
        let travelling: Vec<&City> = self.cities.iter().filter(|c| c.attendees() > 0).collect();
        let total_co2_kg = self.total_co2(host);

        Summary {
            host: host.name().to_string(),
            host_country: host.country().to_string(),
            total_co2_kg,
            total_co2_tonnes: (total_co2_kg / 1000.0).trunc() as u64,
            attendees: travelling.iter().map(|c| c.attendees() as u64).sum(),
            cities: travelling.len(),
        }
    }

    /// Write the host summary to `out`.
    pub fn summary<W: Write>(&self, host: &City, out: &mut W) -> std::io::Result<()> {
        let summary = self.summary_of(host);
        info!(
            host = %summary.host,
            tonnes = summary.total_co2_tonnes,
            attendees = summary.attendees,
            "computed host summary"
        );
        write!(out, "{}", summary)
    }

    /// Render the top `n` emitting countries as a bar chart, optionally
    /// saving it to `save`. Returns the rendered chart.
    pub fn plot_top_emitters(&self, host: &City, n: usize, save: Option<&Path>) -> Result<String, ReportError> {
        let bars = report::top_emitters(&self.co2_by_country(host), n);
        let title = format!("Travel CO2 to {} by country (tonnes)", host.name());
        let chart = report::render_bar_chart(&title, &bars);

        if let Some(path) = save {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &chart)?;
            info!(path = %path.display(), "saved emitters chart");
        }
        Ok(chart)
    }
}

fn person_km(city: &City, host: &City) -> f64 {
    city.distance_to(host) * city.attendees() as f64
}

fn group_by_country(cities: &[City], value: impl Fn(&City) -> f64) -> BTreeMap<String, f64> {
    let mut groups = BTreeMap::new();
    for city in cities {
        *groups.entry(city.country().to_string()).or_insert(0.0) += value(city);
    }
    groups
}
