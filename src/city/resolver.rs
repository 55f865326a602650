//! Host resolver — turns a host name or coordinates into a `City`.
//!
//! Name flow:  attendee list → built-in host dataset → error
//! Manual:     raw lat/lon, labelled by coordinates

use super::builtin;
use super::types::City;
use crate::collection::CityCollection;
use crate::error::ResolveError;
use std::fmt;
use tracing::debug;

/// Where a host was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    Attendees,
    Builtin,
    Manual,
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attendees => write!(f, "Attendee list"),
            Self::Builtin => write!(f, "Built-in"),
            Self::Manual => write!(f, "Manual"),
        }
    }
}

/// A resolved host with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedHost {
    pub city: City,
    pub source: HostSource,
}

impl ResolvedHost {
    pub fn display_line(&self) -> String {
        format!(
            "{} ({}) [{:.4}, {:.4}] via {}",
            self.city.name(),
            self.city.country(),
            self.city.latitude(),
            self.city.longitude(),
            self.source
        )
    }
}

/// Resolves hosts against an attendee collection and the built-in dataset.
pub struct HostResolver<'a> {
    collection: &'a CityCollection,
}

impl<'a> HostResolver<'a> {
    pub fn new(collection: &'a CityCollection) -> Self {
        Self { collection }
    }

    /// Resolve a host by name through the fallback chain.
    pub fn resolve(&self, query: &str) -> Result<ResolvedHost, ResolveError> {
        // 1. A city already in the attendee list
        if let Some(city) = self.collection.find(query) {
            debug!(host = city.name(), "host found in attendee list");
            return Ok(ResolvedHost {
                city: city.clone(),
                source: HostSource::Attendees,
            });
        }

        // 2. Built-in dataset; the host itself brings no travellers
        if let Some(result) = builtin::builtin_host(query, 0) {
            let city = result?;
            debug!(query, host = city.name(), "host found in built-in dataset");
            return Ok(ResolvedHost {
                city,
                source: HostSource::Builtin,
            });
        }

        Err(ResolveError::NotFound(query.to_string()))
    }

    /// Build a host from raw coordinates.
    pub fn from_coordinates(lat: f64, lon: f64, country: Option<&str>) -> Result<ResolvedHost, ResolveError> {
        let city = City::new(
            format!("{:.4}, {:.4}", lat, lon),
            country.unwrap_or("Unknown"),
            0,
            lat,
            lon,
        )?;
        Ok(ResolvedHost {
            city,
            source: HostSource::Manual,
        })
    }
}
