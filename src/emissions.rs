//! Great-circle distance and the distance-tiered emissions model.
//!
//! Distances use the Haversine formula on a spherical Earth (R = 6371 km).
//! Emission factors are kilograms of CO2 per kilometre per attendee.

use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Upper bound (inclusive) of the ground transport tier, in km.
pub const GROUND_MAX_KM: f64 = 1000.0;

/// Upper bound (inclusive) of the short/medium-haul tier, in km.
pub const SHORT_HAUL_MAX_KM: f64 = 8000.0;

/// Haversine distance in kilometres between two lat/lon pairs given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_r = lat1 * DEG;
    let lat2_r = lat2 * DEG;
    let dlat = lat2_r - lat1_r;
    let dlon = lon2 * DEG - lon1 * DEG;

    let a = (dlat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 near the antipode.
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Transport tier selected by travel distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionTier {
    /// Up to 1000 km: ground or public transport.
    Ground,
    /// Above 1000 km up to 8000 km: short/medium-haul flight.
    ShortHaul,
    /// Above 8000 km: long-haul flight.
    LongHaul,
}

impl EmissionTier {
    /// Pick the tier for a distance. Boundary distances fall in the lower tier.
    pub fn for_distance(distance_km: f64) -> Self {
        if distance_km <= GROUND_MAX_KM {
            Self::Ground
        } else if distance_km <= SHORT_HAUL_MAX_KM {
            Self::ShortHaul
        } else {
            Self::LongHaul
        }
    }

    /// kg CO2 per km per attendee.
    pub fn factor(self) -> f64 {
        match self {
            Self::Ground => 200.0,
            Self::ShortHaul => 250.0,
            Self::LongHaul => 300.0,
        }
    }
}

/// Emissions in kg for `attendees` travellers covering `distance_km`.
pub fn emissions_kg(distance_km: f64, attendees: u32) -> f64 {
    EmissionTier::for_distance(distance_km).factor() * distance_km * attendees as f64
}
