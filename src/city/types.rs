//! The `City` record: a validated, immutable origin or host location.

use crate::emissions::{self, EmissionTier};
use crate::error::{CityError, Field};
use serde_json::Value;

/// A named point with an attendee count.
///
/// Construction validates every field; there are no setters. Two cities with
/// identical fields are still separate entries wherever they are collected.
#[derive(Debug, Clone)]
pub struct City {
    name: String,
    country: String,
    attendees: u32,
    latitude: f64,
    longitude: f64,
}

impl City {
    /// Build a city from typed values, checking ranges.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        attendees: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, CityError> {
        let attendees = validate_attendees(attendees)?;
        let latitude = validate_range(Field::Latitude, latitude, 90.0)?;
        let longitude = validate_range(Field::Longitude, longitude, 180.0)?;

        Ok(Self {
            name: name.into(),
            country: country.into(),
            attendees,
            latitude,
            longitude,
        })
    }

    /// Build a city from an untyped JSON object.
    ///
    /// Names must be strings, `attendees` an integer, and coordinates floats
    /// (`1` is rejected where `1.0` is accepted).
    pub fn from_value(value: &Value) -> Result<Self, CityError> {
        let name = json_string(value, Field::Name)?;
        let country = json_string(value, Field::Country)?;

        let attendees = validate_attendees(json_integer(value, Field::Attendees)?)?;

        let latitude = validate_range(Field::Latitude, json_float(value, Field::Latitude)?, 90.0)?;
        let longitude = validate_range(Field::Longitude, json_float(value, Field::Longitude)?, 180.0)?;

        Ok(Self {
            name,
            country,
            attendees,
            latitude,
            longitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn attendees(&self) -> u32 {
        self.attendees
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in km.
    pub fn distance_to(&self, other: &City) -> f64 {
        emissions::haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Transport tier for the trip from this city to `other`.
    pub fn tier_to(&self, other: &City) -> EmissionTier {
        EmissionTier::for_distance(self.distance_to(other))
    }

    /// CO2 in kg for this city's attendees travelling to `other`.
    pub fn co2_to(&self, other: &City) -> f64 {
        emissions::emissions_kg(self.distance_to(other), self.attendees)
    }
}

fn validate_attendees(attendees: i64) -> Result<u32, CityError> {
    if attendees < 0 {
        return Err(CityError::invalid_value(
            Field::Attendees,
            format!("must be non-negative, got {}", attendees),
        ));
    }
    u32::try_from(attendees).map_err(|_| {
        CityError::invalid_value(Field::Attendees, format!("{} exceeds {}", attendees, u32::MAX))
    })
}

/// NaN fails `contains`, so it is reported as out of range too.
fn validate_range(field: Field, value: f64, limit: f64) -> Result<f64, CityError> {
    if (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(CityError::invalid_value(
            field,
            format!("{} is outside -{}..={}", value, limit, limit),
        ))
    }
}

fn json_string(value: &Value, field: Field) -> Result<String, CityError> {
    value
        .get(field.key())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| CityError::invalid_type(field, "string"))
}

/// Integers past i64 are out of range, not mistyped.
fn json_integer(value: &Value, field: Field) -> Result<i64, CityError> {
    match value.get(field.key()) {
        Some(Value::Number(n)) if n.is_i64() => n
            .as_i64()
            .ok_or_else(|| CityError::invalid_type(field, "integer")),
        Some(Value::Number(n)) if n.is_u64() => Err(CityError::invalid_value(
            field,
            format!("{} exceeds {}", n, u32::MAX),
        )),
        _ => Err(CityError::invalid_type(field, "integer")),
    }
}

fn json_float(value: &Value, field: Field) -> Result<f64, CityError> {
    match value.get(field.key()) {
        Some(Value::Number(n)) if n.is_f64() => n
            .as_f64()
            .ok_or_else(|| CityError::invalid_type(field, "float")),
        _ => Err(CityError::invalid_type(field, "float")),
    }
}
