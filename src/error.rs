//! Error types for city construction, ingestion, host resolution and reporting.

use std::fmt;
use thiserror::Error;

/// A `City` field, used to tag validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Country,
    Attendees,
    Latitude,
    Longitude,
}

impl Field {
    /// Key used for this field in JSON input.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Country => "country",
            Self::Attendees => "attendees",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Why a `City` could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CityError {
    /// The field has the wrong type.
    #[error("invalid type for {field}: expected {expected}")]
    InvalidType { field: Field, expected: &'static str },

    /// The field is outside its valid range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: Field, reason: String },
}

impl CityError {
    pub fn invalid_type(field: Field, expected: &'static str) -> Self {
        Self::InvalidType { field, expected }
    }

    pub fn invalid_value<S: Into<String>>(field: Field, reason: S) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            Self::InvalidType { field, .. } | Self::InvalidValue { field, .. } => *field,
        }
    }
}

/// Attendee file ingestion errors.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data row has fewer columns than the record layout needs.
    #[error("line {line}: missing column '{column}'")]
    MissingColumn { line: usize, column: &'static str },

    /// A data row failed `City` validation.
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: CityError,
    },

    #[error("JSON attendee file must contain an array of cities")]
    NotAnArray,
}

/// Host resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Host city not found: '{0}'")]
    NotFound(String),

    #[error("Invalid host: {0}")]
    Invalid(#[from] CityError),
}

/// Report and chart output errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
