//! Conference travel footprint engine.
//!
//! Great-circle distances between attendee origins and a candidate host city,
//! a three-tier CO2 model, and per-country aggregation for reporting.

pub mod city;
pub mod collection;
pub mod config;
pub mod emissions;
pub mod error;
pub mod report;

pub use city::City;
pub use collection::CityCollection;
pub use emissions::EmissionTier;
pub use error::{CityError, Field, IngestError, ReportError, ResolveError};
