//! Attendee file ingestion.
//!
//! CSV layout (one header row):
//! `attendees, country, <unused>, city, latitude, longitude, <unused>`
//!
//! JSON layout: an array of `{name, country, attendees, latitude, longitude}`.

use super::types::City;
use crate::collection::CityCollection;
use crate::error::{CityError, Field, IngestError};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::num::IntErrorKind;
use std::path::Path;
use tracing::{debug, info};

const COL_ATTENDEES: usize = 0;
const COL_COUNTRY: usize = 1;
const COL_CITY: usize = 3;
const COL_LATITUDE: usize = 4;
const COL_LONGITUDE: usize = 5;

/// Read an attendee file, picking the format from the extension.
pub fn read_attendees_file(path: impl AsRef<Path>) -> Result<CityCollection, IngestError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    debug!(path = %path.display(), json = is_json, "reading attendee file");
    let file = File::open(path)?;
    let collection = if is_json {
        read_attendees_json(file)?
    } else {
        read_attendees(file)?
    };

    info!(
        path = %path.display(),
        cities = collection.len(),
        attendees = collection.total_attendees(),
        "loaded attendee file"
    );
    Ok(collection)
}

/// Read CSV attendee rows from any reader. The first row is a header.
pub fn read_attendees<R: Read>(reader: R) -> Result<CityCollection, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut cities = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        // Data lines are numbered from 1, after the header.
        let line = i + 1;
        let record = record?;
        let city = parse_record(&record, line)?;
        cities.push(city);
    }
    Ok(CityCollection::new(cities))
}

fn parse_record(record: &StringRecord, line: usize) -> Result<City, IngestError> {
    let column = |idx: usize, column: &'static str| {
        record
            .get(idx)
            .ok_or(IngestError::MissingColumn { line, column })
    };

    let attendees = column(COL_ATTENDEES, "attendees")?;
    let country = column(COL_COUNTRY, "country")?;
    let name = column(COL_CITY, "city")?;
    let latitude = column(COL_LATITUDE, "latitude")?;
    let longitude = column(COL_LONGITUDE, "longitude")?;

    let record_err = |source: CityError| IngestError::Record { line, source };

    let attendees: i64 = attendees.parse().map_err(|e: std::num::ParseIntError| {
        let source = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                CityError::invalid_value(Field::Attendees, format!("{} is out of range", attendees))
            }
            _ => CityError::invalid_type(Field::Attendees, "integer"),
        };
        record_err(source)
    })?;
    let latitude: f64 = latitude
        .parse()
        .map_err(|_| record_err(CityError::invalid_type(Field::Latitude, "float")))?;
    let longitude: f64 = longitude
        .parse()
        .map_err(|_| record_err(CityError::invalid_type(Field::Longitude, "float")))?;

    City::new(name, country, attendees, latitude, longitude).map_err(record_err)
}

/// Read a JSON array of city objects.
pub fn read_attendees_json<R: Read>(reader: R) -> Result<CityCollection, IngestError> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = value.as_array().ok_or(IngestError::NotAnArray)?;

    let cities = items
        .iter()
        .enumerate()
        .map(|(i, item)| City::from_value(item).map_err(|source| IngestError::Record { line: i + 1, source }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CityCollection::new(cities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
N,Country,State,City,Latitude,Longitude,Distance
4,Switzerland,ZH,Zurich,47.22,8.33,0
0,United States,CA,San Francisco,37.77,-122.42,9371
2,Switzerland,VD,Lausanne,46.52,6.63,172
";

    #[test]
    fn test_read_csv() {
        let collection = read_attendees(SAMPLE.as_bytes()).unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.total_attendees(), 6);

        let names: Vec<&str> = collection.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Zurich", "San Francisco", "Lausanne"]);

        let sf = &collection.cities()[1];
        assert_eq!(sf.country(), "United States");
        assert!((sf.longitude() + 122.42).abs() < 1e-9);
    }

    #[test]
    fn test_header_only() {
        let collection = read_attendees("N,Country,State,City,Latitude,Longitude,Distance\n".as_bytes()).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n 3 , Japan ,x, Tokyo , 35.68 , 139.65 ,\n";
        let collection = read_attendees(data.as_bytes()).unwrap();
        let tokyo = &collection.cities()[0];
        assert_eq!(tokyo.name(), "Tokyo");
        assert_eq!(tokyo.country(), "Japan");
        assert_eq!(tokyo.attendees(), 3);
    }

    #[test]
    fn test_missing_trailing_column_is_fine() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n1,Japan,x,Tokyo,35.68,139.65\n";
        assert_eq!(read_attendees(data.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_short_row() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n1,Japan,x,Tokyo,35.68\n";
        let err = read_attendees(data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { line: 1, column: "longitude" }));
    }

    #[test]
    fn test_bad_attendee_type_reports_line() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n1,Japan,x,Tokyo,35.68,139.65,0\nmany,France,x,Paris,48.85,2.35,0\n";
        let err = read_attendees(data.as_bytes()).unwrap_err();
        match err {
            IngestError::Record { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, CityError::InvalidType { field: Field::Attendees, .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_attendees_is_value_error() {
        for count in ["18446744073709551615", "-99999999999999999999"] {
            let data = format!("h1,h2,h3,h4,h5,h6,h7\n{},Japan,x,Tokyo,35.68,139.65,0\n", count);
            let err = read_attendees(data.as_bytes()).unwrap_err();
            assert!(
                matches!(
                    err,
                    IngestError::Record { line: 1, source: CityError::InvalidValue { field: Field::Attendees, .. } }
                ),
                "{} should be out of range, got {:?}",
                count,
                err
            );
        }
    }

    #[test]
    fn test_out_of_range_latitude() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n1,Japan,x,Tokyo,135.68,139.65,0\n";
        let err = read_attendees(data.as_bytes()).unwrap_err();
        match err {
            IngestError::Record { line: 1, source } => {
                assert!(matches!(source, CityError::InvalidValue { field: Field::Latitude, .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_negative_attendees() {
        let data = "h1,h2,h3,h4,h5,h6,h7\n-1,Japan,x,Tokyo,35.68,139.65,0\n";
        let err = read_attendees(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Record { source: CityError::InvalidValue { field: Field::Attendees, .. }, .. }
        ));
    }

    #[test]
    fn test_read_json() {
        let data = r#"[
            {"name": "Zurich", "country": "Switzerland", "attendees": 4, "latitude": 47.22, "longitude": 8.33},
            {"name": "Tokyo", "country": "Japan", "attendees": 2, "latitude": 35.68, "longitude": 139.65}
        ]"#;
        let collection = read_attendees_json(data.as_bytes()).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.total_attendees(), 6);
    }

    #[test]
    fn test_json_type_error_reports_entry() {
        let data = r#"[
            {"name": "Zurich", "country": "Switzerland", "attendees": 4, "latitude": 47.22, "longitude": 8.33},
            {"name": "Tokyo", "country": "Japan", "attendees": 2, "latitude": 35, "longitude": 139.65}
        ]"#;
        let err = read_attendees_json(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::Record { line: 2, source: CityError::InvalidType { field: Field::Latitude, .. } }
        ));
    }

    #[test]
    fn test_json_not_an_array() {
        let err = read_attendees_json(r#"{"name": "Zurich"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::NotAnArray));
    }

    #[test]
    fn test_read_file_by_extension() {
        let dir = TempDir::new().unwrap();

        let csv_path = dir.path().join("attendee_locations.csv");
        fs::write(&csv_path, SAMPLE).unwrap();
        assert_eq!(read_attendees_file(&csv_path).unwrap().len(), 3);

        let json_path = dir.path().join("attendees.JSON");
        fs::write(
            &json_path,
            r#"[{"name": "Oslo", "country": "Norway", "attendees": 1, "latitude": 59.91, "longitude": 10.75}]"#,
        )
        .unwrap();
        assert_eq!(read_attendees_file(&json_path).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_attendees_file(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
