//! The immutable incident record store and its one-time CSV load.
//!
//! The source is a CSV export of the incident spreadsheet. Only the columns the
//! dashboard uses are read; any extra columns are ignored. The first bad row
//! aborts the load, so a store either holds the whole dataset or does not exist.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::DataLoadError;
use crate::fingerprint;
use crate::types::Incident;

pub const COL_YEAR: &str = "ArchiveYear";
pub const COL_ACRES: &str = "AcresBurned";
pub const COL_MAJOR: &str = "MajorIncident";
pub const COL_COUNTY: &str = "Counties";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_NAME: &str = "Name";
pub const COL_PERSONNEL: &str = "PersonnelInvolved";

pub const REQUIRED_COLUMNS: [&str; 8] = [
  COL_YEAR,
  COL_ACRES,
  COL_MAJOR,
  COL_COUNTY,
  COL_LATITUDE,
  COL_LONGITUDE,
  COL_NAME,
  COL_PERSONNEL,
];

/// Read-only collection of incidents, in source order.
#[derive(Debug, Clone)]
pub struct RecordStore {
  incidents: Vec<Incident>,
  fingerprint: String,
}

impl RecordStore {
  /// Load the dataset from a CSV file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| DataLoadError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let store = Self::from_bytes(&bytes)?;
    log::info!(
      "Loaded {} incidents from {} (dataset {})",
      store.len(),
      path.display(),
      store.fingerprint()
    );
    Ok(store)
  }

  /// Parse a dataset already in memory.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_owned()).collect();
    if headers.iter().all(|h| h.is_empty()) {
      return Err(DataLoadError::schema("source contains no header row"));
    }
    let columns = ColumnIndex::resolve(&headers)?;

    let mut incidents = Vec::new();
    for result in reader.records() {
      let record = result?;
      let line = record.position().map_or(0, |p| p.line());
      incidents.push(columns.parse_row(&record, line)?);
    }

    Ok(Self {
      incidents,
      fingerprint: fingerprint::dataset(bytes),
    })
  }

  /// Build a store from records already in memory (fixtures, tests).
  pub fn from_incidents(incidents: Vec<Incident>) -> Self {
    let fingerprint = fingerprint::records(&incidents);
    Self {
      incidents,
      fingerprint,
    }
  }

  /// The full, unmodified record set in source order.
  pub fn all(&self) -> &[Incident] {
    &self.incidents
  }

  pub fn len(&self) -> usize {
    self.incidents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.incidents.is_empty()
  }

  /// Stable content hash of the loaded source.
  pub fn fingerprint(&self) -> &str {
    &self.fingerprint
  }

  /// (min, max) acres burned; `None` for an empty store.
  pub fn acre_bounds(&self) -> Option<(f64, f64)> {
    bounds(self.incidents.iter().map(|i| i.acres_burned))
  }

  /// (min, max) archive year; `None` for an empty store.
  pub fn year_bounds(&self) -> Option<(i32, i32)> {
    let min = self.incidents.iter().map(|i| i.archive_year).min()?;
    let max = self.incidents.iter().map(|i| i.archive_year).max()?;
    Some((min, max))
  }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
  values.fold(None, |acc, v| match acc {
    None => Some((v, v)),
    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
  })
}

// ---------------------------------------------------------------------------
// Header resolution + row parsing
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header row.
struct ColumnIndex {
  positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
  fn resolve(headers: &[String]) -> Result<Self, DataLoadError> {
    let mut positions = HashMap::new();
    for column in REQUIRED_COLUMNS {
      let mut hits = headers.iter().enumerate().filter(|(_, h)| h.as_str() == column);
      match (hits.next(), hits.next()) {
        (Some((i, _)), None) => {
          positions.insert(column, i);
        }
        (None, _) => {
          return Err(DataLoadError::schema(format!("missing required column {column}")));
        }
        (Some(_), Some(_)) => {
          return Err(DataLoadError::schema(format!("duplicate column {column}")));
        }
      }
    }
    Ok(Self { positions })
  }

  fn cell<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
    self
      .positions
      .get(column)
      .and_then(|&i| record.get(i))
      .unwrap_or("")
      .trim()
  }

  fn parse_row(&self, record: &csv::StringRecord, line: u64) -> Result<Incident, DataLoadError> {
    let year_cell = self.cell(record, COL_YEAR);
    let archive_year = parse_year(year_cell)
      .ok_or_else(|| DataLoadError::row(line, COL_YEAR, format!("expected a year, got {year_cell:?}")))?;

    let acres_cell = self.cell(record, COL_ACRES);
    let acres_burned = parse_number(acres_cell)
      .map_err(|reason| DataLoadError::row(line, COL_ACRES, reason))?
      .ok_or_else(|| DataLoadError::row(line, COL_ACRES, "value is required"))?;
    if acres_burned < 0.0 {
      return Err(DataLoadError::row(line, COL_ACRES, "must not be negative"));
    }

    let major_cell = self.cell(record, COL_MAJOR);
    let major_incident = parse_flag(major_cell).map_err(|reason| DataLoadError::row(line, COL_MAJOR, reason))?;

    let optional = |column: &str| -> Result<Option<f64>, DataLoadError> {
      parse_number(self.cell(record, column)).map_err(|reason| DataLoadError::row(line, column, reason))
    };

    let county = self.cell(record, COL_COUNTY);

    Ok(Incident {
      archive_year,
      acres_burned,
      major_incident,
      county: (!county.is_empty()).then(|| county.to_owned()),
      latitude: optional(COL_LATITUDE)?,
      longitude: optional(COL_LONGITUDE)?,
      name: self.cell(record, COL_NAME).to_owned(),
      personnel_involved: optional(COL_PERSONNEL)?,
    })
  }
}

/// Integer year; spreadsheet exports sometimes write `2018.0`.
fn parse_year(s: &str) -> Option<i32> {
  if let Ok(year) = s.parse::<i32>() {
    return Some(year);
  }
  let f = s.parse::<f64>().ok()?;
  (f.is_finite() && f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX)).then_some(f as i32)
}

/// Empty or null-like cells are absent. Anything else must be a finite number.
fn parse_number(s: &str) -> Result<Option<f64>, String> {
  if is_blank(s) {
    return Ok(None);
  }
  match s.parse::<f64>() {
    Ok(v) if v.is_finite() => Ok(Some(v)),
    _ => Err(format!("expected a number, got {s:?}")),
  }
}

fn parse_flag(s: &str) -> Result<Option<bool>, String> {
  if is_blank(s) {
    return Ok(None);
  }
  match s.to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" | "y" => Ok(Some(true)),
    "false" | "0" | "no" | "n" => Ok(Some(false)),
    _ => Err(format!("expected true|false, got {s:?}")),
  }
}

fn is_blank(s: &str) -> bool {
  s.is_empty() || matches!(s.to_ascii_lowercase().as_str(), "nan" | "null" | "none" | "na" | "n/a")
}
