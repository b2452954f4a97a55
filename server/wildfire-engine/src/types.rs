//! Core types for the wildfire engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

// ---------------------------------------------------------------------------
// Incident record (one row of the dataset)
// ---------------------------------------------------------------------------

/// One wildfire event. Optional fields stay `None` when the source cell is empty;
/// computations that need them skip the record instead of assuming zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
  pub archive_year: i32,
  pub acres_burned: f64,
  /// `None` when the dataset leaves the flag blank.
  pub major_incident: Option<bool>,
  pub county: Option<String>,
  pub latitude: Option<f64>,
  /// `Some(0.0)` is the dataset's "unknown location" sentinel.
  pub longitude: Option<f64>,
  pub name: String,
  pub personnel_involved: Option<f64>,
}

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the frontend sends per interaction)
// ---------------------------------------------------------------------------

/// One filter interaction. Every field is optional; unknown fields are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundFilter {
  #[serde(default)]
  pub year_range: Option<[i32; 2]>,
  #[serde(default)]
  pub acre_range: Option<[f64; 2]>,
  #[serde(default)]
  pub major_only: bool,
  #[serde(default)]
  pub sort_by: Option<String>,
}

// ---------------------------------------------------------------------------
// Filter spec (normalized, immutable per refresh)
// ---------------------------------------------------------------------------

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  #[default]
  #[strum(to_string = "None")]
  None,
  #[strum(to_string = "Max First")]
  Descending,
  #[strum(to_string = "Min First")]
  Ascending,
}

impl SortOrder {
  /// Accepts the sidebar labels plus a few aliases; case, `_`, `-` and spaces are ignored.
  pub fn from_str_loose(s: &str) -> Option<Self> {
    let key: String = s
      .chars()
      .filter(|c| !matches!(c, ' ' | '_' | '-'))
      .map(|c| c.to_ascii_lowercase())
      .collect();
    match key.as_str() {
      "none" | "" => Some(Self::None),
      "maxfirst" | "descending" | "desc" | "largest" => Some(Self::Descending),
      "minfirst" | "ascending" | "asc" | "smallest" => Some(Self::Ascending),
      _ => None,
    }
  }
}

/// The active filter/sort parameters for one refresh. Built fresh from each
/// interaction and never mutated; a new spec replaces the old one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSpec {
  /// Inclusive on both ends.
  pub year_range: (i32, i32),
  /// Inclusive on both ends.
  pub acre_range: (f64, f64),
  pub major_only: bool,
  pub sort: SortOrder,
}

impl FilterSpec {
  pub fn new(year_range: (i32, i32), acre_range: (f64, f64), major_only: bool, sort: SortOrder) -> Self {
    Self {
      year_range,
      acre_range,
      major_only,
      sort,
    }
  }

  /// A spec that lets every record through, in store order.
  pub fn unrestricted() -> Self {
    Self::new((i32::MIN, i32::MAX), (f64::NEG_INFINITY, f64::INFINITY), false, SortOrder::None)
  }

  pub fn with_sort(self, sort: SortOrder) -> Self {
    Self { sort, ..self }
  }

  pub fn with_major_only(self, major_only: bool) -> Self {
    Self { major_only, ..self }
  }
}

// ---------------------------------------------------------------------------
// Map classification
// ---------------------------------------------------------------------------

/// Marker color by fire size, darkest for the largest fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerColor {
  DarkRed,
  Red,
  Orange,
  Yellow,
  DarkGreen,
  Green,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
  #[strum(to_string = "North California")]
  North,
  #[strum(to_string = "Mid California")]
  Mid,
  #[strum(to_string = "South California")]
  South,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
  pub region: Region,
  pub color: MarkerColor,
  pub latitude: f64,
  pub longitude: f64,
  pub name: String,
  pub acres_burned: f64,
  pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapCluster {
  pub region: Region,
  pub label: String,
  pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
  pub center: (f64, f64),
  pub zoom: u8,
  pub clusters: Vec<MapCluster>,
}

impl MapView {
  pub fn marker_count(&self) -> usize {
    self.clusters.iter().map(|c| c.markers.len()).sum()
  }

  pub fn cluster(&self, region: Region) -> Option<&MapCluster> {
    self.clusters.iter().find(|c| c.region == region)
  }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountySlice {
  pub county: String,
  pub count: u64,
  pub percent: f64,
}

/// Fires per county, for the proportion chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountyDistribution {
  pub total: u64,
  /// Sorted by county name.
  pub slices: Vec<CountySlice>,
}

impl CountyDistribution {
  /// Distinct counties present, in name order.
  pub fn counties(&self) -> impl Iterator<Item = &str> {
    self.slices.iter().map(|s| s.county.as_str())
  }

  pub fn count(&self, county: &str) -> u64 {
    self
      .slices
      .iter()
      .find(|s| s.county == county)
      .map_or(0, |s| s.count)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBar {
  pub year: i32,
  pub mean_acres: f64,
  pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
  pub year: i32,
  pub personnel: f64,
  pub acres_burned: f64,
  pub name: String,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract: what we emit)
// ---------------------------------------------------------------------------

/// Widget bounds the frontend needs to draw the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterControls {
  pub year_min: i32,
  pub year_max: i32,
  pub acre_min: u64,
  pub acre_max: u64,
  pub acre_step: u64,
  pub sort_options: Vec<String>,
  pub major_only_default: bool,
}

/// Everything one refresh produces. Borrows the table rows from the record store.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
  pub view_id: String,
  pub filter: FilterSpec,
  pub total_records: usize,
  pub selected: usize,
  pub table: Vec<&'a Incident>,
  pub map: MapView,
  pub county_distribution: CountyDistribution,
  pub yearly_mean: Vec<YearBar>,
  pub size_vs_personnel: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
