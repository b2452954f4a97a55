//! Engine configuration with sane defaults.

use crate::classify::RangeBand;
use crate::types::{MarkerColor, Region};

/// Slider bounds and classification tables for the dashboard.
#[derive(Debug, Clone)]
pub struct Config {
  /// Year slider bounds (inclusive). The dataset covers 2013..=2020.
  pub year_bounds: (i32, i32),
  /// Acre slider step.
  pub acre_step: u64,
  /// Acres -> marker color, first match wins. Each band is `(lower, upper]`.
  pub severity_bands: Vec<RangeBand<MarkerColor>>,
  /// Latitude -> region, first match wins. Bounds are strict; no fallback.
  pub region_bands: Vec<RangeBand<Region>>,
  /// Initial map center (lat, lon).
  pub map_center: (f64, f64),
  pub map_zoom: u8,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      year_bounds: (2013, 2020),
      acre_step: 500,
      severity_bands: vec![
        RangeBand::above(50_000.0, MarkerColor::DarkRed),
        RangeBand::up_to(20_000.0, 50_000.0, MarkerColor::Red),
        RangeBand::up_to(5_000.0, 20_000.0, MarkerColor::Orange),
        RangeBand::up_to(2_000.0, 5_000.0, MarkerColor::Yellow),
        RangeBand::up_to(500.0, 2_000.0, MarkerColor::DarkGreen),
        RangeBand::any(MarkerColor::Green),
      ],
      region_bands: vec![
        RangeBand::between(38.5, 42.5, Region::North),
        RangeBand::between(36.5, 38.5, Region::Mid),
        RangeBand::between(31.5, 36.5, Region::South),
      ],
      map_center: (37.8, -120.0),
      map_zoom: 6,
    }
  }
}
