//! Map marker classification: severity color by acreage, region cluster by latitude.
//!
//! Both lookups are ordered tables of ranges, evaluated first-match-wins.
//! Severity bands exclude their lower bound, so a fire sitting exactly on a
//! bracket edge lands in the next lower bracket (50000 acres is red).
//! Region bands are open on both ends: 36.5 and 38.5 match nothing and the
//! record is left off the map.

use strum::IntoEnumIterator;

use crate::config::Config;
use crate::types::{Incident, MapCluster, MapView, Marker, MarkerColor, Region};

/// One row of a lookup table. The lower bound is always exclusive; the upper
/// bound is exclusive unless `upper_inclusive`. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBand<T> {
  pub above: Option<f64>,
  pub below: Option<f64>,
  pub upper_inclusive: bool,
  pub label: T,
}

impl<T: Copy> RangeBand<T> {
  /// `(above, below)`
  pub fn between(above: f64, below: f64, label: T) -> Self {
    Self {
      above: Some(above),
      below: Some(below),
      upper_inclusive: false,
      label,
    }
  }

  /// `(above, up_to]`
  pub fn up_to(above: f64, up_to: f64, label: T) -> Self {
    Self {
      upper_inclusive: true,
      ..Self::between(above, up_to, label)
    }
  }

  /// `(above, inf)`
  pub fn above(above: f64, label: T) -> Self {
    Self {
      above: Some(above),
      below: None,
      upper_inclusive: false,
      label,
    }
  }

  pub fn any(label: T) -> Self {
    Self {
      above: None,
      below: None,
      upper_inclusive: false,
      label,
    }
  }

  pub fn contains(&self, value: f64) -> bool {
    let above_lower = self.above.map_or(true, |lo| value > lo);
    let below_upper = self.below.map_or(true, |hi| {
      if self.upper_inclusive {
        value <= hi
      } else {
        value < hi
      }
    });
    above_lower && below_upper
  }
}

/// First band containing `value`, if any.
pub fn lookup<T: Copy>(bands: &[RangeBand<T>], value: f64) -> Option<T> {
  bands.iter().find(|b| b.contains(value)).map(|b| b.label)
}

/// Marker color for a fire of `acres`. Falls back to green when no band matches.
pub fn severity_color(acres: f64, config: &Config) -> MarkerColor {
  lookup(&config.severity_bands, acres).unwrap_or(MarkerColor::Green)
}

pub fn region_for(latitude: f64, config: &Config) -> Option<Region> {
  lookup(&config.region_bands, latitude)
}

/// Classify one record. `None` when it has no usable location or falls outside every region.
pub fn classify_record(incident: &Incident, config: &Config) -> Option<Marker> {
  let (latitude, longitude) = match (incident.latitude, incident.longitude) {
    (Some(lat), Some(lon)) if lon != 0.0 => (lat, lon),
    _ => return None,
  };
  let region = region_for(latitude, config)?;

  Some(Marker {
    region,
    color: severity_color(incident.acres_burned, config),
    latitude,
    longitude,
    name: incident.name.clone(),
    acres_burned: incident.acres_burned,
    popup: format!(
      "Fire Name:{}\nAcresBurned:{}",
      incident.name, incident.acres_burned
    ),
  })
}

/// Build the map: one cluster per region (always all three, possibly empty),
/// markers in selection order.
pub fn build_map(records: &[&Incident], config: &Config) -> MapView {
  let mut clusters: Vec<MapCluster> = Region::iter()
    .map(|region| MapCluster {
      region,
      label: region.to_string(),
      markers: Vec::new(),
    })
    .collect();

  for marker in records.iter().filter_map(|r| classify_record(r, config)) {
    if let Some(cluster) = clusters.iter_mut().find(|c| c.region == marker.region) {
      cluster.markers.push(marker);
    }
  }

  MapView {
    center: config.map_center,
    zoom: config.map_zoom,
    clusters,
  }
}
