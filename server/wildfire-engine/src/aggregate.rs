//! Chart series derived from a selection: county shares, yearly mean size, size vs personnel.

use std::collections::BTreeMap;

use crate::types::{CountyDistribution, CountySlice, Incident, ScatterPoint, YearBar};

/// Fires per county. Records without a county are left out of both counts and total.
pub fn county_distribution(records: &[&Incident]) -> CountyDistribution {
  let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
  for county in records.iter().filter_map(|r| r.county.as_deref()) {
    *counts.entry(county).or_insert(0) += 1;
  }

  let total: u64 = counts.values().sum();
  let slices = counts
    .into_iter()
    .map(|(county, count)| CountySlice {
      county: county.to_string(),
      count,
      percent: percent(count, total),
    })
    .collect();

  CountyDistribution { total, slices }
}

/// Mean acres burned per archive year, ordered by year.
pub fn yearly_mean(records: &[&Incident]) -> Vec<YearBar> {
  let mut sums: BTreeMap<i32, (f64, u64)> = BTreeMap::new();
  for r in records {
    let entry = sums.entry(r.archive_year).or_insert((0.0, 0));
    entry.0 += r.acres_burned;
    entry.1 += 1;
  }

  sums
    .into_iter()
    .map(|(year, (sum, count))| YearBar {
      year,
      mean_acres: sum / count as f64,
      count,
    })
    .collect()
}

/// Bubble chart input in selection order. Records without a personnel count are skipped.
pub fn size_vs_personnel(records: &[&Incident]) -> Vec<ScatterPoint> {
  records
    .iter()
    .filter_map(|r| {
      r.personnel_involved.map(|personnel| ScatterPoint {
        year: r.archive_year,
        personnel,
        acres_burned: r.acres_burned,
        name: r.name.clone(),
      })
    })
    .collect()
}

fn percent(count: u64, total: u64) -> f64 {
  if total == 0 {
    return 0.0;
  }
  let raw = count as f64 * 100.0 / total as f64;
  (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fire(year: i32, acres: f64, county: Option<&str>, personnel: Option<f64>) -> Incident {
    Incident {
      archive_year: year,
      acres_burned: acres,
      major_incident: Some(false),
      county: county.map(str::to_string),
      latitude: None,
      longitude: None,
      name: format!("{}-{year}", county.unwrap_or("unknown")),
      personnel_involved: personnel,
    }
  }

  #[test]
  fn counts_by_county_sorted_by_name() {
    let a = fire(2018, 10.0, Some("Yolo"), None);
    let b = fire(2018, 10.0, Some("Alpine"), None);
    let c = fire(2019, 10.0, Some("Yolo"), None);
    let d = fire(2019, 10.0, None, None);

    let dist = county_distribution(&[&a, &b, &c, &d]);
    assert_eq!(dist.total, 3);
    assert_eq!(dist.counties().collect::<Vec<_>>(), vec!["Alpine", "Yolo"]);
    assert_eq!(dist.count("Yolo"), 2);
    assert_eq!(dist.count("Butte"), 0);
    assert!((dist.slices[1].percent - 66.67).abs() < 1e-9);
    assert!((dist.slices[0].percent - 33.33).abs() < 1e-9);
  }

  #[test]
  fn mean_acres_per_year() {
    let a = fire(2018, 100.0, Some("Butte"), None);
    let b = fire(2013, 50.0, Some("Butte"), None);
    let c = fire(2018, 300.0, Some("Butte"), None);

    let bars = yearly_mean(&[&a, &b, &c]);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].year, 2013);
    assert_eq!(bars[0].mean_acres, 50.0);
    assert_eq!(bars[1].year, 2018);
    assert_eq!(bars[1].mean_acres, 200.0);
    assert_eq!(bars[1].count, 2);
  }

  #[test]
  fn scatter_skips_missing_personnel() {
    let a = fire(2018, 100.0, Some("Butte"), Some(25.0));
    let b = fire(2019, 200.0, Some("Kern"), None);
    let c = fire(2020, 300.0, Some("Lake"), Some(0.0));

    let points = size_vs_personnel(&[&a, &b, &c]);
    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2018, 2020]);
    assert_eq!(points[1].personnel, 0.0);
    assert_eq!(points[0].name, "Butte-2018");
  }

  #[test]
  fn empty_selection_yields_empty_series() {
    let dist = county_distribution(&[]);
    assert_eq!(dist.total, 0);
    assert!(dist.slices.is_empty());
    assert!(yearly_mean(&[]).is_empty());
    assert!(size_vs_personnel(&[]).is_empty());
  }
}
