//! Core engine: holds the record store, turns filter interactions into dashboard views.

use strum::IntoEnumIterator;

use crate::aggregate;
use crate::classify;
use crate::config::Config;
use crate::error::EngineError;
use crate::fingerprint;
use crate::normalize;
use crate::select::{self, Selection};
use crate::store::RecordStore;
use crate::types::*;

/// The dashboard engine. Owns the immutable record store; every refresh is a
/// pure function of the store and one FilterSpec.
pub struct Engine {
  config: Config,
  store: RecordStore,
}

impl Engine {
  pub fn new(config: Config, store: RecordStore) -> Self {
    Self { config, store }
  }

  pub fn with_defaults(store: RecordStore) -> Self {
    Self::new(Config::default(), store)
  }

  pub fn store(&self) -> &RecordStore {
    &self.store
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Sidebar widget bounds: fixed year slider, acre slider spanning the data.
  pub fn controls(&self) -> FilterControls {
    let (acre_min, acre_max) = self
      .store
      .acre_bounds()
      .map_or((0, 0), |(lo, hi)| (lo.floor() as u64, hi.ceil() as u64));

    FilterControls {
      year_min: self.config.year_bounds.0,
      year_max: self.config.year_bounds.1,
      acre_min,
      acre_max,
      acre_step: self.config.acre_step,
      sort_options: SortOrder::iter().map(|s| s.to_string()).collect(),
      major_only_default: false,
    }
  }

  /// Process a single inbound filter interaction.
  pub fn process(&self, raw: &InboundFilter) -> Result<DashboardView<'_>, EngineError> {
    let spec = normalize::normalize(raw, &self.controls())?;
    Ok(self.refresh(&spec))
  }

  pub fn select(&self, spec: &FilterSpec) -> Selection<'_> {
    select::select(&self.store, spec)
  }

  /// Recompute the selection and every derived view for one spec.
  pub fn refresh(&self, spec: &FilterSpec) -> DashboardView<'_> {
    let selection = self.select(spec);
    log::debug!(
      "refresh {}: {} of {} incidents selected",
      fingerprint::canonical_spec(spec),
      selection.len(),
      self.store.len()
    );

    let records = selection.records();
    let map = classify::build_map(records, &self.config);
    let county_distribution = aggregate::county_distribution(records);
    let yearly_mean = aggregate::yearly_mean(records);
    let size_vs_personnel = aggregate::size_vs_personnel(records);

    DashboardView {
      view_id: fingerprint::view(self.store.fingerprint(), spec),
      filter: *spec,
      total_records: self.store.len(),
      selected: selection.len(),
      table: selection.into_records(),
      map,
      county_distribution,
      yearly_mean,
      size_vs_personnel,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fire(name: &str, year: i32, acres: f64, lat: f64, lon: f64) -> Incident {
    Incident {
      archive_year: year,
      acres_burned: acres,
      major_incident: Some(acres > 10_000.0),
      county: Some("Napa".into()),
      latitude: Some(lat),
      longitude: Some(lon),
      name: name.into(),
      personnel_involved: Some(100.0),
    }
  }

  fn engine() -> Engine {
    Engine::with_defaults(RecordStore::from_incidents(vec![
      fire("Atlas", 2017, 51_624.0, 38.39, -122.24),
      fire("Tubbs", 2017, 36_807.0, 38.6, -122.63),
      fire("Small", 2016, 120.5, 34.2, -118.1),
      fire("Nowhere", 2015, 800.0, 37.0, 0.0),
    ]))
  }

  #[test]
  fn controls_span_the_data() {
    let controls = engine().controls();
    assert_eq!((controls.year_min, controls.year_max), (2013, 2020));
    assert_eq!((controls.acre_min, controls.acre_max), (120, 51_624));
    assert_eq!(controls.acre_step, 500);
    assert_eq!(controls.sort_options, vec!["None", "Max First", "Min First"]);
  }

  #[test]
  fn empty_store_controls() {
    let controls = Engine::with_defaults(RecordStore::from_incidents(Vec::new())).controls();
    assert_eq!((controls.acre_min, controls.acre_max), (0, 0));
  }

  #[test]
  fn default_filter_selects_everything() {
    let engine = engine();
    let view = engine.process(&InboundFilter::default()).unwrap();
    assert_eq!(view.selected, 4);
    assert_eq!(view.total_records, 4);
    // Nowhere has longitude 0; the rest land in Mid, North and South.
    assert_eq!(view.map.marker_count(), 3);
    assert_eq!(view.county_distribution.count("Napa"), 4);
    assert_eq!(view.size_vs_personnel.len(), 4);
  }

  #[test]
  fn refresh_derives_every_view_from_the_same_selection() {
    let engine = engine();
    let spec = FilterSpec::new((2017, 2017), (0.0, 100_000.0), true, SortOrder::Ascending);
    let view = engine.refresh(&spec);
    let names: Vec<&str> = view.table.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Tubbs", "Atlas"]);
    assert_eq!(view.yearly_mean.len(), 1);
    assert_eq!(view.yearly_mean[0].year, 2017);
    assert_eq!(view.county_distribution.total, 2);
    assert_eq!(view.map.cluster(Region::North).unwrap().markers[0].name, "Tubbs");
    assert_eq!(view.map.cluster(Region::Mid).unwrap().markers[0].color, MarkerColor::DarkRed);
  }

  #[test]
  fn empty_selection_renders_empty_views() {
    let engine = engine();
    let spec = FilterSpec::new((2019, 2013), (0.0, 100_000.0), false, SortOrder::None);
    let view = engine.refresh(&spec);
    assert_eq!(view.selected, 0);
    assert!(view.table.is_empty());
    assert_eq!(view.map.clusters.len(), 3);
    assert_eq!(view.map.marker_count(), 0);
    assert!(view.yearly_mean.is_empty());
    assert!(view.size_vs_personnel.is_empty());
    assert_eq!(view.county_distribution.total, 0);
  }

  #[test]
  fn view_id_is_stable() {
    let e1 = engine();
    let e2 = engine();
    let v1 = e1.process(&InboundFilter::default()).unwrap();
    let v2 = e2.process(&InboundFilter::default()).unwrap();
    assert_eq!(v1.view_id, v2.view_id);
    assert!(v1.view_id.starts_with("view-"));
  }

  #[test]
  fn invalid_filter_returns_error() {
    let engine = engine();
    let raw = InboundFilter {
      sort_by: Some("by name".into()),
      ..InboundFilter::default()
    };
    let err = engine.process(&raw).unwrap_err();
    assert!(err.to_string().contains("sort_by"));
  }
}
