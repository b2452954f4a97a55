//! The selection pipeline: filter the record store by a spec, then sort.

use crate::store::RecordStore;
use crate::types::{FilterSpec, Incident, SortOrder};

/// The ordered records passing one filter spec. Borrowed from the store and
/// shared read-only by every view built in the same refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
  records: Vec<&'a Incident>,
}

impl<'a> Selection<'a> {
  pub fn records(&self) -> &[&'a Incident] {
    &self.records
  }

  pub fn iter(&self) -> impl Iterator<Item = &'a Incident> + '_ {
    self.records.iter().copied()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn into_records(self) -> Vec<&'a Incident> {
    self.records
  }
}

/// True iff the record satisfies every clause of the spec.
///
/// Ranges are inclusive. A reversed range (min > max) matches nothing.
/// Records with an unknown major flag only fail when `major_only` is set.
pub fn matches(spec: &FilterSpec, incident: &Incident) -> bool {
  let (min_year, max_year) = spec.year_range;
  let (min_acres, max_acres) = spec.acre_range;

  min_year <= incident.archive_year
    && incident.archive_year <= max_year
    && min_acres <= incident.acres_burned
    && incident.acres_burned <= max_acres
    && (!spec.major_only || incident.major_incident == Some(true))
}

/// Filter then sort. Sorting is stable, so ties keep store order.
pub fn select<'a>(store: &'a RecordStore, spec: &FilterSpec) -> Selection<'a> {
  let mut records: Vec<&Incident> = store.all().iter().filter(|i| matches(spec, i)).collect();

  match spec.sort {
    SortOrder::None => {}
    SortOrder::Descending => records.sort_by(|a, b| b.acres_burned.total_cmp(&a.acres_burned)),
    SortOrder::Ascending => records.sort_by(|a, b| a.acres_burned.total_cmp(&b.acres_burned)),
  }

  Selection { records }
}
