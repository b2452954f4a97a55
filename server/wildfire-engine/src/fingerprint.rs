//! Stable identifiers for datasets and dashboard views.
//!
//! A view id depends only on the dataset content and the filter spec, so the
//! frontend can skip a redraw when a refresh would produce the same view.

use crate::types::{FilterSpec, Incident};

/// Fingerprint of the raw source bytes.
pub fn dataset(bytes: &[u8]) -> String {
  let hex = blake3::hash(bytes).to_hex();
  hex[..32].to_string()
}

/// Fingerprint of an in-memory record set (no source bytes available).
pub fn records(incidents: &[Incident]) -> String {
  let mut hasher = blake3::Hasher::new();
  for i in incidents {
    hasher.update(
      format!(
        "{}|{}|{:?}|{:?}|{:?}|{:?}|{}|{:?}\n",
        i.archive_year,
        i.acres_burned,
        i.major_incident,
        i.county,
        i.latitude,
        i.longitude,
        i.name,
        i.personnel_involved
      )
      .as_bytes(),
    );
  }
  let hex = hasher.finalize().to_hex();
  hex[..32].to_string()
}

/// Canonical text form of a spec. Equal specs always render identically.
pub fn canonical_spec(spec: &FilterSpec) -> String {
  format!(
    "years={}..{}|acres={}..{}|major_only={}|sort={}",
    spec.year_range.0,
    spec.year_range.1,
    spec.acre_range.0,
    spec.acre_range.1,
    spec.major_only,
    spec.sort
  )
}

/// Stable view id: `view-` + 16 hex chars of blake3(dataset | spec).
pub fn view(dataset_fingerprint: &str, spec: &FilterSpec) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(dataset_fingerprint.as_bytes());
  hasher.update(b"|");
  hasher.update(canonical_spec(spec).as_bytes());
  let hex = hasher.finalize().to_hex();
  format!("view-{}", &hex[..16])
}
