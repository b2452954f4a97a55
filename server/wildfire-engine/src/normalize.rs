//! Normalize inbound filter interactions into immutable FilterSpecs.

use crate::error::EngineError;
use crate::types::*;

/// Parse and validate an InboundFilter. Missing ranges fall back to the full
/// slider bounds in `controls`.
///
/// Reversed ranges are passed through untouched; they select nothing.
pub fn normalize(raw: &InboundFilter, controls: &FilterControls) -> Result<FilterSpec, EngineError> {
  let year_range = match raw.year_range {
    Some([lo, hi]) => (lo, hi),
    None => (controls.year_min, controls.year_max),
  };

  let acre_range = match raw.acre_range {
    Some([lo, hi]) => {
      if !lo.is_finite() || !hi.is_finite() {
        return Err(EngineError::validation("acre_range", "bounds must be finite numbers"));
      }
      (lo, hi)
    }
    None => (controls.acre_min as f64, controls.acre_max as f64),
  };

  let sort = match raw.sort_by.as_deref() {
    Some(s) => SortOrder::from_str_loose(s)
      .ok_or_else(|| EngineError::validation("sort_by", "expected None|Max First|Min First"))?,
    None => SortOrder::None,
  };

  Ok(FilterSpec::new(year_range, acre_range, raw.major_only, sort))
}
