//! Wildfire Dashboard Selection Engine: deterministic filter-and-derive pipeline.
//!
//! Loads the California wildfire incident dataset once, turns each filter
//! interaction into an immutable FilterSpec, and derives everything the
//! dashboard draws from one shared selection: the table, the clustered map
//! markers, and the county / yearly / personnel chart series.
//!
//! No DB, no network; pure computation over in-memory data.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod select;
pub mod store;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::{DataLoadError, EngineError};
pub use select::{select, Selection};
pub use store::RecordStore;
pub use types::{DashboardView, FilterSpec, Incident, InboundFilter, SortOrder};
