//! Censo Core - Domain models, filtering, and the headless map view
//!
//! This crate contains the census marker model, the filter engine, popup and
//! style shaping, layered configuration, and the `MapView` state machine that
//! drives any `MapSurface` implementation.

pub mod bounds;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod popup;
pub mod style;
pub mod view;

pub use error::{CensoError, Result};
pub use filter::FilterCriteria;
pub use models::{LatLng, MarkerPayload, MarkerRecord, MarkerSet, RecordId, StatusId};
pub use view::{MapSurface, MapView, ViewConfig};
