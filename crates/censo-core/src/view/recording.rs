//! A headless surface that records what the view asked for.
//!
//! Used by the HTTP layer to precompute a render and by tests to observe the
//! view. Failures can be injected to exercise the view's recovery paths.

use geo::Rect;

use super::banner::{Banner, BannerId};
use super::surface::{FitOptions, MapOptions, MapSurface, PlacedMarker};
use crate::error::{CensoError, Result};
use crate::filter::FilterCriteria;

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub map: Option<MapOptions>,
    pub markers: Vec<PlacedMarker>,
    pub counter: Option<usize>,
    pub banner: Option<Banner>,
    pub fitted: Option<(Rect<f64>, FitOptions)>,
    pub fit_calls: usize,
    pub invalidations: usize,

    /// Values the filter controls currently hold
    pub filters: FilterCriteria,

    pub fail_create: bool,
    /// Fail `add_marker` once this many markers have been placed
    pub fail_add_after: Option<usize>,
    pub fail_read_filters: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: FilterCriteria) -> Self {
        self.filters = filters;
        self
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.markers.iter().map(|m| m.id.to_string()).collect()
    }
}

impl MapSurface for RecordingSurface {
    fn create_map(&mut self, options: &MapOptions) -> Result<()> {
        if self.fail_create {
            return Err(CensoError::Surface("map library unavailable".to_string()));
        }
        self.map = Some(options.clone());
        self.markers.clear();
        Ok(())
    }

    fn clear_markers(&mut self) -> Result<()> {
        self.markers.clear();
        Ok(())
    }

    fn add_marker(&mut self, marker: PlacedMarker) -> Result<()> {
        if self.fail_add_after.is_some_and(|limit| self.markers.len() >= limit) {
            return Err(CensoError::Surface(format!("cannot place marker {}", marker.id)));
        }
        self.markers.push(marker);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, options: FitOptions) -> Result<()> {
        self.fitted = Some((bounds, options));
        self.fit_calls += 1;
        Ok(())
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }

    fn set_counter(&mut self, count: usize) {
        self.counter = Some(count);
    }

    fn show_banner(&mut self, banner: &Banner) {
        self.banner = Some(banner.clone());
    }

    fn remove_banner(&mut self, id: BannerId) {
        if self.banner.as_ref().is_some_and(|b| b.id == id) {
            self.banner = None;
        }
    }

    fn read_filters(&self) -> Result<FilterCriteria> {
        if self.fail_read_filters {
            return Err(CensoError::Surface("filter controls missing".to_string()));
        }
        Ok(self.filters.clone())
    }

    fn clear_filters(&mut self) -> Result<()> {
        self.filters = FilterCriteria::default();
        Ok(())
    }
}
