//! Headless map view
//!
//! `MapView` owns the loaded marker set, the surface it draws on, the single
//! banner slot and the deferred-task queue. All operations run to completion
//! on the caller's thread; the host drives time through [`MapView::advance`].

pub mod banner;
pub mod recording;
pub mod surface;
pub mod timers;

use std::time::Duration;

use serde::Serialize;

pub use banner::{Banner, BannerId, BannerKind};
pub use recording::RecordingSurface;
pub use surface::{Corner, FitOptions, MapOptions, MapSurface, PlacedMarker, TileLayer};
pub use timers::{Task, TaskId, TimerQueue};

use crate::bounds::BoundsAccumulator;
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::models::{MarkerRecord, MarkerSet, StatusId};
use crate::popup::{popup_html, LinkTemplates, PopupOptions};
use crate::style::{MarkerPalette, StyleKind};
use banner::BannerSlot;

pub const MSG_INIT_FAILED: &str = "Error loading the map. Please reload the page.";
pub const MSG_RENDER_FAILED: &str = "Error displaying the markers.";
pub const MSG_NO_RESULTS: &str = "No results found for the applied filters.";
pub const MSG_FILTER_FAILED: &str = "Error applying the filters. Please try again.";
pub const MSG_RESET_FAILED: &str = "Error resetting the filters.";

/// Everything the view needs to know that is not data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewConfig {
    pub map: MapOptions,
    pub fit: FitOptions,
    pub palette: MarkerPalette,
    pub rejected_status: StatusId,
    pub links: LinkTemplates,
    pub popup: PopupOptions,
    pub layout_fixup_delay: Duration,
    pub resize_debounce: Duration,
    pub banner_timeout: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            map: MapOptions::default(),
            fit: FitOptions::default(),
            palette: MarkerPalette::default(),
            rejected_status: StatusId::from(12),
            links: LinkTemplates::default(),
            popup: PopupOptions::default(),
            layout_fixup_delay: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(250),
            banner_timeout: Duration::from_secs(5),
        }
    }
}

/// Outcome of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Records handed to the render (the counter value)
    pub matched: usize,
    /// Records placed on the marker layer
    pub plotted: usize,
    /// Records dropped for lack of valid coordinates
    pub skipped: usize,
}

pub struct MapView<S: MapSurface> {
    config: ViewConfig,
    surface: S,
    markers: MarkerSet,
    timers: TimerQueue,
    banner: BannerSlot,
    pending_resize: Option<TaskId>,
    ready: bool,
}

impl<S: MapSurface> MapView<S> {
    /// Build the map on `mount` and show the initial markers.
    ///
    /// Returns `None` when there is nothing to mount on; the caller's page
    /// carries on without a map.
    pub fn mount(config: ViewConfig, mount: Option<S>, markers: MarkerSet) -> Option<Self> {
        let Some(surface) = mount else {
            tracing::error!("Map container not found");
            return None;
        };

        let mut view = Self {
            config,
            surface,
            markers,
            timers: TimerQueue::new(),
            banner: BannerSlot::default(),
            pending_resize: None,
            ready: false,
        };

        if let Err(e) = view.surface.create_map(&view.config.map) {
            tracing::error!(error = %e, "Failed to initialize map");
            view.show_banner(BannerKind::Error, MSG_INIT_FAILED);
            return Some(view);
        }
        view.ready = true;

        if view.markers.is_empty() {
            tracing::info!("No census markers to display");
            view.surface.set_counter(0);
        } else {
            tracing::info!(count = view.markers.len(), "Loading initial census markers");
            let all = view.markers.clone();
            view.render(&all.all());
        }

        let delay = view.config.layout_fixup_delay;
        view.timers.schedule(delay, Task::LayoutFixup);

        Some(view)
    }

    /// Replace the marker layer with `records`.
    ///
    /// Returns `None` if the map never initialized or the pass failed; in the
    /// latter case an error banner is shown and the next call starts over
    /// from a cleared layer.
    pub fn render(&mut self, records: &[&MarkerRecord]) -> Option<RenderReport> {
        if !self.ready {
            return None;
        }

        match self.try_render(records) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(error = %e, "Failed to display markers");
                self.show_banner(BannerKind::Error, MSG_RENDER_FAILED);
                None
            }
        }
    }

    fn try_render(&mut self, records: &[&MarkerRecord]) -> Result<RenderReport> {
        self.surface.clear_markers()?;
        self.surface.set_counter(records.len());

        let mut bounds = BoundsAccumulator::new();

        for record in records {
            let Some(position) = record.position else {
                tracing::warn!(record_id = %record.id, "Census record has no valid coordinates");
                continue;
            };

            let kind = StyleKind::classify(record, &self.config.rejected_status);
            let marker = PlacedMarker {
                id: record.id.clone(),
                position,
                kind,
                style: self.config.palette.style(kind).clone(),
                popup_html: popup_html(record, position, &self.config.links),
                popup: self.config.popup,
            };

            self.surface.add_marker(marker)?;
            bounds.extend(position);
        }

        // Nothing plotted: the viewport stays where it is.
        if let Some(rect) = bounds.rect() {
            self.surface.fit_bounds(rect, self.config.fit)?;
        }

        Ok(RenderReport {
            matched: records.len(),
            plotted: bounds.count(),
            skipped: records.len() - bounds.count(),
        })
    }

    /// Read the filter controls and render the matching subset.
    ///
    /// Returns the number of matches, or `None` if the controls could not be
    /// read (the displayed set is left untouched).
    pub fn apply_filter(&mut self) -> Option<usize> {
        match self.surface.read_filters() {
            Ok(criteria) => Some(self.apply_criteria(&criteria)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read filters");
                self.show_banner(BannerKind::Error, MSG_FILTER_FAILED);
                None
            }
        }
    }

    /// Render the subset of the loaded set matching `criteria`
    pub fn apply_criteria(&mut self, criteria: &FilterCriteria) -> usize {
        tracing::debug!(?criteria, "Applying filters");

        let markers = self.markers.clone();
        let filtered = criteria.apply(&markers);

        if filtered.is_empty() {
            self.show_banner(BannerKind::Notice, MSG_NO_RESULTS);
        }

        self.render(&filtered);
        filtered.len()
    }

    /// Clear the filter controls and any banner, then show every record
    pub fn reset_filter(&mut self) -> Option<RenderReport> {
        if let Err(e) = self.surface.clear_filters() {
            tracing::error!(error = %e, "Failed to reset filters");
            self.show_banner(BannerKind::Error, MSG_RESET_FAILED);
            return None;
        }

        self.dismiss_banner();

        let markers = self.markers.clone();
        self.render(&markers.all())
    }

    /// Show a banner, replacing whatever banner is up
    pub fn show_banner(&mut self, kind: BannerKind, message: impl Into<String>) -> BannerId {
        self.dismiss_banner();

        let banner = self.banner.next_banner(kind, message);
        let id = banner.id;
        self.surface.show_banner(&banner);

        let dismissal = self.timers.schedule(self.config.banner_timeout, Task::DismissBanner(id));
        self.banner.install(banner, dismissal);
        id
    }

    pub fn dismiss_banner(&mut self) {
        if let Some((banner, dismissal)) = self.banner.take() {
            self.timers.cancel(dismissal);
            self.surface.remove_banner(banner.id);
        }
    }

    /// Note a window resize; the size recalculation runs once resizing goes quiet
    pub fn on_resize(&mut self) {
        if let Some(pending) = self.pending_resize.take() {
            self.timers.cancel(pending);
        }
        let delay = self.config.resize_debounce;
        self.pending_resize = Some(self.timers.schedule(delay, Task::ResizeSettled));
    }

    /// Advance the view clock and run whatever came due
    pub fn advance(&mut self, elapsed: Duration) {
        for task in self.timers.advance(elapsed) {
            match task {
                Task::LayoutFixup => self.invalidate_size(),
                Task::ResizeSettled => {
                    self.pending_resize = None;
                    self.invalidate_size();
                }
                Task::DismissBanner(id) => {
                    if self.banner.expire(id).is_some() {
                        self.surface.remove_banner(id);
                    }
                }
            }
        }
    }

    fn invalidate_size(&mut self) {
        if self.ready {
            self.surface.invalidate_size();
        }
    }

    /// Tear the view down (page navigation), handing the surface back
    pub fn unmount(self) -> S {
        self.surface
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.current()
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }
}
