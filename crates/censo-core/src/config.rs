use crate::error::{CensoError, Result};
use crate::models::{CustomFieldId, LatLng, StatusId};
use crate::popup::LinkTemplates;
use crate::view::{FitOptions, MapOptions, TileLayer, ViewConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has at least the current precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Custom fields holding the census data on each issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    pub latitude: CustomFieldId,
    pub longitude: CustomFieldId,
    pub locality: CustomFieldId,
    pub address: CustomFieldId,
    pub building_type: CustomFieldId,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            latitude: 118,
            longitude: 117,
            locality: 102,
            address: 105,
            building_type: 106,
        }
    }
}

impl FieldMapping {
    pub fn all(&self) -> [CustomFieldId; 5] {
        [self.latitude, self.longitude, self.locality, self.address, self.building_type]
    }
}

/// Map viewport, tile layer and timing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub fit_padding: u32,
    pub fit_max_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub tile_max_zoom: u8,
    pub layout_fixup_ms: u64,
    pub resize_debounce_ms: u64,
    pub banner_timeout_ms: u64,
}

impl Default for MapSettings {
    fn default() -> Self {
        let map = MapOptions::default();
        let fit = FitOptions::default();
        Self {
            center_lat: map.center.lat,
            center_lng: map.center.lng,
            zoom: map.zoom,
            min_zoom: map.min_zoom,
            max_zoom: map.max_zoom,
            fit_padding: fit.padding[0],
            fit_max_zoom: fit.max_zoom,
            tile_url: map.tile_layer.url_template,
            tile_attribution: map.tile_layer.attribution,
            tile_max_zoom: map.tile_layer.max_zoom,
            layout_fixup_ms: 100,
            resize_debounce_ms: 250,
            banner_timeout_ms: 5000,
        }
    }
}

impl MapSettings {
    /// Check viewport values before they reach the map
    pub fn validate(&self) -> Result<()> {
        if LatLng::new(self.center_lat, self.center_lng).is_none() {
            return Err(CensoError::ConfigInvalid {
                key: "map.center".to_string(),
                reason: format!(
                    "({}, {}) is not a valid coordinate",
                    self.center_lat, self.center_lng
                ),
            });
        }

        if self.min_zoom > self.max_zoom {
            return Err(CensoError::ConfigInvalid {
                key: "map.min_zoom".to_string(),
                reason: format!(
                    "min_zoom ({}) cannot be greater than max_zoom ({})",
                    self.min_zoom, self.max_zoom
                ),
            });
        }

        if !(self.min_zoom..=self.max_zoom).contains(&self.zoom) {
            return Err(CensoError::ConfigInvalid {
                key: "map.zoom".to_string(),
                reason: format!(
                    "zoom ({}) must lie within [{}, {}]",
                    self.zoom, self.min_zoom, self.max_zoom
                ),
            });
        }

        Ok(())
    }
}

/// Layered configuration for the census map
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub tracker_id: ConfigValue<i32>,
    pub fields: ConfigValue<FieldMapping>,
    pub rejected_status: ConfigValue<StatusId>,
    pub map: ConfigValue<MapSettings>,
    pub links: ConfigValue<LinkTemplates>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            tracker_id: ConfigValue::new(9, ConfigSource::Default),
            fields: ConfigValue::new(FieldMapping::default(), ConfigSource::Default),
            rejected_status: ConfigValue::new(StatusId::from(12), ConfigSource::Default),
            map: ConfigValue::new(MapSettings::default(), ConfigSource::Default),
            links: ConfigValue::new(LinkTemplates::default(), ConfigSource::Default),
        }
    }

    /// Defaults, then the optional file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::with_defaults();
        let config = match path {
            Some(path) => config.load_from_file(path)?,
            None => config,
        };
        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CensoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CensoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(tracker_id) = file_config.tracker_id {
            self.tracker_id.update(tracker_id, ConfigSource::File);
        }

        if let Some(rejected_status) = file_config.rejected_status {
            self.rejected_status.update(rejected_status, ConfigSource::File);
        }

        if let Some(fields) = file_config.fields {
            self.fields.update(fields, ConfigSource::File);
        }

        if let Some(map) = file_config.map {
            self.map.update(map, ConfigSource::File);
        }

        if let Some(links) = file_config.links {
            self.links.update(links, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CENSO_TRACKER_ID
        if let Some(tracker_id) = env_parse::<i32>("CENSO_TRACKER_ID", "integer tracker id") {
            self.tracker_id.update(tracker_id, ConfigSource::Environment);
        }

        // CENSO_REJECTED_STATUS
        if let Ok(raw) = env::var("CENSO_REJECTED_STATUS") {
            match StatusId::parse(&raw) {
                Some(status) => self.rejected_status.update(status, ConfigSource::Environment),
                None => tracing::warn!("Invalid CENSO_REJECTED_STATUS value: cannot be empty"),
            }
        }

        // CENSO_*_FIELD
        let mut fields = self.fields.value;
        let mut fields_changed = false;
        for (var, slot) in [
            ("CENSO_LATITUDE_FIELD", &mut fields.latitude),
            ("CENSO_LONGITUDE_FIELD", &mut fields.longitude),
            ("CENSO_LOCALITY_FIELD", &mut fields.locality),
            ("CENSO_ADDRESS_FIELD", &mut fields.address),
            ("CENSO_BUILDING_TYPE_FIELD", &mut fields.building_type),
        ] {
            if let Some(id) = env_parse::<CustomFieldId>(var, "integer custom field id") {
                *slot = id;
                fields_changed = true;
            }
        }
        if fields_changed {
            self.fields.update(fields, ConfigSource::Environment);
        }

        // CENSO_MAP_LOOKUP_URL / CENSO_DETAIL_URL
        let mut links = self.links.value.clone();
        let lookup = env::var("CENSO_MAP_LOOKUP_URL").ok();
        let detail = env::var("CENSO_DETAIL_URL").ok();
        if lookup.is_some() || detail.is_some() {
            if let Some(lookup) = lookup {
                links.map_lookup = lookup;
            }
            if let Some(detail) = detail {
                links.detail = detail;
            }
            self.links.update(links, ConfigSource::Environment);
        }

        self
    }

    /// Resolve the settings the map view runs with
    pub fn to_view_config(&self) -> Result<ViewConfig> {
        let map = &self.map.value;
        map.validate()?;

        let center = LatLng::new(map.center_lat, map.center_lng).ok_or_else(|| {
            CensoError::ConfigInvalid {
                key: "map.center".to_string(),
                reason: "not a valid coordinate".to_string(),
            }
        })?;

        let defaults = ViewConfig::default();
        Ok(ViewConfig {
            map: MapOptions {
                center,
                zoom: map.zoom,
                min_zoom: map.min_zoom,
                max_zoom: map.max_zoom,
                tile_layer: TileLayer {
                    url_template: map.tile_url.clone(),
                    attribution: map.tile_attribution.clone(),
                    max_zoom: map.tile_max_zoom,
                },
                ..defaults.map
            },
            fit: FitOptions {
                padding: [map.fit_padding, map.fit_padding],
                max_zoom: map.fit_max_zoom,
            },
            rejected_status: self.rejected_status.value.clone(),
            links: self.links.value.clone(),
            layout_fixup_delay: Duration::from_millis(map.layout_fixup_ms),
            resize_debounce: Duration::from_millis(map.resize_debounce_ms),
            banner_timeout: Duration::from_millis(map.banner_timeout_ms),
            ..defaults
        })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "tracker_id".to_string(),
            (self.tracker_id.value.to_string(), self.tracker_id.source),
        );

        map.insert(
            "fields".to_string(),
            (format!("{:?}", self.fields.value), self.fields.source),
        );

        map.insert(
            "rejected_status".to_string(),
            (self.rejected_status.value.to_string(), self.rejected_status.source),
        );

        map.insert(
            "map".to_string(),
            (
                format!(
                    "center=({}, {}) zoom={}",
                    self.map.value.center_lat, self.map.value.center_lng, self.map.value.zoom
                ),
                self.map.source,
            ),
        );

        map.insert(
            "links".to_string(),
            (
                format!("{} | {}", self.links.value.map_lookup, self.links.value.detail),
                self.links.source,
            ),
        );

        map
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, expected: &str) -> Option<T> {
    let raw = env::var(var).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected {}", var, raw, expected);
            None
        }
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize)]
struct FileConfig {
    tracker_id: Option<i32>,
    rejected_status: Option<StatusId>,
    fields: Option<FieldMapping>,
    map: Option<MapSettings>,
    links: Option<LinkTemplates>,
}
