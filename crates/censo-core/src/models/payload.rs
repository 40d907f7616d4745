use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker record as delivered to the page at load time.
///
/// Numeric fields stay loosely typed here: the tracker stores custom field
/// values as text, and older payloads sent them as JSON numbers. They are
/// normalized once, in `MarkerRecord::from_payload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerPayload {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub lat: Value,

    #[serde(default)]
    pub lng: Value,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub building_type: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub status_id: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<String>,
}

/// Everything the map page needs, shipped once per page load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    pub markers: Vec<MarkerPayload>,
    pub localities: Vec<String>,
    pub building_types: Vec<String>,
}
