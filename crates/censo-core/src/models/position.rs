use geo::{coord, Coord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Parse a coordinate pair delivered as numbers or numeric strings
    pub fn from_json(lat: &Value, lng: &Value) -> Option<Self> {
        Self::new(parse_degrees(lat)?, parse_degrees(lng)?)
    }

    /// Convert to a `geo` coordinate (x = longitude, y = latitude)
    pub fn to_coord(self) -> Coord<f64> {
        coord! { x: self.lng, y: self.lat }
    }
}

fn parse_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
