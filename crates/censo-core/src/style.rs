//! Marker styling

use serde::{Deserialize, Serialize};

use crate::models::{MarkerRecord, StatusId};

/// Circle marker appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl MarkerStyle {
    fn circle(fill_color: &str, color: &str) -> Self {
        Self {
            radius: 8.0,
            fill_color: fill_color.to_string(),
            color: color.to_string(),
            weight: 2.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

/// Which of the two styles a record gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Default,
    Rejected,
}

impl StyleKind {
    /// Rejected iff the record's normalized status code equals the sentinel
    pub fn classify(record: &MarkerRecord, rejected_status: &StatusId) -> Self {
        match &record.status_id {
            Some(status) if status == rejected_status => StyleKind::Rejected,
            _ => StyleKind::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPalette {
    pub default: MarkerStyle,
    pub rejected: MarkerStyle,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            default: MarkerStyle::circle("#3498db", "#2980b9"),
            rejected: MarkerStyle::circle("#e74c3c", "#c0392b"),
        }
    }
}

impl MarkerPalette {
    pub fn style(&self, kind: StyleKind) -> &MarkerStyle {
        match kind {
            StyleKind::Default => &self.default,
            StyleKind::Rejected => &self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerPayload;
    use serde_json::json;

    fn record(status_id: serde_json::Value) -> MarkerRecord {
        MarkerRecord::from_payload(&MarkerPayload {
            id: json!(1),
            status_id,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejected_regardless_of_representation() {
        let sentinel = StatusId::from(12);
        assert_eq!(StyleKind::classify(&record(json!(12)), &sentinel), StyleKind::Rejected);
        assert_eq!(StyleKind::classify(&record(json!("12")), &sentinel), StyleKind::Rejected);
        assert_eq!(StyleKind::classify(&record(json!(5)), &sentinel), StyleKind::Default);
        assert_eq!(StyleKind::classify(&record(json!(null)), &sentinel), StyleKind::Default);
    }

    #[test]
    fn test_palettes_differ() {
        let palette = MarkerPalette::default();
        assert_ne!(palette.default.fill_color, palette.rejected.fill_color);
        assert_ne!(palette.default.color, palette.rejected.color);
    }
}
