//! Popup markup and outbound links for a marker

use serde::{Deserialize, Serialize};

use crate::models::{LatLng, MarkerRecord, RecordId};

/// Escape text for interpolation into HTML content or attribute values
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// URL templates for the two links carried by every popup.
///
/// `{lat}` and `{lng}` are replaced with the raw coordinates, `{id}` with the
/// record number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkTemplates {
    pub map_lookup: String,
    pub detail: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self {
            map_lookup: "https://www.google.com/maps?q={lat},{lng}".to_string(),
            detail: "/issues/{id}".to_string(),
        }
    }
}

impl LinkTemplates {
    pub fn map_lookup_url(&self, position: LatLng) -> String {
        self.map_lookup
            .replace("{lat}", &position.lat.to_string())
            .replace("{lng}", &position.lng.to_string())
    }

    pub fn detail_url(&self, id: &RecordId) -> String {
        self.detail.replace("{id}", id.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 300,
            min_width: 200,
        }
    }
}

/// Build the popup body for a plotted record. Every interpolated field is escaped.
pub fn popup_html(record: &MarkerRecord, position: LatLng, links: &LinkTemplates) -> String {
    let field = |value: &Option<String>| {
        escape_html(value.as_deref().unwrap_or("Not specified"))
    };

    format!(
        r#"<div class="marker-info">
  <h3>Census #{id}</h3>
  <div class="marker-info-content">
    <div class="info-row"><span class="label">Locality:</span> {location}</div>
    <div class="info-row"><span class="label">Address:</span> {address}</div>
    <div class="info-row"><span class="label">Type:</span> {building_type}</div>
    <div class="info-row"><span class="label">Status:</span> {status}</div>
  </div>
  <div class="marker-actions">
    <a href="{lookup}" target="_blank" rel="noopener" class="marker-button location-button"><i class="icon-location"></i> Get location</a>
    <a href="{detail}" class="marker-button view-button"><i class="icon-doc"></i> View census</a>
  </div>
</div>"#,
        id = escape_html(record.id.as_str()),
        location = field(&record.location),
        address = field(&record.address),
        building_type = field(&record.building_type),
        status = field(&record.status),
        lookup = escape_html(&links.map_lookup_url(position)),
        detail = escape_html(&links.detail_url(&record.id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerPayload;
    use serde_json::json;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_links_use_raw_coordinates_and_id() {
        let links = LinkTemplates::default();
        let position = LatLng::new(4.6, -74.08).unwrap();
        assert_eq!(links.map_lookup_url(position), "https://www.google.com/maps?q=4.6,-74.08");
        assert_eq!(links.detail_url(&RecordId::from(17)), "/issues/17");
    }

    #[test]
    fn test_popup_escapes_script() {
        let record = MarkerRecord::from_payload(&MarkerPayload {
            id: json!(1),
            lat: json!(4.6),
            lng: json!(-74.08),
            location: Some("<script>alert(1)</script>".to_string()),
            ..Default::default()
        })
        .unwrap();
        let position = record.position.unwrap();

        let html = popup_html(&record, position, &LinkTemplates::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Census #1"));
        assert!(html.contains("href=\"/issues/1\""));
        assert!(html.contains("Not specified"));
    }
}
