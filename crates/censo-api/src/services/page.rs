//! The census map page: filter controls, counter, banner area and the map
//! container, plus the embedded data the browser script starts from.

use std::fmt::Write;

use censo_core::error::Result;
use censo_core::filter::{address_key, FilterDimension};
use censo_core::models::{FilterOptions, MarkerRecord, MarkerSet, Project, StatusId};
use censo_core::popup::escape_html;
use censo_core::view::{self, FitOptions, MapOptions, ViewConfig};
use serde::Serialize;

use super::snapshot::ViewSnapshot;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// View settings the browser script needs, with durations in milliseconds
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettings {
    pub map: MapOptions,
    pub fit: FitOptions,
    pub rejected_status: StatusId,
    pub layout_fixup_ms: u128,
    pub resize_debounce_ms: u128,
    pub banner_timeout_ms: u128,
    pub messages: ClientMessages,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientMessages {
    pub init_failed: &'static str,
    pub render_failed: &'static str,
    pub no_results: &'static str,
    pub filter_failed: &'static str,
    pub reset_failed: &'static str,
}

impl From<&ViewConfig> for ClientSettings {
    fn from(config: &ViewConfig) -> Self {
        Self {
            map: config.map.clone(),
            fit: config.fit,
            rejected_status: config.rejected_status.clone(),
            layout_fixup_ms: config.layout_fixup_delay.as_millis(),
            resize_debounce_ms: config.resize_debounce.as_millis(),
            banner_timeout_ms: config.banner_timeout.as_millis(),
            messages: ClientMessages {
                init_failed: view::MSG_INIT_FAILED,
                render_failed: view::MSG_RENDER_FAILED,
                no_results: view::MSG_NO_RESULTS,
                filter_failed: view::MSG_FILTER_FAILED,
                reset_failed: view::MSG_RESET_FAILED,
            },
        }
    }
}

/// A record as the browser filters it, with the address pre-folded
#[derive(Serialize)]
struct ClientRecord<'a> {
    #[serde(flatten)]
    record: &'a MarkerRecord,
    address_key: Option<String>,
}

impl<'a> From<&'a MarkerRecord> for ClientRecord<'a> {
    fn from(record: &'a MarkerRecord) -> Self {
        Self {
            record,
            address_key: record.address.as_deref().map(address_key),
        }
    }
}

#[derive(Serialize)]
struct PageData<'a> {
    records: Vec<ClientRecord<'a>>,
    placed: &'a ViewSnapshot,
    settings: ClientSettings,
}

/// Render the full page for `project`
pub fn render_map_page(
    project: &Project,
    markers: &MarkerSet,
    options: &FilterOptions,
    snapshot: &ViewSnapshot,
    config: &ViewConfig,
) -> Result<String> {
    let data = PageData {
        records: markers.iter().map(ClientRecord::from).collect(),
        placed: snapshot,
        settings: ClientSettings::from(config),
    };
    let data = embed_json(&serde_json::to_string(&data)?);

    let title = escape_html(&project.name);
    let controls = filter_controls(options);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Census map - {title}</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<style>
#censo-map {{ height: 600px; width: 100%; }}
#censo-filters {{ display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 8px; }}
.alert {{ padding: 8px 12px; margin-bottom: 8px; border-radius: 4px; }}
.alert-error {{ background: #fdecea; color: #c0392b; }}
.alert-notice {{ background: #eaf4fd; color: #2980b9; }}
</style>
</head>
<body>
<h2>Census map - {title}</h2>
<div id="censo-banners"></div>
<div id="censo-filters">
{controls}<button type="button" id="apply-filters">Filter</button>
<button type="button" id="reset-filters">Reset</button>
</div>
<p>Results: <span id="censo-counter">{counter}</span></p>
<div id="censo-map"></div>
<script id="censo-map-data" type="application/json">{data}</script>
<script src="{LEAFLET_JS}"></script>
<script src="/assets/censo_mapa.js"></script>
</body>
</html>
"#,
        counter = snapshot.counter,
    ))
}

fn filter_controls(options: &FilterOptions) -> String {
    let statuses: Vec<(String, String)> = options
        .statuses
        .iter()
        .map(|s| (s.id.to_string(), s.name.clone()))
        .collect();
    let localities: Vec<(String, String)> =
        options.localities.iter().map(|v| (v.clone(), v.clone())).collect();
    let building_types: Vec<(String, String)> =
        options.building_types.iter().map(|v| (v.clone(), v.clone())).collect();

    let mut html = String::new();
    for dimension in FilterDimension::ALL {
        let id = dimension.control_id();
        match dimension {
            FilterDimension::Location => select(&mut html, id, "All localities", &localities),
            FilterDimension::BuildingType => {
                select(&mut html, id, "All building types", &building_types)
            }
            FilterDimension::Status => select(&mut html, id, "All statuses", &statuses),
            FilterDimension::Address => text_input(&mut html, id, "Address"),
            FilterDimension::RecordNumber => text_input(&mut html, id, "Census number"),
        }
    }
    html
}

fn select(html: &mut String, id: &str, blank: &str, choices: &[(String, String)]) {
    let _ = writeln!(html, r#"<select id="{id}">"#);
    let _ = writeln!(html, r#"<option value="">{}</option>"#, escape_html(blank));
    for (value, label) in choices {
        let _ = writeln!(
            html,
            r#"<option value="{}">{}</option>"#,
            escape_html(value),
            escape_html(label)
        );
    }
    html.push_str("</select>\n");
}

fn text_input(html: &mut String, id: &str, placeholder: &str) {
    let _ = writeln!(
        html,
        r#"<input type="text" id="{id}" placeholder="{}">"#,
        escape_html(placeholder)
    );
}

/// Make serialized JSON safe inside a `<script>` element
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use censo_core::models::{MarkerPayload, StatusOption};
    use serde_json::json;

    fn project() -> Project {
        Project {
            id: 1,
            name: "Census <2024>".to_string(),
            identifier: "censo".to_string(),
        }
    }

    #[test]
    fn test_controls_escape_option_values() {
        let options = FilterOptions {
            localities: vec!["A & B".to_string()],
            building_types: vec!["House".to_string()],
            statuses: vec![StatusOption {
                id: StatusId::from(12),
                name: "Rejected".to_string(),
            }],
        };

        let html = filter_controls(&options);

        assert!(html.contains(r#"<select id="location-filter">"#));
        assert!(html.contains(r#"<option value="A &amp; B">A &amp; B</option>"#));
        assert!(html.contains(r#"<option value="12">Rejected</option>"#));
        assert!(html.contains(r#"<input type="text" id="title-filter""#));
    }

    #[test]
    fn test_embedded_data_cannot_close_script() {
        let payloads: Vec<MarkerPayload> = serde_json::from_value(json!([
            {"id": 1, "lat": 4.6, "lng": -74.1, "address": "</script><script>alert(1)</script>"}
        ]))
        .unwrap();
        let markers = MarkerSet::ingest(&payloads);

        let html = render_map_page(
            &project(),
            &markers,
            &FilterOptions::default(),
            &ViewSnapshot::default(),
            &ViewConfig::default(),
        )
        .unwrap();

        assert!(html.contains("<title>Census map - Census &lt;2024&gt;</title>"));
        assert_eq!(html.matches("</script>").count(), 3);
        assert!(html.contains(r#"<\/script><script>alert(1)<\/script>"#));
    }

    #[test]
    fn test_embedded_records_carry_folded_address() {
        let payloads: Vec<MarkerPayload> = serde_json::from_value(json!([
            {"id": 1, "lat": 4.6, "lng": -74.1, "address": "Avenida ÑANDÚ 5"},
            {"id": 2, "lat": 4.6, "lng": -74.1}
        ]))
        .unwrap();
        let markers = MarkerSet::ingest(&payloads);

        let html = render_map_page(
            &project(),
            &markers,
            &FilterOptions::default(),
            &ViewSnapshot::default(),
            &ViewConfig::default(),
        )
        .unwrap();

        let start = html.find(r#"type="application/json">"#).unwrap() + 24;
        let end = start + html[start..].find("</script>").unwrap();
        let data: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();

        let records = data["records"].as_array().unwrap();
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[0]["address"], "Avenida ÑANDÚ 5");
        assert_eq!(records[0]["address_key"], "avenida ñandú 5");
        assert!(records[1]["address_key"].is_null());
    }
}
