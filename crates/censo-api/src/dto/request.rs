use censo_core::filter::FilterCriteria;
use serde::Deserialize;

/// Filter values accepted on the markers endpoint, named after the page's controls
#[derive(Debug, Default, Deserialize)]
pub struct MarkerQuery {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub census_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<MarkerQuery> for FilterCriteria {
    fn from(query: MarkerQuery) -> Self {
        FilterCriteria {
            location: query.location,
            building_type: query.building_type,
            address: query.address,
            record_number: query.census_number,
            status: query.status,
        }
    }
}
