//! Multi-field marker filtering
//!
//! Every present criterion narrows the set (logical AND); an absent or blank
//! criterion matches everything. Filtering is pure: it borrows from the full
//! `MarkerSet` and preserves load order.

use serde::{Deserialize, Serialize};

use crate::models::{MarkerRecord, MarkerSet, StatusId};

/// The filterable dimensions, with the stable control ids used by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Location,
    BuildingType,
    Address,
    RecordNumber,
    Status,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Location,
        FilterDimension::BuildingType,
        FilterDimension::Address,
        FilterDimension::RecordNumber,
        FilterDimension::Status,
    ];

    /// DOM id of the control bound to this dimension
    pub fn control_id(&self) -> &'static str {
        match self {
            FilterDimension::Location => "location-filter",
            FilterDimension::BuildingType => "building-type-filter",
            FilterDimension::Address => "address-filter",
            FilterDimension::RecordNumber => "title-filter",
            FilterDimension::Status => "status-filter",
        }
    }
}

/// User-supplied filter values, one optional value per dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub building_type: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub record_number: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_building_type(mut self, building_type: impl Into<String>) -> Self {
        self.building_type = Some(building_type.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_record_number(mut self, record_number: impl Into<String>) -> Self {
        self.record_number = Some(record_number.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Raw value for a dimension, as typed by the user
    pub fn get(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::Location => self.location.as_deref(),
            FilterDimension::BuildingType => self.building_type.as_deref(),
            FilterDimension::Address => self.address.as_deref(),
            FilterDimension::RecordNumber => self.record_number.as_deref(),
            FilterDimension::Status => self.status.as_deref(),
        }
    }

    pub fn set(&mut self, dimension: FilterDimension, value: Option<String>) {
        let slot = match dimension {
            FilterDimension::Location => &mut self.location,
            FilterDimension::BuildingType => &mut self.building_type,
            FilterDimension::Address => &mut self.address,
            FilterDimension::RecordNumber => &mut self.record_number,
            FilterDimension::Status => &mut self.status,
        };
        *slot = value;
    }

    /// True when no dimension carries a non-blank value
    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|d| active(self.get(*d)).is_none())
    }

    pub fn matches(&self, record: &MarkerRecord) -> bool {
        self.compile().matches(record)
    }

    /// Evaluate the criteria over the full set, preserving order
    pub fn apply<'a>(&self, markers: &'a MarkerSet) -> Vec<&'a MarkerRecord> {
        let compiled = self.compile();
        markers.iter().filter(|r| compiled.matches(r)).collect()
    }

    fn compile(&self) -> CompiledCriteria<'_> {
        CompiledCriteria {
            location: active(self.location.as_deref()),
            building_type: active(self.building_type.as_deref()),
            address: active(self.address.as_deref()).map(address_key),
            record_number: active(self.record_number.as_deref()),
            status: active(self.status.as_deref()).and_then(StatusId::parse),
        }
    }
}

/// Case-folded form compared by the address filter. Browser-side filtering
/// matches against this value as served, not its own lowercasing.
pub fn address_key(address: &str) -> String {
    address.to_lowercase()
}

fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Criteria with blank values dropped and the address lowercased once
struct CompiledCriteria<'c> {
    location: Option<&'c str>,
    building_type: Option<&'c str>,
    address: Option<String>,
    record_number: Option<&'c str>,
    status: Option<StatusId>,
}

impl CompiledCriteria<'_> {
    fn matches(&self, record: &MarkerRecord) -> bool {
        exact(self.location, record.location.as_deref())
            && exact(self.building_type, record.building_type.as_deref())
            && self.address_matches(record)
            && exact(self.record_number, Some(record.id.as_str()))
            && self.status_matches(record)
    }

    fn address_matches(&self, record: &MarkerRecord) -> bool {
        match &self.address {
            None => true,
            Some(needle) => record
                .address
                .as_deref()
                .is_some_and(|a| address_key(a).contains(needle.as_str())),
        }
    }

    fn status_matches(&self, record: &MarkerRecord) -> bool {
        match &self.status {
            None => true,
            Some(wanted) => record.status_id.as_ref() == Some(wanted),
        }
    }
}

fn exact(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w),
    }
}
