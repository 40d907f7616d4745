use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::{LatLng, MarkerPayload, RecordId, StatusId, StatusOption};
use crate::error::{CensoError, Result};

/// A census record normalized for display and filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    pub id: RecordId,

    /// `None` when the coordinates were missing, non-numeric or out of range.
    /// Such records still take part in filtering but are never plotted.
    pub position: Option<LatLng>,

    pub location: Option<String>,
    pub building_type: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub status_id: Option<StatusId>,
    pub title: Option<String>,
    pub updated_on: Option<String>,
}

impl MarkerRecord {
    /// Validate and normalize one payload entry
    pub fn from_payload(payload: &MarkerPayload) -> Result<Self> {
        let id = RecordId::from_json(&payload.id).ok_or_else(|| CensoError::InvalidRecord {
            reason: format!("missing or malformed id: {}", payload.id),
        })?;

        Ok(Self {
            id,
            position: LatLng::from_json(&payload.lat, &payload.lng),
            location: non_empty(payload.location.as_deref()),
            building_type: non_empty(payload.building_type.as_deref()),
            address: non_empty(payload.address.as_deref()),
            status: non_empty(payload.status.as_deref()),
            status_id: StatusId::from_json(&payload.status_id),
            title: non_empty(payload.title.as_deref()),
            updated_on: non_empty(payload.updated_on.as_deref()),
        })
    }

    pub fn is_plottable(&self) -> bool {
        self.position.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// The full, immutable marker set loaded for one page.
///
/// Cloning is cheap; filtered views borrow from it and never mutate it.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    records: Arc<[MarkerRecord]>,
}

impl MarkerSet {
    /// Build the set from the load-time payload.
    ///
    /// Entries without a usable id are skipped; when an id repeats, the first
    /// occurrence wins.
    pub fn ingest<'a, I>(payloads: I) -> Self
    where
        I: IntoIterator<Item = &'a MarkerPayload>,
    {
        let mut records = Vec::new();
        for payload in payloads {
            match MarkerRecord::from_payload(payload) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "Skipping census record"),
            }
        }
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<MarkerRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            if seen.insert(record.id.clone()) {
                unique.push(record);
            } else {
                tracing::warn!(record_id = %record.id, "Skipping duplicate census record");
            }
        }

        tracing::debug!(count = unique.len(), "Loaded census markers");
        Self {
            records: unique.into(),
        }
    }

    pub fn records(&self) -> &[MarkerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkerRecord> {
        self.records.iter()
    }

    /// Borrow every record, in load order
    pub fn all(&self) -> Vec<&MarkerRecord> {
        self.records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct statuses in first-seen order, for the status filter control
    pub fn status_options(&self) -> Vec<StatusOption> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| {
                let id = r.status_id.clone()?;
                if !seen.insert(id.clone()) {
                    return None;
                }
                let name = r.status.clone().unwrap_or_else(|| id.to_string());
                Some(StatusOption { id, name })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a MarkerRecord;
    type IntoIter = std::slice::Iter<'a, MarkerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
