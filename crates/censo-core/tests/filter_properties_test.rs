//! Algebraic properties of marker filtering

use censo_core::filter::FilterCriteria;
use censo_core::models::{MarkerPayload, MarkerRecord, MarkerSet};
use proptest::prelude::*;
use serde_json::json;

const LOCALITIES: [&str; 3] = ["Suba", "Usaquén", "Kennedy"];
const BUILDING_TYPES: [&str; 3] = ["Casa", "Lote", "Edificio"];
const ADDRESSES: [&str; 4] = ["Calle 80", "carrera 7", "CALLE 26 SUR", "Avenida Boyacá"];

prop_compose! {
    fn arb_payload(id: usize)(
        locality in proptest::option::of(0..LOCALITIES.len()),
        building in proptest::option::of(0..BUILDING_TYPES.len()),
        address in proptest::option::of(0..ADDRESSES.len()),
        status in 1u8..6,
        status_as_text in any::<bool>(),
        plottable in any::<bool>(),
    ) -> MarkerPayload {
        MarkerPayload {
            id: json!(id),
            lat: if plottable { json!(4.6) } else { json!("n/a") },
            lng: json!(-74.1),
            location: locality.map(|i| LOCALITIES[i].to_string()),
            building_type: building.map(|i| BUILDING_TYPES[i].to_string()),
            address: address.map(|i| ADDRESSES[i].to_string()),
            status_id: if status_as_text { json!(status.to_string()) } else { json!(status) },
            ..Default::default()
        }
    }
}

fn arb_set() -> impl Strategy<Value = MarkerSet> {
    (0usize..20)
        .prop_flat_map(|n| (0..n).map(arb_payload).collect::<Vec<_>>())
        .prop_map(|payloads| MarkerSet::ingest(&payloads))
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        proptest::option::of(proptest::sample::select(LOCALITIES.to_vec())),
        proptest::option::of(proptest::sample::select(BUILDING_TYPES.to_vec())),
        proptest::option::of(proptest::sample::select(vec!["calle", "7", "SUR", "x"])),
        proptest::option::of(0usize..20),
        proptest::option::of(1u8..6),
    )
        .prop_map(|(location, building_type, address, record, status)| FilterCriteria {
            location: location.map(str::to_string),
            building_type: building_type.map(str::to_string),
            address: address.map(str::to_string),
            record_number: record.map(|r| r.to_string()),
            status: status.map(|s| s.to_string()),
        })
}

fn ids(records: &[&MarkerRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

fn split(criteria: &FilterCriteria) -> (FilterCriteria, FilterCriteria) {
    let first = FilterCriteria {
        location: criteria.location.clone(),
        building_type: criteria.building_type.clone(),
        ..Default::default()
    };
    let second = FilterCriteria {
        address: criteria.address.clone(),
        record_number: criteria.record_number.clone(),
        status: criteria.status.clone(),
        ..Default::default()
    };
    (first, second)
}

proptest! {
    #[test]
    fn prop_empty_criteria_is_identity(set in arb_set()) {
        let all: Vec<String> = set.iter().map(|r| r.id.to_string()).collect();
        prop_assert_eq!(ids(&FilterCriteria::default().apply(&set)), all);
    }

    #[test]
    fn prop_location_filter_is_exact_subsequence(set in arb_set(), pick in 0..LOCALITIES.len()) {
        let wanted = LOCALITIES[pick];
        let expected: Vec<String> = set
            .iter()
            .filter(|r| r.location.as_deref() == Some(wanted))
            .map(|r| r.id.to_string())
            .collect();
        let result = FilterCriteria::new().with_location(wanted).apply(&set);
        prop_assert_eq!(ids(&result), expected);
    }

    #[test]
    fn prop_address_filter_is_case_insensitive_substring(set in arb_set(), needle in "[a-zA-Z ]{1,4}") {
        prop_assume!(!needle.trim().is_empty());
        let lowered = needle.trim().to_lowercase();
        let expected: Vec<String> = set
            .iter()
            .filter(|r| r.address.as_deref().is_some_and(|a| a.to_lowercase().contains(&lowered)))
            .map(|r| r.id.to_string())
            .collect();
        let result = FilterCriteria::new().with_address(needle).apply(&set);
        prop_assert_eq!(ids(&result), expected);
    }

    #[test]
    fn prop_status_filter_ignores_code_representation(set in arb_set(), status in 1u8..6) {
        let expected: Vec<String> = set
            .iter()
            .filter(|r| r.status_id.as_ref().map(|s| s.as_str()) == Some(status.to_string().as_str()))
            .map(|r| r.id.to_string())
            .collect();
        let result = FilterCriteria::new().with_status(status.to_string()).apply(&set);
        prop_assert_eq!(ids(&result), expected);
    }

    #[test]
    fn prop_conjunction_is_intersection(set in arb_set(), criteria in arb_criteria()) {
        let (first, second) = split(&criteria);
        let only_first = ids(&first.apply(&set));
        let only_second = ids(&second.apply(&set));

        let intersection: Vec<String> = only_first
            .into_iter()
            .filter(|id| only_second.contains(id))
            .collect();

        prop_assert_eq!(ids(&criteria.apply(&set)), intersection);
    }

    #[test]
    fn prop_filtering_never_mutates_the_set(set in arb_set(), criteria in arb_criteria()) {
        let before: Vec<MarkerRecord> = set.records().to_vec();
        let _ = criteria.apply(&set);
        prop_assert_eq!(set.records(), before.as_slice());
    }
}
