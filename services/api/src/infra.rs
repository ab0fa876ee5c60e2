use crate::cli::FilterFlags;
use metrics_exporter_prometheus::PrometheusHandle;
use rental_market::config::ListingsConfig;
use rental_market::market::{
    reset_filters, FilterState, ListingImportError, ListingImporter, ListingSnapshot,
    PropertyRecord,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_snapshot(
    config: &ListingsConfig,
    override_path: Option<&Path>,
) -> Result<ListingSnapshot, ListingImportError> {
    let path = override_path.or(config.snapshot_path.as_deref());
    let Some(path) = path else {
        info!("no listing snapshot configured; requests must carry records");
        return Ok(ListingSnapshot::default());
    };

    let records = ListingImporter::from_path(path)?;
    info!(path = %path.display(), listings = records.len(), "loaded listing snapshot");
    Ok(ListingSnapshot::new(records))
}

/// Builds the filter state the CLI flags describe, starting from the defaults
/// for `records` so an omitted price bound keeps the data's own bound.
pub(crate) fn filter_state_from_flags(
    records: &[PropertyRecord],
    flags: &FilterFlags,
) -> FilterState {
    let defaults = reset_filters(records);
    let mut state = defaults.clone();

    for value in &flags.types {
        state = state.toggle_type(value);
    }
    for value in &flags.states {
        state = state.toggle_state(value);
    }
    for value in &flags.cities {
        state = state.toggle_city(value);
    }
    for value in &flags.furnishings {
        state = state.toggle_furnishing(value);
    }
    for value in &flags.beds {
        state = state.toggle_beds(*value);
    }
    for value in &flags.amenities {
        state = state.toggle_amenity(value);
    }

    if flags.min_price.is_some() || flags.max_price.is_some() {
        let (default_min, default_max) = defaults
            .price_range
            .map(|range| (range.min, range.max))
            .unwrap_or((0.0, f64::INFINITY));
        state = state.with_price_range(
            flags.min_price.unwrap_or(default_min),
            flags.max_price.unwrap_or(default_max),
        );
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rental_market::market::PriceRange;

    fn records() -> Vec<PropertyRecord> {
        vec![
            PropertyRecord::new("p-1", "Apartment", 800.0).with_location("Johor", "Johor Bahru"),
            PropertyRecord::new("p-2", "House", 2400.0).with_location("Selangor", "Klang"),
        ]
    }

    #[test]
    fn flags_without_price_keep_data_bounds() {
        let flags = FilterFlags {
            types: vec!["House".to_string()],
            ..FilterFlags::default()
        };
        let state = filter_state_from_flags(&records(), &flags);
        assert_eq!(state.types, vec!["House"]);
        assert_eq!(
            state.price_range,
            Some(PriceRange {
                min: 800.0,
                max: 2400.0
            })
        );
    }

    #[test]
    fn partial_price_flags_fill_missing_bound() {
        let flags = FilterFlags {
            max_price: Some(1000.0),
            ..FilterFlags::default()
        };
        let state = filter_state_from_flags(&records(), &flags);
        assert_eq!(
            state.price_range,
            Some(PriceRange {
                min: 800.0,
                max: 1000.0
            })
        );
    }

    #[test]
    fn city_flags_apply_after_states() {
        let flags = FilterFlags {
            states: vec!["Selangor".to_string()],
            cities: vec!["Klang".to_string()],
            ..FilterFlags::default()
        };
        let state = filter_state_from_flags(&records(), &flags);
        assert_eq!(state.cities, vec!["Klang"]);
    }

    #[test]
    fn missing_snapshot_path_yields_empty_snapshot() {
        let snapshot =
            load_snapshot(&ListingsConfig::default(), None).expect("empty snapshot loads");
        assert!(snapshot.is_empty());
    }
}
