use super::domain::PropertyRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive monthly rent bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// User-selected filter values. An empty selection leaves that dimension
/// unrestricted; a `None` price range applies no price bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub furnishings: Vec<String>,
    #[serde(default)]
    pub beds: Vec<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl FilterState {
    pub fn toggle_type(&self, value: &str) -> Self {
        Self {
            types: toggled(&self.types, value.to_string()),
            ..self.clone()
        }
    }

    /// Cities depend on the state selection, so any state change clears them.
    pub fn toggle_state(&self, value: &str) -> Self {
        Self {
            states: toggled(&self.states, value.to_string()),
            cities: Vec::new(),
            ..self.clone()
        }
    }

    pub fn toggle_city(&self, value: &str) -> Self {
        if self.states.is_empty() {
            return self.clone();
        }
        Self {
            cities: toggled(&self.cities, value.to_string()),
            ..self.clone()
        }
    }

    pub fn toggle_furnishing(&self, value: &str) -> Self {
        Self {
            furnishings: toggled(&self.furnishings, value.to_string()),
            ..self.clone()
        }
    }

    pub fn toggle_beds(&self, value: u32) -> Self {
        Self {
            beds: toggled(&self.beds, value),
            ..self.clone()
        }
    }

    pub fn toggle_amenity(&self, value: &str) -> Self {
        Self {
            amenities: toggled(&self.amenities, value.to_string()),
            ..self.clone()
        }
    }

    pub fn with_price_range(&self, min: f64, max: f64) -> Self {
        Self {
            price_range: Some(PriceRange { min, max }),
            ..self.clone()
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        selected(&self.types, Some(record.property_type.as_str()))
            && selected(&self.states, record.state_value())
            && selected(&self.cities, record.city_value())
            && self
                .price_range
                .map_or(true, |range| range.contains(record.price))
            && (self.beds.is_empty() || record.beds.is_some_and(|beds| self.beds.contains(&beds)))
            && selected(&self.furnishings, Some(record.furnishing_label()))
            && self
                .amenities
                .iter()
                .all(|amenity| record.has_amenity(amenity))
    }
}

fn toggled<T: PartialEq + Clone>(current: &[T], value: T) -> Vec<T> {
    if current.contains(&value) {
        current.iter().filter(|item| **item != value).cloned().collect()
    } else {
        let mut next = current.to_vec();
        next.push(value);
        next
    }
}

fn selected(selection: &[String], value: Option<&str>) -> bool {
    if selection.is_empty() {
        return true;
    }
    value.is_some_and(|value| selection.iter().any(|candidate| candidate == value))
}

/// Distinct selectable values per filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub types: Vec<String>,
    pub states: Vec<String>,
    pub furnishings: Vec<String>,
    pub beds: Vec<u32>,
    pub amenities: Vec<String>,
}

pub fn compute_facets(records: &[PropertyRecord]) -> Facets {
    let mut facets = Facets::default();

    for record in records {
        if !record.property_type.trim().is_empty() {
            push_distinct(&mut facets.types, &record.property_type);
        }
        if let Some(state) = record.state_value() {
            push_distinct(&mut facets.states, state);
        }
        push_distinct(&mut facets.furnishings, record.furnishing_label());
        if let Some(beds) = record.beds {
            if !facets.beds.contains(&beds) {
                facets.beds.push(beds);
            }
        }
        for amenity in &record.amenities {
            let amenity = amenity.trim();
            if !amenity.is_empty() {
                push_distinct(&mut facets.amenities, amenity);
            }
        }
    }

    facets.beds.sort_unstable();
    facets
}

/// Cities are only offered once at least one state is chosen.
pub fn available_cities(records: &[PropertyRecord], selected_states: &[String]) -> Vec<String> {
    let mut cities = Vec::new();
    if selected_states.is_empty() {
        return cities;
    }

    for record in records {
        let in_selected_state = record
            .state_value()
            .is_some_and(|state| selected_states.iter().any(|selected| selected == state));
        if !in_selected_state {
            continue;
        }
        if let Some(city) = record.city_value() {
            push_distinct(&mut cities, city);
        }
    }

    cities
}

pub fn apply_filters(records: &[PropertyRecord], state: &FilterState) -> Vec<PropertyRecord> {
    let filtered: Vec<PropertyRecord> = records
        .iter()
        .filter(|record| state.matches(record))
        .cloned()
        .collect();

    debug!(
        total = records.len(),
        matched = filtered.len(),
        "applied listing filters"
    );
    filtered
}

/// Default state: nothing selected and the price range spanning the data.
/// An empty collection has no price bounds, so the range is left unset.
pub fn reset_filters(records: &[PropertyRecord]) -> FilterState {
    let price_range = records
        .iter()
        .map(|record| record.price)
        .fold(None, |range: Option<PriceRange>, price| match range {
            None => Some(PriceRange {
                min: price,
                max: price,
            }),
            Some(range) => Some(PriceRange {
                min: range.min.min(price),
                max: range.max.max(price),
            }),
        });

    FilterState {
        price_range,
        ..FilterState::default()
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::domain::NOT_MENTIONED;

    fn listings() -> Vec<PropertyRecord> {
        vec![
            PropertyRecord::new("p-1", "Apartment", 1500.0)
                .with_location("Selangor", "Shah Alam")
                .with_beds(3)
                .with_furnishing("Fully furnished")
                .with_amenities(["Pool", "Gym"]),
            PropertyRecord::new("p-2", "Condominium", 2200.0)
                .with_location("Selangor", "Petaling Jaya")
                .with_beds(2)
                .with_amenities(["Gym"]),
            PropertyRecord::new("p-3", "Apartment", 900.0)
                .with_location("Johor", "Johor Bahru")
                .with_beds(1)
                .with_furnishing("Unfurnished"),
            PropertyRecord::new("p-4", "House", 3100.0)
                .with_state("Selangor")
                .with_furnishing(""),
        ]
    }

    #[test]
    fn facets_follow_first_occurrence_and_sort_beds() {
        let facets = compute_facets(&listings());
        assert_eq!(facets.types, vec!["Apartment", "Condominium", "House"]);
        assert_eq!(facets.states, vec!["Selangor", "Johor"]);
        assert_eq!(
            facets.furnishings,
            vec!["Fully furnished", NOT_MENTIONED, "Unfurnished"]
        );
        assert_eq!(facets.beds, vec![1, 2, 3]);
        assert_eq!(facets.amenities, vec!["Pool", "Gym"]);
    }

    #[test]
    fn available_cities_require_a_state() {
        let records = listings();
        assert!(available_cities(&records, &[]).is_empty());

        let cities = available_cities(&records, &["Selangor".to_string()]);
        assert_eq!(cities, vec!["Shah Alam", "Petaling Jaya"]);
    }

    #[test]
    fn default_state_returns_every_listing() {
        let records = listings();
        let state = reset_filters(&records);
        assert_eq!(
            state.price_range,
            Some(PriceRange {
                min: 900.0,
                max: 3100.0
            })
        );
        assert_eq!(apply_filters(&records, &state), records);
    }

    #[test]
    fn reset_on_empty_collection_leaves_price_unbounded() {
        let state = reset_filters(&[]);
        assert_eq!(state, FilterState::default());
        assert!(apply_filters(&[], &state).is_empty());
    }

    #[test]
    fn filters_combine_across_dimensions() {
        let records = listings();
        let state = reset_filters(&records)
            .toggle_type("Apartment")
            .toggle_state("Selangor");
        let filtered = apply_filters(&records, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p-1");

        let by_price = FilterState::default().with_price_range(1500.0, 2200.0);
        let ids: Vec<_> = apply_filters(&records, &by_price)
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }

    #[test]
    fn missing_fields_fail_active_dimensions() {
        let records = listings();
        let state = FilterState::default().toggle_beds(2).toggle_beds(3);
        let ids: Vec<_> = apply_filters(&records, &state)
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);

        let state = FilterState::default()
            .toggle_state("Selangor")
            .toggle_city("Shah Alam");
        let ids: Vec<_> = apply_filters(&records, &state)
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["p-1"]);
    }

    #[test]
    fn blank_furnishing_matches_only_the_not_mentioned_bucket() {
        let records = listings();
        let state = FilterState::default().toggle_furnishing(NOT_MENTIONED);
        let ids: Vec<_> = apply_filters(&records, &state)
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["p-2", "p-4"]);
    }

    #[test]
    fn amenity_selection_requires_every_amenity() {
        let records = listings();
        let state = FilterState::default().toggle_amenity("gym").toggle_amenity("Pool");
        let filtered = apply_filters(&records, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p-1");
    }

    #[test]
    fn toggling_state_clears_city_selection() {
        let state = FilterState::default()
            .toggle_state("Selangor")
            .toggle_city("Shah Alam");
        assert_eq!(state.cities, vec!["Shah Alam"]);

        let state = state.toggle_state("Selangor");
        assert!(state.states.is_empty());
        assert!(state.cities.is_empty());
    }

    #[test]
    fn city_toggle_is_ignored_without_state() {
        let state = FilterState::default().toggle_city("Shah Alam");
        assert!(state.cities.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = listings();
        let state = FilterState::default()
            .toggle_type("Apartment")
            .with_price_range(1000.0, 4000.0);
        let once = apply_filters(&records, &state);
        let twice = apply_filters(&once, &state);
        assert_eq!(once, twice);
    }
}
