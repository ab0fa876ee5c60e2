mod grouping;
pub mod views;

use super::domain::{FurnishingBucket, PropertyRecord};
use super::stats;
use grouping::{group_prices, PriceGroup};
use tracing::debug;
use views::{
    CityRanking, CityStats, FurnishingStats, MarketReport, OverallStats, RoomStats, StateStats,
    TypeStats,
};

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Grouped price statistics over the supplied snapshot.
    ///
    /// Callers check for an empty collection first; the report is still
    /// well-formed for one (no groups, zeroed furnishing buckets).
    pub fn analyze(records: &[PropertyRecord]) -> MarketReport {
        let report = MarketReport {
            total_listings: records.len(),
            overall: overall_stats(records),
            type_analysis: type_analysis(records),
            state_analysis: state_analysis(records),
            city_analysis_by_state: city_analysis_by_state(records),
            room_analysis: room_analysis(records),
            furnishing_analysis: furnishing_analysis(records),
        };

        debug!(
            listings = report.total_listings,
            types = report.type_analysis.len(),
            states = report.state_analysis.len(),
            "computed market analysis"
        );
        report
    }
}

fn overall_stats(records: &[PropertyRecord]) -> Option<OverallStats> {
    if records.is_empty() {
        return None;
    }

    let prices: Vec<f64> = records.iter().map(|record| record.price).collect();
    Some(OverallStats {
        count: prices.len(),
        mean: stats::mean(&prices),
        median: stats::median(&prices),
        min: stats::min(&prices),
        max: stats::max(&prices),
        p25: stats::percentile(&prices, 25.0),
        p75: stats::percentile(&prices, 75.0),
    })
}

fn type_analysis(records: &[PropertyRecord]) -> Vec<TypeStats> {
    group_prices(records, |record| Some(record.property_type.clone()))
        .into_iter()
        .map(|PriceGroup { key, prices }| TypeStats {
            property_type: key,
            count: prices.len(),
            mean: stats::mean(&prices),
            median: stats::median(&prices),
            min: stats::min(&prices),
            max: stats::max(&prices),
            range: stats::price_range(&prices),
            p25: stats::percentile(&prices, 25.0),
            p75: stats::percentile(&prices, 75.0),
        })
        .collect()
}

fn state_groups(records: &[PropertyRecord]) -> Vec<PriceGroup<String>> {
    let mut groups = group_prices(records, |record| record.state_value().map(str::to_string));
    groups.sort_by(|a, b| b.prices.len().cmp(&a.prices.len()));
    groups
}

fn state_analysis(records: &[PropertyRecord]) -> Vec<StateStats> {
    state_groups(records)
        .into_iter()
        .map(|PriceGroup { key, prices }| StateStats {
            state: key,
            count: prices.len(),
            mean: stats::mean(&prices),
            median: stats::median(&prices),
            range: stats::price_range(&prices),
        })
        .collect()
}

fn city_analysis_by_state(records: &[PropertyRecord]) -> Vec<CityRanking> {
    state_groups(records)
        .into_iter()
        .map(|PriceGroup { key: state, .. }| {
            let in_state: Vec<PropertyRecord> = records
                .iter()
                .filter(|record| record.state_value() == Some(state.as_str()))
                .cloned()
                .collect();

            let mut cities = group_prices(&in_state, |record| {
                record.city_value().map(str::to_string)
            });
            cities.sort_by(|a, b| b.prices.len().cmp(&a.prices.len()));

            let cities = cities
                .into_iter()
                .map(|PriceGroup { key, prices }| CityStats {
                    city: key,
                    count: prices.len(),
                    mean: stats::mean(&prices),
                    median: stats::median(&prices),
                    range: stats::price_range(&prices),
                })
                .collect();

            CityRanking { state, cities }
        })
        .collect()
}

fn room_analysis(records: &[PropertyRecord]) -> Vec<RoomStats> {
    let mut rooms = group_prices(records, |record| record.beds);
    rooms.sort_by_key(|group| group.key);

    rooms
        .into_iter()
        .map(|PriceGroup { key, prices }| RoomStats {
            beds: key,
            count: prices.len(),
            mean: stats::mean(&prices),
            median: stats::median(&prices),
        })
        .collect()
}

fn furnishing_analysis(records: &[PropertyRecord]) -> Vec<FurnishingStats> {
    FurnishingBucket::ordered()
        .into_iter()
        .map(|bucket| {
            let prices: Vec<f64> = records
                .iter()
                .filter(|record| {
                    FurnishingBucket::from_raw(record.furnishing.as_deref()) == Some(bucket)
                })
                .map(|record| record.price)
                .collect();

            let (mean, median) = if prices.is_empty() {
                (0.0, 0.0)
            } else {
                (stats::mean(&prices), stats::median(&prices))
            };

            FurnishingStats {
                bucket,
                label: bucket.label(),
                count: prices.len(),
                mean,
                median,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_groups_follow_first_occurrence() {
        let records = vec![
            PropertyRecord::new("p-1", "Studio", 800.0),
            PropertyRecord::new("p-2", "House", 3000.0),
            PropertyRecord::new("p-3", "Studio", 1000.0),
        ];
        let report = MarketAnalyzer::analyze(&records);
        let labels: Vec<_> = report
            .type_analysis
            .iter()
            .map(|entry| entry.property_type.as_str())
            .collect();
        assert_eq!(labels, vec!["Studio", "House"]);
        assert_eq!(report.type_analysis[0].p25, 800.0);
        assert_eq!(report.type_analysis[0].p75, 1000.0);
    }

    #[test]
    fn state_ties_keep_first_encountered_order() {
        let records = vec![
            PropertyRecord::new("p-1", "Apartment", 900.0).with_state("Penang"),
            PropertyRecord::new("p-2", "Apartment", 1100.0).with_state("Johor"),
            PropertyRecord::new("p-3", "Apartment", 1300.0).with_state("Johor"),
            PropertyRecord::new("p-4", "Apartment", 1500.0).with_state("Penang"),
            PropertyRecord::new("p-5", "Apartment", 1700.0).with_state(" "),
        ];
        let report = MarketAnalyzer::analyze(&records);
        let states: Vec<_> = report
            .state_analysis
            .iter()
            .map(|entry| entry.state.as_str())
            .collect();
        assert_eq!(states, vec!["Penang", "Johor"]);
        assert_eq!(report.state_analysis[1].range, 200.0);
    }

    #[test]
    fn rooms_skip_listings_without_bed_count() {
        let records = vec![
            PropertyRecord::new("p-1", "Apartment", 900.0).with_beds(3),
            PropertyRecord::new("p-2", "Apartment", 1100.0),
            PropertyRecord::new("p-3", "Apartment", 700.0).with_beds(1),
            PropertyRecord::new("p-4", "Apartment", 1300.0).with_beds(3),
        ];
        let report = MarketAnalyzer::analyze(&records);
        let beds: Vec<_> = report.room_analysis.iter().map(|entry| entry.beds).collect();
        assert_eq!(beds, vec![1, 3]);
        assert_eq!(report.room_analysis[1].mean, 1100.0);
    }

    #[test]
    fn empty_collection_produces_zeroed_buckets() {
        let report = MarketAnalyzer::analyze(&[]);
        assert_eq!(report.total_listings, 0);
        assert!(report.overall.is_none());
        assert!(report.type_analysis.is_empty());
        assert_eq!(report.furnishing_analysis.len(), 4);
        assert!(report
            .furnishing_analysis
            .iter()
            .all(|entry| entry.count == 0 && entry.mean == 0.0 && entry.median == 0.0));
    }
}
