use super::super::domain::FurnishingBucket;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    #[serde(rename = "type")]
    pub property_type: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub p25: f64,
    pub p75: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateStats {
    pub state: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub range: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub city: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub range: f64,
}

/// Cities of one state, most-listed first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRanking {
    pub state: String,
    pub cities: Vec<CityStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomStats {
    pub beds: u32,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FurnishingStats {
    pub bucket: FurnishingBucket,
    pub label: &'static str,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    pub total_listings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallStats>,
    pub type_analysis: Vec<TypeStats>,
    pub state_analysis: Vec<StateStats>,
    pub city_analysis_by_state: Vec<CityRanking>,
    pub room_analysis: Vec<RoomStats>,
    pub furnishing_analysis: Vec<FurnishingStats>,
}

impl MarketReport {
    pub fn furnishing(&self, bucket: FurnishingBucket) -> Option<&FurnishingStats> {
        self.furnishing_analysis
            .iter()
            .find(|entry| entry.bucket == bucket)
    }

    pub fn cities_for(&self, state: &str) -> Option<&[CityStats]> {
        self.city_analysis_by_state
            .iter()
            .find(|ranking| ranking.state == state)
            .map(|ranking| ranking.cities.as_slice())
    }
}
