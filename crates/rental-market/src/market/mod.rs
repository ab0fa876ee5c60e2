pub mod analysis;
pub mod domain;
pub mod filter;
pub mod import;
mod pagination;
mod router;
pub mod stats;

pub use analysis::views::{
    CityRanking, CityStats, FurnishingStats, MarketReport, OverallStats, RoomStats, StateStats,
    TypeStats,
};
pub use analysis::MarketAnalyzer;
pub use domain::{FurnishingBucket, PropertyRecord, NOT_MENTIONED};
pub use filter::{
    apply_filters, available_cities, compute_facets, reset_filters, Facets, FilterState,
    PriceRange,
};
pub use import::{ListingImportError, ListingImporter};
pub use pagination::{paginate, Page};
pub use router::{
    analysis_response, market_router, AnalysisRequest, AnalysisResponse, CitiesRequest,
    FacetsRequest, FilterRequest, ListingSnapshot,
};
