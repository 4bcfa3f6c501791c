// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BuyerPreference, Listing, SellerProfile, ListingStatus, MatchCriteria, ConfidenceTier, MatchResult, ListingQuery, ScoringWeights, ConfidenceThresholds, MatchLimits};
pub use requests::FindMatchesRequest;
pub use responses::{FindMatchesResponse, BatchRunResponse, HealthResponse, ErrorResponse};
