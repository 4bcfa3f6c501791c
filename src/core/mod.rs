// Core engine exports
pub mod batch;
pub mod confidence;
pub mod matcher;
pub mod reasons;
pub mod scoring;
pub mod selector;

pub use batch::{BatchScheduler, BatchSummary};
pub use confidence::{classify, auto_approve_eligible, recommended_price};
pub use matcher::{Matcher, MatcherConfig, MatchError, RankOutcome};
pub use reasons::build_reasons;
pub use scoring::score_listing;
pub use selector::{validate_preference, build_listing_query, passes_hard_filters};
