//! Encore Match - buyer-preference matching service for the Encore resale marketplace
//!
//! This library scores and ranks resale ticket inventory against standing
//! buyer preferences: weighted multi-factor scoring, confidence tiers,
//! auto-approval decisions, and a scheduled batch mode that re-evaluates
//! every active preference.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatcherConfig, BatchScheduler, score_listing};
pub use crate::models::{BuyerPreference, Listing, MatchResult, MatchCriteria, ConfidenceTier, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }
}
