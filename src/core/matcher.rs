use chrono::Utc;
use thiserror::Error;

use crate::core::{
    confidence::{auto_approve_eligible, classify, recommended_price},
    reasons::build_reasons,
    scoring::score_listing,
    selector::passes_hard_filters,
};
use crate::models::{
    BuyerPreference, ConfidenceThresholds, Listing, MatchLimits, MatchResult, ScoringWeights,
};
use crate::services::catalog::CatalogError;

/// Errors surfaced by the matching engine
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    #[error("Catalog store error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Engine configuration: weights, tier thresholds, and work bounds
///
/// Injected rather than hard-coded so tests can substitute alternate weight
/// sets without touching the scoring logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatcherConfig {
    pub weights: ScoringWeights,
    pub thresholds: ConfidenceThresholds,
    pub limits: MatchLimits,
}

/// Result of ranking one candidate pool
#[derive(Debug)]
pub struct RankOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Hard-filter re-check of the fetched pool
/// 2. Factor scoring and weighted combination
/// 3. Confidence classification (sub-threshold candidates dropped)
/// 4. Result assembly, ranking, truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Rank a candidate pool against a buyer preference
    ///
    /// Scoring is all-or-nothing per listing: a candidate either yields a
    /// complete MatchResult or is dropped. An empty result is a valid
    /// outcome, not an error. For fixed inputs and pool state the returned
    /// order is deterministic: overall score descending, then listing id.
    pub fn rank(&self, preference: &BuyerPreference, candidates: Vec<Listing>) -> RankOutcome {
        let total_candidates = candidates.len();
        let now = Utc::now();

        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            // Stage 1: re-check the store-level hard filters in process
            .filter(|listing| passes_hard_filters(listing, preference))
            // Stages 2-4: score, classify, assemble
            .filter_map(|listing| {
                let criteria = score_listing(&listing, preference, &self.config.weights, now);

                let confidence = classify(criteria.overall_score, &self.config.thresholds)?;

                let reasons = build_reasons(&listing, &criteria);
                let eligible = auto_approve_eligible(&criteria, preference, &self.config.thresholds);
                let suggested = recommended_price(
                    listing.price,
                    criteria.overall_score,
                    preference.min_price,
                    &self.config.thresholds,
                );

                Some(MatchResult {
                    listing_id: listing.listing_id,
                    seller_id: listing.seller.seller_id,
                    buyer_id: preference.buyer_id.clone(),
                    event_id: listing.event_id,
                    score: criteria.overall_score,
                    criteria,
                    recommended_price: suggested,
                    confidence,
                    reasons,
                    auto_approve_eligible: eligible,
                })
            })
            .collect();

        // Sort by score (descending); exact ties fall back to listing id so
        // the order is a deterministic total order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.listing_id.cmp(&b.listing_id))
        });

        matches.truncate(self.config.limits.max_results);

        RankOutcome {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use crate::models::{ConfidenceTier, ListingStatus, SellerProfile};

    fn create_candidate(id: &str, price: f64, quantity: u32, rating: f64) -> Listing {
        Listing {
            listing_id: id.to_string(),
            event_id: "event_1".to_string(),
            event_date: None,
            section: "Floor".to_string(),
            price,
            available_quantity: quantity,
            seller: SellerProfile {
                seller_id: format!("seller_{}", id),
                rating,
                total_sales: 60,
                member_since: Utc::now() - Duration::days(730),
            },
            status: ListingStatus::Active,
        }
    }

    fn create_preference() -> BuyerPreference {
        BuyerPreference {
            preference_id: "pref_1".to_string(),
            buyer_id: "buyer_1".to_string(),
            event_id: Some("event_1".to_string()),
            max_price: 100.0,
            min_price: None,
            preferred_sections: vec![],
            max_quantity: 2,
            min_quantity: 1,
            event_date: None,
            venue: None,
            category: None,
            keywords: vec![],
            instant_buy: true,
            notify_on_match: true,
            is_active: true,
            last_match_run: None,
        }
    }

    #[test]
    fn test_rank_basic() {
        let matcher = Matcher::default();
        let preference = create_preference();

        let candidates = vec![
            create_candidate("1", 80.0, 2, 5.0),   // In-band price, full quantity
            create_candidate("2", 120.0, 2, 5.0),  // Over budget, filtered out
        ];

        let outcome = matcher.rank(&preference, candidates);

        assert_eq!(outcome.total_candidates, 2);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].listing_id, "1");
        assert_eq!(outcome.matches[0].confidence, ConfidenceTier::High);
    }

    #[test]
    fn test_rank_sorted_descending() {
        let matcher = Matcher::default();
        let preference = create_preference();

        let candidates = vec![
            create_candidate("1", 99.0, 1, 3.0),   // Weaker on every factor
            create_candidate("2", 80.0, 2, 5.0),   // Strong match
            create_candidate("3", 75.0, 2, 4.0),
        ];

        let outcome = matcher.rank(&preference, candidates);

        assert!(outcome.matches.len() >= 2);
        for pair in outcome.matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(outcome.matches[0].listing_id, "2");
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let matcher = Matcher::default();
        let preference = create_preference();

        let candidates: Vec<Listing> = (0..30)
            .map(|i| create_candidate(&format!("{:02}", i), 80.0, 2, 5.0))
            .collect();

        let outcome = matcher.rank(&preference, candidates);

        assert_eq!(outcome.matches.len(), 10);
        assert_eq!(outcome.total_candidates, 30);
    }

    #[test]
    fn test_rank_equal_scores_ordered_by_listing_id() {
        let matcher = Matcher::default();
        let preference = create_preference();

        // Identical listings except for id: identical scores
        let candidates = vec![
            create_candidate("09", 80.0, 2, 5.0),
            create_candidate("03", 80.0, 2, 5.0),
            create_candidate("07", 80.0, 2, 5.0),
        ];

        let outcome = matcher.rank(&preference, candidates);

        let ids: Vec<&str> = outcome.matches.iter().map(|m| m.listing_id.as_str()).collect();
        assert_eq!(ids, vec!["03", "07", "09"]);
    }

    #[test]
    fn test_rank_drops_sub_threshold_candidates() {
        let matcher = Matcher::default();
        let mut preference = create_preference();
        preference.preferred_sections = vec!["VIP".to_string()];

        // Passes no hard filter (section mismatch), never scored
        let candidates = vec![create_candidate("1", 99.0, 1, 0.0)];
        let outcome = matcher.rank(&preference, candidates);
        assert!(outcome.matches.is_empty());

        // Every emitted result carries at least the low threshold
        let preference = create_preference();
        let candidates: Vec<Listing> = (0..20)
            .map(|i| create_candidate(&i.to_string(), 95.0, 1, (i % 5) as f64))
            .collect();
        let outcome = matcher.rank(&preference, candidates);
        for m in &outcome.matches {
            assert!(m.score >= matcher.config().thresholds.low);
            assert!(m.score <= 1.0);
        }
    }

    #[test]
    fn test_rank_is_idempotent() {
        let matcher = Matcher::default();
        let preference = create_preference();
        let candidates: Vec<Listing> = (0..15)
            .map(|i| create_candidate(&format!("{:02}", i), 70.0 + i as f64, 1 + (i % 3) as u32, 4.0))
            .collect();

        let first = matcher.rank(&preference, candidates.clone());
        let second = matcher.rank(&preference, candidates);

        let first_ids: Vec<&str> = first.matches.iter().map(|m| m.listing_id.as_str()).collect();
        let second_ids: Vec<&str> = second.matches.iter().map(|m| m.listing_id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_auto_approve_results_are_high_confidence() {
        let matcher = Matcher::default();
        let preference = create_preference();
        let candidates: Vec<Listing> = (0..10)
            .map(|i| create_candidate(&i.to_string(), 60.0 + i as f64 * 4.0, 2, 4.5))
            .collect();

        let outcome = matcher.rank(&preference, candidates);

        for m in &outcome.matches {
            if m.auto_approve_eligible {
                assert_eq!(m.confidence, ConfidenceTier::High);
            }
        }
    }
}
