use crate::models::{BuyerPreference, ConfidenceThresholds, ConfidenceTier, MatchCriteria};

/// Price-fit floor for skipping buyer review
const AUTO_APPROVE_MIN_PRICE_SCORE: f64 = 0.9;
/// Seller-trust floor for skipping buyer review
const AUTO_APPROVE_MIN_SELLER_SCORE: f64 = 0.8;

/// Classify an overall score into a confidence tier
///
/// Ties at a boundary resolve to the higher tier. Scores below the low
/// threshold return `None` and the candidate is dropped from results.
#[inline]
pub fn classify(overall_score: f64, thresholds: &ConfidenceThresholds) -> Option<ConfidenceTier> {
    if overall_score >= thresholds.high {
        Some(ConfidenceTier::High)
    } else if overall_score >= thresholds.medium {
        Some(ConfidenceTier::Medium)
    } else if overall_score >= thresholds.low {
        Some(ConfidenceTier::Low)
    } else {
        None
    }
}

/// Decide whether a match may bypass manual buyer approval
///
/// All four conditions are mandatory, which makes eligibility a strict
/// subset of HIGH confidence: opted-in buyer, overall at the high
/// threshold, near-perfect price fit, and a trusted seller.
#[inline]
pub fn auto_approve_eligible(
    criteria: &MatchCriteria,
    preference: &BuyerPreference,
    thresholds: &ConfidenceThresholds,
) -> bool {
    preference.instant_buy
        && criteria.overall_score >= thresholds.high
        && criteria.price_score >= AUTO_APPROVE_MIN_PRICE_SCORE
        && criteria.seller_score >= AUTO_APPROVE_MIN_SELLER_SCORE
}

/// Derive the suggested transaction price for a match
///
/// A high-confidence match is fairly priced already; weaker matches get a
/// small discount suggestion, never dipping below the buyer's stated
/// minimum when present.
#[inline]
pub fn recommended_price(
    listing_price: f64,
    overall_score: f64,
    buyer_min_price: Option<f64>,
    thresholds: &ConfidenceThresholds,
) -> f64 {
    if overall_score >= thresholds.high {
        listing_price
    } else if overall_score >= thresholds.medium {
        (listing_price * 0.95).max(buyer_min_price.unwrap_or(listing_price * 0.8))
    } else {
        (listing_price * 0.90).max(buyer_min_price.unwrap_or(listing_price * 0.7))
    }
}
