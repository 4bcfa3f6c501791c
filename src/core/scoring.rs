use chrono::{DateTime, Utc};

use crate::models::{BuyerPreference, Listing, MatchCriteria, ScoringWeights, SellerProfile};

/// Lower edge of the optimal price band, as a fraction of the buyer's max
const PRICE_BAND_LOW: f64 = 0.70;
/// Upper edge of the optimal price band, as a fraction of the buyer's max
const PRICE_BAND_HIGH: f64 = 0.90;

/// Score a candidate listing against a buyer preference
///
/// Scoring formula:
/// overall = (
///     price_score * 0.35 +         # within the optimal band = best
///     section_score * 0.25 +       # preferred section = higher
///     quantity_score * 0.20 +      # covers the full group = higher
///     timing_score * 0.10 +        # event date near target = higher
///     seller_score * 0.10          # seller reputation
/// )
///
/// Every factor is a pure function of the listing/preference snapshots, so
/// the breakdown is deterministic for fixed inputs and `now`.
pub fn score_listing(
    listing: &Listing,
    preference: &BuyerPreference,
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> MatchCriteria {
    let price_score = calculate_price_score(listing.price, preference.min_price, preference.max_price);
    let section_score = calculate_section_score(&listing.section, &preference.preferred_sections);
    let quantity_score = calculate_quantity_score(
        listing.available_quantity,
        preference.min_quantity,
        preference.max_quantity,
    );
    let timing_score = calculate_timing_score(listing.event_date, preference.event_date);
    let seller_score = calculate_seller_score(&listing.seller, now);

    let overall_score = (price_score * weights.price
        + section_score * weights.section
        + quantity_score * weights.quantity
        + timing_score * weights.timing
        + seller_score * weights.seller_trust)
        .clamp(0.0, 1.0);

    MatchCriteria {
        price_score,
        section_score,
        quantity_score,
        timing_score,
        seller_score,
        overall_score,
    }
}

/// Calculate price score (0-1)
///
/// Listings above the buyer's max are worthless; listings under the stated
/// minimum are acceptable but flagged down to 0.5 (under-asked). In between,
/// prices inside the [70%, 90%] band of the max score best.
#[inline]
pub fn calculate_price_score(price: f64, min_price: Option<f64>, max_price: f64) -> f64 {
    if price > max_price {
        return 0.0;
    }

    if let Some(min) = min_price {
        if price < min {
            return 0.5;
        }
    }

    let band_low = max_price * PRICE_BAND_LOW;
    let band_high = max_price * PRICE_BAND_HIGH;

    if price >= band_low && price <= band_high {
        1.0
    } else if price < band_low {
        // Ramp from 0.8 at zero up to 1.0 at the band's lower edge
        0.8 + (price / band_low) * 0.2
    } else {
        // Ramp from 1.0 at the band's upper edge down to 0.6 at max
        1.0 - ((price - band_high) / (max_price - band_high)) * 0.4
    }
}

/// Calculate section score (0-1)
///
/// Neutral 0.7 when the buyer stated no section preference. Exact
/// case-insensitive match beats a partial (substring) match; anything else
/// scores poorly but is not excluded here — inclusion is the store filter's
/// job, this score only affects ranking.
#[inline]
pub fn calculate_section_score(section: &str, preferred_sections: &[String]) -> f64 {
    if preferred_sections.is_empty() {
        return 0.7;
    }

    let section_lower = section.to_lowercase();

    for preferred in preferred_sections {
        if preferred.to_lowercase() == section_lower {
            return 1.0;
        }
    }

    for preferred in preferred_sections {
        let preferred_lower = preferred.to_lowercase();
        if section_lower.contains(&preferred_lower) || preferred_lower.contains(&section_lower) {
            return 0.8;
        }
    }

    0.3
}

/// Calculate quantity score (0-1)
///
/// Full coverage of the buyer's max quantity is ideal; partial coverage above
/// the minimum scales linearly; below the minimum is nearly worthless.
#[inline]
pub fn calculate_quantity_score(available: u32, min_quantity: u32, max_quantity: u32) -> f64 {
    if available >= max_quantity {
        1.0
    } else if available >= min_quantity {
        0.6 + (available as f64 / max_quantity as f64) * 0.4
    } else {
        0.2
    }
}

/// Calculate timing score (0-1)
///
/// Neutral 0.7 when the buyer has no target date (or the listing carries no
/// event date). Otherwise scored in steps by the absolute day difference.
#[inline]
pub fn calculate_timing_score(
    event_date: Option<DateTime<Utc>>,
    preferred_date: Option<DateTime<Utc>>,
) -> f64 {
    let (event, preferred) = match (event_date, preferred_date) {
        (Some(event), Some(preferred)) => (event, preferred),
        _ => return 0.7,
    };

    let day_diff = (event - preferred).num_days().abs();

    match day_diff {
        0 => 1.0,
        1 => 0.9,
        2..=7 => 0.7,
        8..=30 => 0.5,
        _ => 0.2,
    }
}

/// Calculate seller trust score (0-1)
///
/// Base 0.5, up to +0.3 from rating, up to +0.2 from completed sales, up to
/// +0.2 from account age in whole months (elapsed days / 30), clamped to 1.0.
#[inline]
pub fn calculate_seller_score(seller: &SellerProfile, now: DateTime<Utc>) -> f64 {
    let mut score = 0.5;

    score += (seller.rating / 5.0) * 0.3;

    score += match seller.total_sales {
        50.. => 0.2,
        20..=49 => 0.15,
        10..=19 => 0.1,
        5..=9 => 0.05,
        _ => 0.0,
    };

    let account_months = (now - seller.member_since).num_days() / 30;
    score += match account_months {
        12.. => 0.2,
        6..=11 => 0.15,
        3..=5 => 0.1,
        1..=2 => 0.05,
        _ => 0.0,
    };

    score.min(1.0)
}
