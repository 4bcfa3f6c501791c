use crate::models::{Listing, MatchCriteria};

/// Factor threshold above which a factor earns a display reason
const REASON_THRESHOLD: f64 = 0.8;
/// Secondary price threshold for the softer price note
const PRICE_FAIR_THRESHOLD: f64 = 0.6;
/// Completed-sales floor for the experienced-seller note
const EXPERIENCED_SELLER_SALES: u32 = 20;

/// Produce the human-readable justification strings for a match
///
/// Order is fixed: price, section, quantity, seller rating, timing,
/// experienced seller. Purely presentational; ranking never reads these.
pub fn build_reasons(listing: &Listing, criteria: &MatchCriteria) -> Vec<String> {
    let mut reasons = Vec::new();

    if criteria.price_score >= REASON_THRESHOLD {
        reasons.push("Great price within your budget".to_string());
    } else if criteria.price_score >= PRICE_FAIR_THRESHOLD {
        reasons.push("Fair price for this event".to_string());
    }

    if criteria.section_score >= REASON_THRESHOLD {
        reasons.push(format!("Seats in your preferred section ({})", listing.section));
    }

    if criteria.quantity_score >= REASON_THRESHOLD {
        reasons.push(format!(
            "{} tickets available, enough for your group",
            listing.available_quantity
        ));
    }

    if criteria.seller_score >= REASON_THRESHOLD {
        reasons.push(format!(
            "Highly rated seller ({:.1}/5)",
            listing.seller.rating
        ));
    }

    if criteria.timing_score >= REASON_THRESHOLD {
        reasons.push("Event date lines up with your target".to_string());
    }

    if listing.seller.total_sales >= EXPERIENCED_SELLER_SALES {
        reasons.push(format!(
            "Experienced seller with {} completed sales",
            listing.seller.total_sales
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::models::{ListingStatus, SellerProfile};

    fn create_test_listing(rating: f64, total_sales: u32) -> Listing {
        Listing {
            listing_id: "listing_1".to_string(),
            event_id: "event_1".to_string(),
            event_date: None,
            section: "Floor".to_string(),
            price: 80.0,
            available_quantity: 4,
            seller: SellerProfile {
                seller_id: "seller_1".to_string(),
                rating,
                total_sales,
                member_since: Utc::now(),
            },
            status: ListingStatus::Active,
        }
    }

    fn create_criteria(price: f64, section: f64, quantity: f64, timing: f64, seller: f64) -> MatchCriteria {
        MatchCriteria {
            price_score: price,
            section_score: section,
            quantity_score: quantity,
            timing_score: timing,
            seller_score: seller,
            overall_score: 0.9,
        }
    }

    #[test]
    fn test_all_factors_strong_emits_fixed_order() {
        let listing = create_test_listing(4.8, 35);
        let criteria = create_criteria(1.0, 1.0, 1.0, 0.9, 0.9);

        let reasons = build_reasons(&listing, &criteria);

        assert_eq!(reasons.len(), 6);
        assert!(reasons[0].contains("price"));
        assert!(reasons[1].contains("section"));
        assert!(reasons[2].contains("tickets"));
        assert!(reasons[3].contains("rated seller"));
        assert!(reasons[4].contains("date"));
        assert!(reasons[5].contains("35 completed sales"));
    }

    #[test]
    fn test_fair_price_tier() {
        let listing = create_test_listing(3.0, 0);
        let criteria = create_criteria(0.65, 0.3, 0.2, 0.7, 0.5);

        let reasons = build_reasons(&listing, &criteria);

        assert_eq!(reasons, vec!["Fair price for this event".to_string()]);
    }

    #[test]
    fn test_weak_factors_emit_nothing() {
        let listing = create_test_listing(2.0, 3);
        let criteria = create_criteria(0.5, 0.3, 0.2, 0.2, 0.5);

        assert!(build_reasons(&listing, &criteria).is_empty());
    }

    #[test]
    fn test_experienced_seller_note_is_unconditional() {
        // Weak factor scores, but the seller has enough completed sales
        let listing = create_test_listing(2.0, 20);
        let criteria = create_criteria(0.5, 0.3, 0.2, 0.2, 0.5);

        let reasons = build_reasons(&listing, &criteria);

        assert_eq!(reasons, vec!["Experienced seller with 20 completed sales".to_string()]);
    }
}
