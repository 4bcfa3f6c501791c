use crate::core::matcher::MatchError;
use crate::models::{BuyerPreference, Listing, ListingQuery};

/// Validate a preference before candidate selection
///
/// Malformed preferences are rejected here, never scored.
pub fn validate_preference(preference: &BuyerPreference) -> Result<(), MatchError> {
    if preference.max_price <= 0.0 || !preference.max_price.is_finite() {
        return Err(MatchError::InvalidPreference(
            "maxPrice must be a positive number".to_string(),
        ));
    }

    if let Some(min_price) = preference.min_price {
        if min_price > preference.max_price {
            return Err(MatchError::InvalidPreference(
                "minPrice must not exceed maxPrice".to_string(),
            ));
        }
    }

    if preference.max_quantity < 1 {
        return Err(MatchError::InvalidPreference(
            "maxQuantity must be at least 1".to_string(),
        ));
    }

    if preference.min_quantity > preference.max_quantity {
        return Err(MatchError::InvalidPreference(
            "minQuantity must not exceed maxQuantity".to_string(),
        ));
    }

    Ok(())
}

/// Build the hard-filter query handed to the catalog store
///
/// The store applies the cheap exact filters (status, price bounds, quantity,
/// exact section membership); fuzzy section comparison only happens later
/// during scoring. Venue/category hints narrow the pool when present.
pub fn build_listing_query(preference: &BuyerPreference, pool_size: usize) -> ListingQuery {
    let sections = if preference.preferred_sections.is_empty() {
        None
    } else {
        Some(preference.preferred_sections.clone())
    };

    ListingQuery {
        event_id: preference.event_id.clone(),
        min_price: preference.min_price.unwrap_or(0.0),
        max_price: preference.max_price,
        min_quantity: preference.min_quantity,
        sections,
        venue: preference.venue.clone(),
        category: preference.category.clone(),
        limit: pool_size,
    }
}

/// Re-check the store-level hard filters in process
///
/// The pool is fetched over the wire; a listing that slipped past the store
/// filters (stale index, lagging replica) must still never be scored.
#[inline]
pub fn passes_hard_filters(listing: &Listing, preference: &BuyerPreference) -> bool {
    if !listing.active() || listing.available_quantity == 0 {
        return false;
    }

    if let Some(event_id) = &preference.event_id {
        if &listing.event_id != event_id {
            return false;
        }
    }

    if listing.price > preference.max_price {
        return false;
    }

    if let Some(min_price) = preference.min_price {
        if listing.price < min_price {
            return false;
        }
    }

    if listing.available_quantity < preference.min_quantity {
        return false;
    }

    // Exact, case-sensitive membership; the fuzzy comparison in scoring is
    // for ranking quality, not inclusion
    if !preference.preferred_sections.is_empty()
        && !preference.preferred_sections.contains(&listing.section) {
        return false;
    }

    true
}
