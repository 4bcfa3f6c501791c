use serde::{Deserialize, Serialize};

/// A buyer's standing matching criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerPreference {
    #[serde(rename = "preferenceId")]
    pub preference_id: String,
    #[serde(rename = "buyerId")]
    pub buyer_id: String,
    #[serde(rename = "eventId", default)]
    pub event_id: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: f64,
    #[serde(rename = "minPrice", default)]
    pub min_price: Option<f64>,
    #[serde(rename = "preferredSections", default)]
    pub preferred_sections: Vec<String>,
    #[serde(rename = "maxQuantity")]
    pub max_quantity: u32,
    #[serde(rename = "minQuantity", default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(rename = "eventDate", default)]
    pub event_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(rename = "instantBuy", default)]
    pub instant_buy: bool,
    #[serde(rename = "notifyOnMatch", default = "default_true")]
    pub notify_on_match: bool,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "lastMatchRun", default)]
    pub last_match_run: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_min_quantity() -> u32 { 1 }
fn default_true() -> bool { true }

/// Sale-side inventory listing (read-only to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "listingId")]
    pub listing_id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "eventDate", default)]
    pub event_date: Option<chrono::DateTime<chrono::Utc>>,
    pub section: String,
    pub price: f64,
    #[serde(rename = "availableQuantity")]
    pub available_quantity: u32,
    pub seller: SellerProfile,
    pub status: ListingStatus,
}

impl Listing {
    /// Helper to check whether the listing is still purchasable
    pub fn active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}

/// Seller reputation snapshot carried on each listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(rename = "sellerId")]
    pub seller_id: String,
    pub rating: f64,
    #[serde(rename = "totalSales")]
    pub total_sales: u32,
    #[serde(rename = "memberSince")]
    pub member_since: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

/// Per-(listing, preference) score breakdown, produced fresh on every evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(rename = "priceScore")]
    pub price_score: f64,
    #[serde(rename = "sectionScore")]
    pub section_score: f64,
    #[serde(rename = "quantityScore")]
    pub quantity_score: f64,
    #[serde(rename = "timingScore")]
    pub timing_score: f64,
    #[serde(rename = "sellerScore")]
    pub seller_score: f64,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
}

/// Discrete confidence classification of an overall match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

/// The engine's output unit for one (listing, preference) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "listingId")]
    pub listing_id: String,
    #[serde(rename = "sellerId")]
    pub seller_id: String,
    #[serde(rename = "buyerId")]
    pub buyer_id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub score: f64,
    pub criteria: MatchCriteria,
    #[serde(rename = "recommendedPrice")]
    pub recommended_price: f64,
    pub confidence: ConfidenceTier,
    pub reasons: Vec<String>,
    #[serde(rename = "autoApproveEligible")]
    pub auto_approve_eligible: bool,
}

/// Hard-filter parameters handed to the catalog store
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub event_id: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_quantity: u32,
    pub sections: Option<Vec<String>>,
    pub venue: Option<String>,
    pub category: Option<String>,
    pub limit: usize,
}

/// Factor weights combining the five scores into one overall score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub price: f64,
    pub section: f64,
    pub quantity: f64,
    pub timing: f64,
    pub seller_trust: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.price + self.section + self.quantity + self.timing + self.seller_trust
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price: 0.35,
            section: 0.25,
            quantity: 0.20,
            timing: 0.10,
            seller_trust: 0.10,
        }
    }
}

/// Overall-score cutoffs for the confidence tiers; scores below `low` are discarded
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.85,
            medium: 0.65,
            low: 0.45,
        }
    }
}

/// Bounded-work caps for candidate selection and result lists
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub candidate_pool: usize,
    pub max_results: usize,
    pub digest_top: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            candidate_pool: 50,
            max_results: 10,
            digest_top: 3,
        }
    }
}
