use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{BuyerPreference, Listing, ListingQuery, ListingStatus, SellerProfile};

/// Errors that can occur when interacting with the catalog store
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Persistence boundary for preferences and listings
///
/// The engine only ever reads through this trait, plus the one write it is
/// allowed: stamping a preference's last batch run.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the bounded candidate pool passing the hard filters
    async fn find_candidate_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, CatalogError>;

    /// Load a single stored preference by id
    async fn get_preference(&self, preference_id: &str) -> Result<BuyerPreference, CatalogError>;

    /// All preferences with matching and notifications enabled
    async fn get_active_preferences(&self) -> Result<Vec<BuyerPreference>, CatalogError>;

    /// Record when a preference was last evaluated by the batch scheduler
    async fn update_preference_last_run(
        &self,
        preference_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), CatalogError>;

    async fn health_check(&self) -> Result<bool, CatalogError> {
        Ok(true)
    }
}

/// PostgreSQL-backed catalog store
///
/// Owns the marketplace tables for buyer preferences and ticket listings.
/// Listings join their seller's reputation snapshot so scoring never makes
/// a second round trip.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new catalog store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to PostgreSQL catalog store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    fn listing_from_row(row: &sqlx::postgres::PgRow) -> Listing {
        Listing {
            listing_id: row.get("listing_id"),
            event_id: row.get("event_id"),
            event_date: row.get("event_date"),
            section: row.get("section"),
            price: row.get("price"),
            available_quantity: row.get::<i32, _>("available_quantity") as u32,
            seller: SellerProfile {
                seller_id: row.get("seller_id"),
                rating: row.get("rating"),
                total_sales: row.get::<i32, _>("total_sales") as u32,
                member_since: row.get("member_since"),
            },
            status: row.get("status"),
        }
    }

    fn preference_from_row(row: &sqlx::postgres::PgRow) -> BuyerPreference {
        BuyerPreference {
            preference_id: row.get("preference_id"),
            buyer_id: row.get("buyer_id"),
            event_id: row.get("event_id"),
            max_price: row.get("max_price"),
            min_price: row.get("min_price"),
            preferred_sections: row
                .get::<Option<Vec<String>>, _>("preferred_sections")
                .unwrap_or_default(),
            max_quantity: row.get::<i32, _>("max_quantity") as u32,
            min_quantity: row.get::<i32, _>("min_quantity") as u32,
            event_date: row.get("event_date"),
            venue: row.get("venue"),
            category: row.get("category"),
            keywords: row.get::<Option<Vec<String>>, _>("keywords").unwrap_or_default(),
            instant_buy: row.get("instant_buy"),
            notify_on_match: row.get("notify_on_match"),
            is_active: row.get("is_active"),
            last_match_run: row.get("last_match_run"),
        }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    /// Fetch candidate listings passing every hard filter
    ///
    /// All filters run store-side so scoring only ever sees the bounded
    /// pool: active status, positive availability, price bounds, minimum
    /// quantity, exact section membership, and the optional event, venue,
    /// and category constraints.
    async fn find_candidate_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>, CatalogError> {
        let sql = r#"
            SELECT
                l.listing_id, l.event_id, l.event_date, l.section, l.price,
                l.available_quantity, l.status,
                s.seller_id, s.rating, s.total_sales, s.member_since
            FROM listings l
            JOIN sellers s ON s.seller_id = l.seller_id
            WHERE l.status = 'active'
              AND l.available_quantity > 0
              AND l.price >= $1
              AND l.price <= $2
              AND l.available_quantity >= $3
              AND ($4::text IS NULL OR l.event_id = $4)
              AND ($5::text[] IS NULL OR l.section = ANY($5))
              AND ($6::text IS NULL OR l.venue = $6)
              AND ($7::text IS NULL OR l.category = $7)
            ORDER BY l.price ASC
            LIMIT $8
        "#;

        let rows = sqlx::query(sql)
            .bind(query.min_price)
            .bind(query.max_price)
            .bind(query.min_quantity as i32)
            .bind(query.event_id.as_deref())
            .bind(query.sections.clone())
            .bind(query.venue.as_deref())
            .bind(query.category.as_deref())
            .bind(query.limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let listings: Vec<Listing> = rows.iter().map(Self::listing_from_row).collect();

        tracing::debug!("Candidate query returned {} listings", listings.len());

        Ok(listings)
    }

    async fn get_preference(&self, preference_id: &str) -> Result<BuyerPreference, CatalogError> {
        let sql = r#"
            SELECT
                preference_id, buyer_id, event_id, max_price, min_price,
                preferred_sections, max_quantity, min_quantity, event_date,
                venue, category, keywords, instant_buy, notify_on_match,
                is_active, last_match_run
            FROM buyer_preferences
            WHERE preference_id = $1
        "#;

        let row = sqlx::query(sql)
            .bind(preference_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!("Preference not found: {}", preference_id))
            })?;

        Ok(Self::preference_from_row(&row))
    }

    async fn get_active_preferences(&self) -> Result<Vec<BuyerPreference>, CatalogError> {
        let sql = r#"
            SELECT
                preference_id, buyer_id, event_id, max_price, min_price,
                preferred_sections, max_quantity, min_quantity, event_date,
                venue, category, keywords, instant_buy, notify_on_match,
                is_active, last_match_run
            FROM buyer_preferences
            WHERE is_active = TRUE
              AND notify_on_match = TRUE
            ORDER BY preference_id
        "#;

        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        let preferences: Vec<BuyerPreference> = rows.iter().map(Self::preference_from_row).collect();

        tracing::debug!("Loaded {} active preferences for batch run", preferences.len());

        Ok(preferences)
    }

    async fn update_preference_last_run(
        &self,
        preference_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<(), CatalogError> {
        let sql = r#"
            UPDATE buyer_preferences
            SET last_match_run = $2
            WHERE preference_id = $1
        "#;

        let result = sqlx::query(sql)
            .bind(preference_id)
            .bind(timestamp)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!(
                "Preference not found: {}",
                preference_id
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
