use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::matcher::{MatchError, Matcher};
use crate::core::selector::{build_listing_query, validate_preference};
use crate::models::{BuyerPreference, ConfidenceTier};
use crate::services::{CatalogStore, Notifier};

/// Aggregate totals for one scheduler run
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub total_matches: usize,
    pub users_processed: usize,
}

/// Scheduled re-evaluation of every active preference against inventory
///
/// One run walks all active, notification-enabled preferences and ranks each
/// independently. A single preference failing must never abort the batch:
/// its error is logged and the loop continues with the next record.
#[derive(Clone)]
pub struct BatchScheduler {
    store: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notifier>,
    matcher: Matcher,
}

impl BatchScheduler {
    pub fn new(store: Arc<dyn CatalogStore>, notifier: Arc<dyn Notifier>, matcher: Matcher) -> Self {
        Self {
            store,
            notifier,
            matcher,
        }
    }

    /// Run one full batch pass
    ///
    /// Fetching the preference list is the only step that can fail the run
    /// as a whole; everything after is isolated per preference.
    pub async fn run(&self) -> Result<BatchSummary, MatchError> {
        let preferences = self.store.get_active_preferences().await?;

        info!("Batch run starting over {} preferences", preferences.len());

        let mut total_matches = 0;
        let mut users_processed = 0;

        for preference in &preferences {
            match self.evaluate_preference(preference).await {
                Ok(count) => {
                    total_matches += count;
                }
                Err(e) => {
                    warn!(
                        "Skipping preference {} for buyer {}: {}",
                        preference.preference_id, preference.buyer_id, e
                    );
                }
            }
            users_processed += 1;
        }

        info!(
            "Batch run finished: {} matches across {} preferences",
            total_matches, users_processed
        );

        Ok(BatchSummary {
            total_matches,
            users_processed,
        })
    }

    /// Evaluate a single preference end to end
    ///
    /// The last-run timestamp is stamped whenever ranking completes, match
    /// list empty or not. Notification delivery is fire-and-forget: a failed
    /// dispatch is logged, never propagated.
    async fn evaluate_preference(&self, preference: &BuyerPreference) -> Result<usize, MatchError> {
        validate_preference(preference)?;

        let query = build_listing_query(preference, self.matcher.config().limits.candidate_pool);
        let candidates = self.store.find_candidate_listings(&query).await?;

        let outcome = self.matcher.rank(preference, candidates);

        if !outcome.matches.is_empty() && preference.notify_on_match {
            let top: Vec<_> = outcome
                .matches
                .iter()
                .take(self.matcher.config().limits.digest_top)
                .cloned()
                .collect();

            let summary = digest_summary(top[0].confidence, outcome.matches.len());

            if let Err(e) = self
                .notifier
                .notify_matches(&preference.buyer_id, &summary, &top)
                .await
            {
                warn!(
                    "Match digest for buyer {} failed to deliver: {}",
                    preference.buyer_id, e
                );
            }
        }

        self.store
            .update_preference_last_run(&preference.preference_id, Utc::now())
            .await?;

        Ok(outcome.matches.len())
    }
}

/// Digest headline, phrased by the confidence tier of the best match
fn digest_summary(best_tier: ConfidenceTier, count: usize) -> String {
    match best_tier {
        ConfidenceTier::High => format!(
            "We found {} ticket match{} for you, including one we think is a great fit",
            count,
            if count == 1 { "" } else { "es" }
        ),
        ConfidenceTier::Medium => format!(
            "We found {} promising ticket match{} worth a look",
            count,
            if count == 1 { "" } else { "es" }
        ),
        ConfidenceTier::Low => format!(
            "We found {} possible ticket match{} for you",
            count,
            if count == 1 { "" } else { "es" }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_summary_varies_by_tier() {
        let high = digest_summary(ConfidenceTier::High, 3);
        let medium = digest_summary(ConfidenceTier::Medium, 3);
        let low = digest_summary(ConfidenceTier::Low, 1);

        assert!(high.contains("great fit"));
        assert!(medium.contains("promising"));
        assert!(low.contains("1 possible ticket match"));
        assert!(!low.ends_with("es"));
    }
}
