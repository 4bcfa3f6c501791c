use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{BatchScheduler, Matcher};
use crate::core::selector::{build_listing_query, validate_preference};
use crate::models::{
    BatchRunResponse, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
};
use crate::services::CatalogStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub matcher: Matcher,
    pub scheduler: BatchScheduler,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/batch/run", web::post().to(run_batch));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.catalog.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "preferenceId": "string"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let preference_id = &req.preference_id;

    tracing::info!("Finding matches for preference: {}", preference_id);

    let preference = match state.catalog.get_preference(preference_id).await {
        Ok(preference) => preference,
        Err(e) => {
            tracing::error!("Failed to load preference {}: {}", preference_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load preference".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Malformed preferences are rejected before any candidate selection
    if let Err(e) = validate_preference(&preference) {
        tracing::info!("Rejecting preference {}: {}", preference_id, e);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid preference".to_string(),
            message: e.to_string(),
            status_code: 400,
        });
    }

    let query = build_listing_query(&preference, state.matcher.config().limits.candidate_pool);

    let candidates = match state.catalog.find_candidate_listings(&query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", preference_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Found {} candidates for {}", candidates.len(), preference_id);

    let outcome = state.matcher.rank(&preference, candidates);

    tracing::info!(
        "Returning {} matches for preference {} (from {} candidates)",
        outcome.matches.len(),
        preference_id,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: outcome.matches,
        total_candidates: outcome.total_candidates,
    })
}

/// Trigger one batch run over all active preferences
///
/// POST /api/v1/matches/batch/run
///
/// The recurring trigger (cron, orchestrator) lives outside this service;
/// this endpoint runs a single pass and reports the aggregate totals.
async fn run_batch(state: web::Data<AppState>) -> impl Responder {
    match state.scheduler.run().await {
        Ok(summary) => HttpResponse::Ok().json(BatchRunResponse {
            total_matches: summary.total_matches,
            users_processed: summary.users_processed,
        }),
        Err(e) => {
            tracing::error!("Batch run failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Batch run failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
