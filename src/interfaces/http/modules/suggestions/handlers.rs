//! Suggestion handlers
//!
//! Every call recomputes the insights from the current ledger and stock.

use std::sync::Arc;

use axum::extract::{Query, State};

use super::dto::{SuggestionDto, SuggestionQuery};
use crate::application::SuggestionService;
use crate::domain::suggestion::Suggestion;
use crate::domain::DomainResult;
use crate::interfaces::http::common::{domain_error, ok, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct SuggestionHandlerState {
    pub suggestion_service: Arc<SuggestionService>,
}

fn respond(result: DomainResult<Vec<Suggestion>>) -> ApiResult<Vec<SuggestionDto>> {
    let suggestions = result.map_err(domain_error)?;
    ok(suggestions.into_iter().map(SuggestionDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    params(SuggestionQuery),
    responses(
        (status = 200, description = "All suggestions, most urgent first", body = ApiResponse<Vec<SuggestionDto>>),
        (status = 400, description = "Unknown category or priority")
    )
)]
pub async fn list_suggestions(
    State(state): State<SuggestionHandlerState>,
    Query(query): Query<SuggestionQuery>,
) -> ApiResult<Vec<SuggestionDto>> {
    let filter = query.into_filter().map_err(domain_error)?;
    respond(state.suggestion_service.all(filter).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/inventory",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Restock and clearance", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn inventory_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.inventory().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/pricing",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Discount and price-point insights", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn pricing_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.pricing().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/marketing",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Customer insights", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn marketing_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.marketing().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/regional",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Regional performance", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn regional_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.regional().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/bundles",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Frequently co-purchased products", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn bundle_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.bundles().await)
}

#[utoipa::path(
    get,
    path = "/api/v1/suggestions/high-priority",
    tag = "Suggestions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "HIGH priority only", body = ApiResponse<Vec<SuggestionDto>>))
)]
pub async fn high_priority_suggestions(
    State(state): State<SuggestionHandlerState>,
) -> ApiResult<Vec<SuggestionDto>> {
    respond(state.suggestion_service.high_priority().await)
}
